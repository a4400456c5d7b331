//! Parameter definitions and validation
//!
//! A parameter is a named design variable: a unit, an expression the host
//! evaluates (a literal such as `10 mm` or a formula such as `width * 2`),
//! and a free-text comment.

use serde::{Deserialize, Serialize};

/// A named design parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    /// The name (unique within a design, matched exactly)
    pub name: String,

    /// The unit, or `None` when the parameter has no defined unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Formula or literal value text
    pub expression: String,

    /// Free-text comment (may be empty for parameters the host created itself)
    #[serde(default)]
    pub comment: String,
}

impl Parameter {
    /// Create a unitless parameter with an empty comment
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            expression: expression.into(),
            comment: String::new(),
        }
    }

    /// Set the unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Look up the unit. `None` means the parameter has no readable unit.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// True if unit, expression and comment already equal the given values.
    /// A missing unit compares equal to an empty one.
    pub fn has_values(&self, unit: &str, expression: &str, comment: &str) -> bool {
        self.unit().unwrap_or("") == unit && self.expression == expression && self.comment == comment
    }
}

/// Validate a parameter name
/// Rules:
/// - Must start with a letter or underscore
/// - Can contain letters, numbers and underscores
/// - Cannot be a built-in expression function or constant (sin, sqrt, PI)
pub fn is_valid_name(name: &str) -> Result<(), String> {
    let Some(first) = name.chars().next() else {
        return Err("Name cannot be empty".into());
    };

    if first.is_ascii_digit() {
        return Err("Name must start with a letter or underscore, not a digit".into());
    }

    if !first.is_alphabetic() && first != '_' {
        return Err("Name must start with a letter or underscore".into());
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err("Name can only contain letters, numbers, and underscores".into());
    }

    if is_reserved_name(&name.to_lowercase()) {
        return Err(format!(
            "'{}' is a built-in function or constant. Choose a different name.",
            name
        ));
    }

    Ok(())
}

/// Check if name matches a built-in expression function or constant (lowercase input)
fn is_reserved_name(lower_name: &str) -> bool {
    const RESERVED: &[&str] = &[
        // Trig
        "sin", "cos", "tan", "asin", "acos", "atan",
        "sinh", "cosh", "tanh", "asinh", "acosh", "atanh",
        // Math
        "abs", "sqrt", "exp", "ln", "log", "pow", "sign",
        "floor", "ceil", "round", "min", "max",
        // Constants
        "pi", "e",
    ];

    RESERVED.contains(&lower_name)
}

/// Shallow syntax check of an expression before it reaches evaluation.
///
/// Rejects empty expressions, unbalanced parentheses and unterminated
/// single-quoted text values. Unit and reference resolution is left to
/// whatever evaluates the expression.
pub fn check_expression(expression: &str) -> Result<(), String> {
    if expression.trim().is_empty() {
        return Err("Expression cannot be empty".into());
    }

    let mut depth = 0i32;
    let mut in_text = false;
    for c in expression.chars() {
        match c {
            '\'' => in_text = !in_text,
            '(' if !in_text => depth += 1,
            ')' if !in_text => {
                depth -= 1;
                if depth < 0 {
                    return Err("Unexpected ')'".into());
                }
            }
            _ => {}
        }
    }

    if in_text {
        return Err("Unterminated text value".into());
    }
    if depth != 0 {
        return Err("Unbalanced parentheses".into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("width").is_ok());
        assert!(is_valid_name("_hidden").is_ok());
        assert!(is_valid_name("d1").is_ok());
        assert!(is_valid_name("Wall_Thickness").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(is_valid_name("").is_err());
        assert!(is_valid_name("1width").is_err());
        assert!(is_valid_name("has space").is_err());
        assert!(is_valid_name("has-dash").is_err());
        assert!(is_valid_name("ns.name").is_err());
        assert!(is_valid_name(" width").is_err()); // no trimming, names match exactly
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_valid_name("sin").is_err());
        assert!(is_valid_name("SQRT").is_err());
        assert!(is_valid_name("PI").is_err());
        let err = is_valid_name("cos").unwrap_err();
        assert!(err.contains("built-in"), "Error should mention built-in: {}", err);
        // Prefixes are fine
        assert!(is_valid_name("sine_wave").is_ok());
    }

    #[test]
    fn test_check_expression() {
        assert!(check_expression("10 mm").is_ok());
        assert!(check_expression("width * 2 + (depth / 3)").is_ok());
        assert!(check_expression("'text (unbalanced inside quotes'").is_ok());
        assert!(check_expression("").is_err());
        assert!(check_expression("   ").is_err());
        assert!(check_expression("(1 + 2").is_err());
        assert!(check_expression("1 + 2)").is_err());
        assert!(check_expression(")(").is_err());
        assert!(check_expression("'open").is_err());
    }

    #[test]
    fn test_has_values_treats_missing_unit_as_empty() {
        let p = Parameter::new("count", "4").with_comment("c");
        assert!(p.has_values("", "4", "c"));
        assert!(!p.has_values("mm", "4", "c"));

        let p = Parameter::new("width", "10 mm").with_unit("mm");
        assert_eq!(p.unit(), Some("mm"));
        assert!(!p.has_values("mm", "10 mm", " "));
    }

    #[test]
    fn test_serde_omits_missing_unit() {
        let p = Parameter::new("count", "4");
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("unit"));
        let back: Parameter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
