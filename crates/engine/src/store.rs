//! In-memory parameter store
//!
//! Keeps parameters in insertion order with an exact-name index. Implements
//! [`ParameterHost`] with the same rejections a CAD host applies, so it serves
//! both as the design model behind file-backed documents and as a test fake.

use std::collections::HashMap;

use crate::host::{HostError, ParameterHost};
use crate::parameter::{check_expression, is_valid_name, Parameter};

/// Storage for the parameters of one design
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    params: Vec<Parameter>,
    /// name -> index into `params`
    index: HashMap<String, usize>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-existing parameters (e.g. loaded from disk).
    ///
    /// Names must be valid and unique. Empty comments are accepted here since
    /// they can come from parameters the host created on its own.
    pub fn from_parameters(params: Vec<Parameter>) -> Result<Self, HostError> {
        let mut store = Self::new();
        for param in params {
            if let Err(reason) = is_valid_name(&param.name) {
                return Err(HostError::InvalidName { name: param.name, reason });
            }
            if store.contains(&param.name) {
                return Err(HostError::DuplicateName(param.name));
            }
            store.push(param);
        }
        Ok(store)
    }

    fn push(&mut self, param: Parameter) {
        self.index.insert(param.name.clone(), self.params.len());
        self.params.push(param);
    }

    /// Get a parameter by exact name
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&i| &self.params[i])
    }

    /// Check if a name exists (exact match)
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn validate_values(name: &str, expression: &str, comment: &str) -> Result<(), HostError> {
    if let Err(reason) = check_expression(expression) {
        return Err(HostError::InvalidExpression {
            name: name.to_string(),
            expression: expression.to_string(),
            reason,
        });
    }
    if comment.is_empty() {
        return Err(HostError::EmptyComment(name.to_string()));
    }
    Ok(())
}

/// An empty unit string means "no unit".
fn unit_value(unit: &str) -> Option<String> {
    if unit.is_empty() {
        None
    } else {
        Some(unit.to_string())
    }
}

impl ParameterHost for ParameterStore {
    fn enumerate_parameters(&self) -> Vec<Parameter> {
        self.params.clone()
    }

    fn create_parameter(
        &mut self,
        name: &str,
        expression: &str,
        unit: &str,
        comment: &str,
    ) -> Result<(), HostError> {
        if self.contains(name) {
            return Err(HostError::DuplicateName(name.to_string()));
        }
        if let Err(reason) = is_valid_name(name) {
            return Err(HostError::InvalidName { name: name.to_string(), reason });
        }
        validate_values(name, expression, comment)?;

        self.push(Parameter {
            name: name.to_string(),
            unit: unit_value(unit),
            expression: expression.to_string(),
            comment: comment.to_string(),
        });
        Ok(())
    }

    fn update_parameter(
        &mut self,
        name: &str,
        unit: &str,
        expression: &str,
        comment: &str,
    ) -> Result<(), HostError> {
        let Some(&i) = self.index.get(name) else {
            return Err(HostError::NotFound(name.to_string()));
        };
        validate_values(name, expression, comment)?;

        let param = &mut self.params[i];
        param.unit = unit_value(unit);
        param.expression = expression.to_string();
        param.comment = comment.to_string();
        Ok(())
    }
}
