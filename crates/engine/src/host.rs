//! The host collaborator: whatever owns the design's parameters.
//!
//! Sync code never creates or destroys parameter objects itself; it asks the
//! host to create new parameters and to update existing ones by name.

use std::fmt;

use crate::parameter::Parameter;

/// Reasons a host refuses to create or update a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Create requested for a name that already exists.
    DuplicateName(String),
    /// Update requested for a name that does not exist.
    NotFound(String),
    /// Name fails validation.
    InvalidName { name: String, reason: String },
    /// Expression cannot be parsed.
    InvalidExpression { name: String, expression: String, reason: String },
    /// The host does not accept an empty comment string.
    EmptyComment(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "parameter '{name}' already exists"),
            Self::NotFound(name) => write!(f, "parameter '{name}' not found"),
            Self::InvalidName { name, reason } => {
                write!(f, "invalid parameter name '{name}': {reason}")
            }
            Self::InvalidExpression { name, expression, reason } => {
                write!(f, "parameter '{name}': cannot parse expression '{expression}': {reason}")
            }
            Self::EmptyComment(name) => {
                write!(f, "parameter '{name}': comment cannot be an empty string")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// Capability set the sync core needs from the host design.
pub trait ParameterHost {
    /// Current parameters, in host enumeration order.
    fn enumerate_parameters(&self) -> Vec<Parameter>;

    /// Add a new parameter. Fails if the name exists or the expression is unparsable.
    fn create_parameter(
        &mut self,
        name: &str,
        expression: &str,
        unit: &str,
        comment: &str,
    ) -> Result<(), HostError>;

    /// Replace unit, expression and comment of an existing parameter.
    /// Fails if the name does not exist or the expression is unparsable.
    fn update_parameter(
        &mut self,
        name: &str,
        unit: &str,
        expression: &str,
        comment: &str,
    ) -> Result<(), HostError>;
}
