use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A physical parameter is outside its valid range (e.g. a body with non-positive mass).
    InvalidParameter { parameter: &'static str, value: f64 },
}

impl PhysicsError {
    pub(crate) fn invalid(parameter: &'static str, value: f64) -> Self {
        Self::InvalidParameter { parameter, value }
    }
}

impl Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { parameter, value } => {
                write!(f, "invalid parameter `{}`: {}", parameter, value)
            }
        }
    }
}

impl Error for PhysicsError {}
