use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., NaN).
    InvalidMass,
    /// Indicates a shape dimension that is not finite and strictly positive.
    InvalidDimension(String),
    /// Indicates an invalid time value (e.g., negative or non-finite timestep).
    InvalidTime,
    /// Indicates an invalid coefficient value (e.g., restitution outside [0, 1]).
    InvalidCoefficient,
    /// Indicates a simulation configuration that cannot be used.
    InvalidConfiguration(String),
    /// Indicates a body index that does not refer to a body in the world.
    BodyIndexOutOfRange { index: usize, count: usize },
    /// Indicates a constraint that joins a body to itself.
    InvalidConstraint,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidDimension(what) => write!(f, "Invalid shape dimension: {}", what),
            PhysicsError::InvalidTime => write!(f, "Invalid time value"),
            PhysicsError::InvalidCoefficient => write!(f, "Invalid coefficient value"),
            PhysicsError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            PhysicsError::BodyIndexOutOfRange { index, count } => {
                write!(f, "Body index {} out of range (body count {})", index, count)
            }
            PhysicsError::InvalidConstraint => write!(f, "Constraint must join two distinct bodies"),
        }
    }
}

impl Error for PhysicsError {}
