//! Error types and handling
//!
//! Generation is an offline batch job, so the taxonomy is narrow: configuration
//! problems, modeling defects that broke an invariant, exhausted identifier
//! space, and I/O while writing the output.

use thiserror::Error;

use crate::events::incident_number::IdentifierError;
use crate::types::{ConfigError, ConfigValidationError, WeightTableError};

/// Errors that can occur during generation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A modeling invariant was broken; the entity graph is inconsistent
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// An identifier counter no longer fits its encoded width
    #[error("Identifier space exhausted: {0}")]
    IdentifierExhausted(#[from] IdentifierError),

    /// A weight table attached to an enumeration is malformed
    #[error("Weight table error: {0}")]
    WeightTable(#[from] WeightTableError),

    /// The document rendering collaborator failed
    #[error("Document rendering failed: {0}")]
    RenderingError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<anyhow::Error> for SimulationError {
    fn from(error: anyhow::Error) -> Self {
        SimulationError::RenderingError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invariant violation
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a rendering error
    pub fn rendering_error(msg: impl Into<String>) -> Self {
        Self::RenderingError(msg.into())
    }

    /// True for errors that indicate a defect in the generator itself rather than
    /// bad input or a failing environment
    pub fn is_modeling_defect(&self) -> bool {
        matches!(
            self,
            SimulationError::InvariantViolation(_)
                | SimulationError::IdentifierExhausted(_)
                | SimulationError::WeightTable(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvariantViolation(_) => "Invariant",
            SimulationError::IdentifierExhausted(_) => "Identifier",
            SimulationError::WeightTable(_) => "Weight Table",
            SimulationError::RenderingError(_) => "Rendering",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("Invalid config");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");

        let violation = SimulationError::invariant_violation("bed double-booked");
        assert_eq!(violation.to_string(), "Invariant violation: bed double-booked");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert!(!sim_error.is_modeling_defect());
    }

    #[test]
    fn test_identifier_error_is_defect() {
        let error: SimulationError =
            IdentifierError::WidthOverflow { field: "sequence", value: 1_679_616, width: 4 }.into();
        assert!(error.is_modeling_defect());
        assert_eq!(error.category(), "Identifier");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::configuration_error("x").category(), "Configuration");
        assert_eq!(SimulationError::invariant_violation("x").category(), "Invariant");
        assert_eq!(SimulationError::rendering_error("x").category(), "Rendering");
    }
}
