use novade_core::error::CoreError;
use thiserror::Error;

use crate::device::OutputId;
use crate::registry::OutputHandle;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("No output device behind handle {handle}")]
    OutputNotFound { handle: OutputHandle },
    #[error("Display server reported an event for unknown output {output_id}")]
    UnknownOutput { output_id: OutputId },
    #[error("Output enumeration failed: {0}")]
    Enumeration(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use novade_core::error::ConfigError;

    #[test]
    fn test_unknown_output_message() {
        let err = DisplayError::UnknownOutput { output_id: OutputId::new(7) };
        assert_eq!(err.to_string(), "Display server reported an event for unknown output 7");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: DisplayError = CoreError::Config(ConfigError::ValidationError("x".to_string())).into();
        assert_eq!(err.to_string(), "Configuration Error: Configuration validation failed: x");
    }
}
