//! Error types for channel and flow-law calculations.

use rn_core::error::RnError;
use thiserror::Error;

/// Errors that can occur while building channels or evaluating flow laws.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ChannelResult<T> = Result<T, ChannelError>;

impl From<ChannelError> for RnError {
    fn from(e: ChannelError) -> Self {
        match e {
            ChannelError::NonPhysical { what } => RnError::InvalidArg { what },
            ChannelError::InvalidArg { what } => RnError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ChannelError::NonPhysical { what: "width" };
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn error_conversion() {
        let err: RnError = ChannelError::InvalidArg { what: "test" }.into();
        assert!(matches!(err, RnError::InvalidArg { what: "test" }));
    }
}
