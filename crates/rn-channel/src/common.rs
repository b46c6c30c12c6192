//! Common utilities for channel calculations.

use crate::error::{ChannelError, ChannelResult};
use rn_core::RnError;
use rn_core::numeric::{ensure_finite, ensure_non_negative};

/// Manning roughness used when a shape is built without an explicit one (s/m^(1/3)).
pub const DEFAULT_NMANNING: f64 = 0.035;

/// Ensure a value is finite, returning ChannelError if not.
pub fn check_finite(value: f64, what: &'static str) -> ChannelResult<()> {
    ensure_finite(value, what).map_err(|_| ChannelError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ChannelResult<()> {
    check_non_negative(value, what)?;
    if value == 0.0 {
        return Err(ChannelError::InvalidArg { what });
    }
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ChannelResult<()> {
    ensure_non_negative(value, what).map_err(|e| match e {
        RnError::NonFinite { .. } => ChannelError::NonPhysical { what },
        _ => ChannelError::InvalidArg { what },
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_positive() {
        assert!(check_positive(0.1, "w").is_ok());
        assert_eq!(
            check_positive(0.0, "w"),
            Err(ChannelError::InvalidArg { what: "w" })
        );
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative(0.0, "l").is_ok());
        assert_eq!(
            check_non_negative(-1e-9, "l"),
            Err(ChannelError::InvalidArg { what: "l" })
        );
        assert_eq!(
            check_non_negative(f64::NAN, "l"),
            Err(ChannelError::NonPhysical { what: "l" })
        );
    }
}
