use crate::RnError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RnError::NonFinite { what, value: v })
    }
}

/// Like [`ensure_finite`], additionally rejecting negative values.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, RnError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(RnError::InvalidArg { what });
    }
    Ok(v)
}
