//! Engine error types.

/// Errors raised by caller-side guards around engine divisions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A denominator supplied by the caller was zero, negative, or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveDenominator {
        /// Name of the offending quantity.
        name: &'static str,
        /// Value that was supplied.
        value: f64,
    },
}

/// Returns `value` when it is usable as a denominator.
///
/// # Errors
///
/// Returns [`EngineError::NonPositiveDenominator`] when `value` is zero,
/// negative, or not finite.
pub fn positive_denominator(name: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::NonPositiveDenominator { name, value })
    }
}
