#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Allowed discrete x selections.
pub const X_VALUES: [f64; 8] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];

/// Allowed discrete r selections.
pub const R_VALUES: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Inclusive y range.
pub const Y_MIN: f64 = -5.0;
pub const Y_MAX: f64 = 5.0;

/// Absolute tolerance when matching a value against a discrete selection.
/// Submitted values travel as decimal strings, so anything this close to
/// an allowed value is that value.
const DISCRETE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidateError {
    #[error("x must be one of -3, -2, -1, 0, 1, 2, 3, 4 (got {0})")]
    XNotAllowed(f64),
    #[error("y must be a finite number in [-5, 5] (got {0})")]
    YOutOfRange(f64),
    #[error("r must be one of 1, 2, 3, 4, 5 (got {0})")]
    RNotAllowed(f64),
}

/// A coordinate triple as submitted by a client, before domain validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Check the triple against the input domain.
    ///
    /// # Errors
    ///
    /// Returns the first failed constraint, checked in x, y, r order.
    /// NaN fails every constraint.
    pub fn validate(&self) -> Result<(), ValidateError> {
        if !matches_allowed(self.x, &X_VALUES) {
            return Err(ValidateError::XNotAllowed(self.x));
        }
        if !self.y.is_finite() || self.y < Y_MIN || self.y > Y_MAX {
            return Err(ValidateError::YOutOfRange(self.y));
        }
        if !matches_allowed(self.r, &R_VALUES) {
            return Err(ValidateError::RNotAllowed(self.r));
        }
        Ok(())
    }
}

fn matches_allowed(value: f64, allowed: &[f64]) -> bool {
    allowed
        .iter()
        .any(|candidate| (value - candidate).abs() < DISCRETE_TOLERANCE)
}
