//! Level conversions for the looper's continuous parameters.
//!
//! The record threshold arrives in decibels and is compared against sample
//! amplitudes, so it is converted to linear gain once per block. A floor
//! value of −90 dB maps to exactly 0.0, meaning "always record": any input,
//! including digital silence, crosses a zero threshold.

use libm::{expf, logf};

/// Threshold floor in decibels. At or below this value the threshold is
/// treated as disabled and recording starts on the first sample.
pub const THRESHOLD_FLOOR_DB: f32 = -90.0;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use ostinato_core::math::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert a record-threshold parameter in decibels to linear amplitude.
///
/// Values at or below [`THRESHOLD_FLOOR_DB`] return exactly 0.0 so that the
/// threshold comparison `|input| >= threshold` passes for every sample.
#[inline]
pub fn threshold_db_to_linear(db: f32) -> f32 {
    if db <= THRESHOLD_FLOOR_DB {
        0.0
    } else {
        db_to_linear(db)
    }
}
