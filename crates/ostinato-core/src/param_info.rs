//! Parameter introspection for host and control-surface integration.
//!
//! Hosts discover and set the looper's continuous parameters by index via
//! [`ParameterInfo`]; each parameter carries a [`ParamDescriptor`] with the
//! metadata needed for display, validation, and normalized (0.0–1.0)
//! control mapping. Fully `no_std`, no allocation.

/// Unit of a parameter's plain value, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Dimensionless linear value.
    Linear,
    /// Decibels.
    Decibels,
    /// Seconds.
    Seconds,
}

/// Metadata describing one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Abbreviated name for small displays.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Default plain value.
    pub default: f32,
    /// Suggested step for stepped controls.
    pub step: f32,
}

impl ParamDescriptor {
    /// Maps a plain value into normalized \[0.0, 1.0\] space.
    pub fn normalize(&self, value: f32) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Maps a normalized \[0.0, 1.0\] value back to the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Clamps a plain value to the descriptor's range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Trait for components that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the instance. Out-of-range indices return `None`/0.0 and sets are
/// ignored.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the plain value of the parameter at `index`.
    fn set_param(&mut self, index: usize, value: f32);
}
