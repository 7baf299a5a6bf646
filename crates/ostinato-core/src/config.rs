//! Engine capacity configuration.
//!
//! Capacity limits are constructor parameters rather than constants so
//! the engine is testable at small scale: a 4-dub, 1-second looper
//! behaves identically to a full-size 128-dub, 360-second one.

/// Capacity configuration for a [`Looper`](crate::Looper).
///
/// All memory is allocated once at construction from these values; the
/// audio path never allocates.
///
/// # Example
///
/// ```rust
/// use ostinato_core::LooperConfig;
///
/// // Small instance for tests: 4 layers, 1 second of audio.
/// let config = LooperConfig {
///     max_dubs: 4,
///     max_record_secs: 1.0,
///     ..LooperConfig::default()
/// };
/// assert_eq!(config.arena_capacity(48000.0), 96_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LooperConfig {
    /// Maximum number of simultaneously active dub layers.
    pub max_dubs: usize,
    /// Advertised maximum total recording time across all dubs, in seconds.
    pub max_record_secs: f32,
    /// Storage multiplier applied on top of `max_record_secs`.
    ///
    /// 1.0 gives exactly `sample_rate * max_record_secs` samples per
    /// channel; the default of 2.0 leaves headroom so overdubs recorded
    /// over reclaimed ranges rarely hit the ceiling early.
    pub storage_headroom: f32,
}

impl LooperConfig {
    /// Arena capacity in samples per channel at the given sample rate.
    pub fn arena_capacity(&self, sample_rate: f32) -> usize {
        (sample_rate * self.max_record_secs * self.storage_headroom) as usize
    }
}

impl Default for LooperConfig {
    fn default() -> Self {
        Self {
            max_dubs: 128,
            max_record_secs: 360.0,
            storage_headroom: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = LooperConfig::default();
        // 48 kHz * 360 s * 2 headroom
        assert_eq!(config.arena_capacity(48000.0), 34_560_000);
    }

    #[test]
    fn test_unit_headroom() {
        let config = LooperConfig {
            max_dubs: 8,
            max_record_secs: 2.0,
            storage_headroom: 1.0,
        };
        assert_eq!(config.arena_capacity(44100.0), 88_200);
    }
}
