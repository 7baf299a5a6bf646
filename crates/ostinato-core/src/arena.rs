//! Shared sample storage for all recorded layers.
//!
//! The arena is a pair of fixed-capacity channel buffers addressed by one
//! running write cursor. Every take appends at the cursor; undo rewinds the
//! cursor to the undone take's start, and redo advances it past a protected
//! range again. Nothing is ever zeroed or compacted — reclaimed audio stays
//! in memory until a later take physically overwrites it, which is what
//! makes undo/redo free of copying.
//!
//! The buffers are heap-allocated once at construction and never
//! reallocate; the audio path only indexes into them.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Length of the linear fade applied to both edges of a committed take.
///
/// Long enough to suppress the click where a layer's window starts or ends
/// mid-loop, short enough to be inaudible as an envelope.
pub const EDGE_FADE_SAMPLES: usize = 32;

/// Fixed-capacity stereo sample storage with a single write cursor.
#[derive(Debug, Clone)]
pub struct StorageArena {
    left: Vec<f32>,
    right: Vec<f32>,
    /// Samples consumed so far; rewound on undo, re-advanced on redo.
    used: usize,
}

impl StorageArena {
    /// Creates an arena holding `capacity` samples per channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Arena capacity must be > 0");

        Self {
            left: vec![0.0; capacity],
            right: vec![0.0; capacity],
            used: 0,
        }
    }

    /// Capacity in samples per channel.
    pub fn capacity(&self) -> usize {
        self.left.len()
    }

    /// Samples currently claimed by committed or in-progress takes.
    pub fn used(&self) -> usize {
        self.used
    }

    /// True when no further samples can be appended.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.left.len()
    }

    /// Appends one stereo sample at the write cursor.
    ///
    /// Returns `false` without writing if the arena is exhausted.
    #[inline]
    pub fn append(&mut self, left: f32, right: f32) -> bool {
        if self.used >= self.left.len() {
            return false;
        }
        self.left[self.used] = left;
        self.right[self.used] = right;
        self.used += 1;
        true
    }

    /// Reads the stereo sample at `index`.
    #[inline]
    pub fn sample(&self, index: usize) -> (f32, f32) {
        (self.left[index], self.right[index])
    }

    /// Rewinds the write cursor, reclaiming storage for overwrite.
    ///
    /// Used by undo: the range above `offset` becomes logically unreachable
    /// but keeps its contents, so a redo can reclaim it intact.
    pub fn rewind_to(&mut self, offset: usize) {
        debug_assert!(offset <= self.used);
        self.used = offset;
    }

    /// Advances the write cursor to `end`, protecting the range below it.
    ///
    /// Used by redo: a reactivated take's samples must not be overwritten
    /// by a future recording.
    pub fn restore_to(&mut self, end: usize) {
        debug_assert!(end >= self.used && end <= self.left.len());
        self.used = end;
    }

    /// Releases all storage. The samples themselves are left in place.
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Applies the boundary fade in place over a committed take's range.
    ///
    /// A linear ramp over `min(length, EDGE_FADE_SAMPLES)` samples at each
    /// edge, scaling from 0 toward 1 moving inward, so later playback of
    /// the take fades in and out at its window edges. On takes shorter
    /// than twice the fade length the two ramps overlap and compound.
    /// Runs once per take, never during mixing.
    pub fn fade_edges(&mut self, offset: usize, length: usize) {
        if length == 0 {
            return;
        }
        debug_assert!(offset + length <= self.used);

        let fade_len = length.min(EDGE_FADE_SAMPLES);
        let last = offset + length - 1;
        for i in 0..fade_len {
            let factor = i as f32 / fade_len as f32;
            self.left[offset + i] *= factor;
            self.right[offset + i] *= factor;
            self.left[last - i] *= factor;
            self.right[last - i] *= factor;
        }
    }
}
