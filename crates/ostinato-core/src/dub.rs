//! Dub layer records and the undo/redo ledger.
//!
//! A [`DubTrack`] is a lightweight description of one recorded layer: where
//! its audio lives in the arena and where it sits within the master loop.
//! The [`DubLedger`] holds a fixed-capacity slot array of tracks plus two
//! counters, which together give O(1) undo/redo without moving or copying
//! any audio: undo decrements the active count, redo re-advances it, and a
//! fresh recording collapses the redo horizon.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// One recorded layer's placement in storage and in the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DubTrack {
    /// Index into the arena where this track's samples begin. Immutable
    /// once recording starts.
    pub storage_offset: usize,
    /// Number of samples recorded. Frozen when the take finishes.
    pub length: usize,
    /// Loop position at which this track's audio begins playing, set at
    /// the moment the record threshold was crossed. Silence before the
    /// trigger costs neither storage nor playback range.
    pub start_index: usize,
}

impl DubTrack {
    /// True if the track is audible at the given loop position.
    #[inline]
    pub fn contains(&self, loop_position: usize) -> bool {
        loop_position >= self.start_index && loop_position < self.start_index + self.length
    }

    /// Arena index of the sample to play at `loop_position`.
    ///
    /// Only meaningful when [`contains`](Self::contains) is true.
    #[inline]
    pub fn sample_index(&self, loop_position: usize) -> usize {
        self.storage_offset + (loop_position - self.start_index)
    }

    /// One past the last arena index claimed by this track.
    #[inline]
    pub fn storage_end(&self) -> usize {
        self.storage_offset + self.length
    }
}

/// Fixed-capacity ordered collection of dub tracks with undo/redo counters.
///
/// `active` counts the slots currently contributing to playback; `recorded`
/// is the highest active count reachable via redo. The slots above `active`
/// but below `recorded` hold undone tracks whose audio is still intact in
/// the arena. Committing a new track collapses `recorded` to the new active
/// count, permanently invalidating that history.
///
/// Invariant: `active <= recorded <= capacity`.
#[derive(Debug, Clone)]
pub struct DubLedger {
    slots: Vec<DubTrack>,
    active: usize,
    recorded: usize,
}

impl DubLedger {
    /// Creates a ledger with `max_dubs` slots, all inactive.
    ///
    /// # Panics
    ///
    /// Panics if `max_dubs` is 0.
    pub fn new(max_dubs: usize) -> Self {
        assert!(max_dubs > 0, "Ledger capacity must be > 0");

        Self {
            slots: vec![DubTrack::default(); max_dubs],
            active: 0,
            recorded: 0,
        }
    }

    /// Maximum number of simultaneously active tracks.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of tracks currently contributing to playback.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Highest active count reachable via redo.
    pub fn recorded_count(&self) -> usize {
        self.recorded
    }

    /// True when no further track can be committed.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.active >= self.slots.len()
    }

    /// True when an undone track is available for reactivation.
    #[inline]
    pub fn can_redo(&self) -> bool {
        self.active < self.recorded
    }

    /// The tracks currently contributing to playback, oldest first.
    #[inline]
    pub fn active_tracks(&self) -> &[DubTrack] {
        &self.slots[..self.active]
    }

    /// Commits a finished take into the next slot.
    ///
    /// Collapses the redo horizon: any previously undone tracks above this
    /// slot can no longer be redone (their storage may now be overwritten).
    pub fn commit(&mut self, track: DubTrack) {
        debug_assert!(!self.is_full());
        self.slots[self.active] = track;
        self.active += 1;
        self.recorded = self.active;
    }

    /// Deactivates the newest active track, returning it.
    ///
    /// The slot keeps its contents so the track can be redone.
    pub fn undo(&mut self) -> Option<DubTrack> {
        if self.active == 0 {
            return None;
        }
        self.active -= 1;
        Some(self.slots[self.active])
    }

    /// Reactivates the next undone track, returning it.
    pub fn redo(&mut self) -> Option<DubTrack> {
        if !self.can_redo() {
            return None;
        }
        let track = self.slots[self.active];
        self.active += 1;
        Some(track)
    }

    /// Deactivates everything and discards redo history.
    pub fn clear(&mut self) {
        self.active = 0;
        self.recorded = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(offset: usize, length: usize) -> DubTrack {
        DubTrack {
            storage_offset: offset,
            length,
            start_index: 0,
        }
    }

    #[test]
    fn test_track_window() {
        let t = DubTrack {
            storage_offset: 100,
            length: 50,
            start_index: 10,
        };
        assert!(!t.contains(9));
        assert!(t.contains(10));
        assert!(t.contains(59));
        assert!(!t.contains(60));
        assert_eq!(t.sample_index(10), 100);
        assert_eq!(t.sample_index(59), 149);
        assert_eq!(t.storage_end(), 150);
    }

    #[test]
    fn test_commit_and_active_tracks() {
        let mut ledger = DubLedger::new(4);
        ledger.commit(track(0, 100));
        ledger.commit(track(100, 50));
        assert_eq!(ledger.active_count(), 2);
        assert_eq!(ledger.active_tracks().len(), 2);
        assert_eq!(ledger.active_tracks()[1], track(100, 50));
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut ledger = DubLedger::new(4);
        ledger.commit(track(0, 100));
        ledger.commit(track(100, 50));

        let undone = ledger.undo().unwrap();
        assert_eq!(undone, track(100, 50));
        assert_eq!(ledger.active_count(), 1);
        assert!(ledger.can_redo());

        let redone = ledger.redo().unwrap();
        assert_eq!(redone, track(100, 50));
        assert_eq!(ledger.active_count(), 2);
        assert!(!ledger.can_redo());
    }

    #[test]
    fn test_undo_empty_is_none() {
        let mut ledger = DubLedger::new(4);
        assert!(ledger.undo().is_none());
        assert!(ledger.redo().is_none());
    }

    #[test]
    fn test_commit_collapses_redo_horizon() {
        let mut ledger = DubLedger::new(4);
        ledger.commit(track(0, 100));
        ledger.commit(track(100, 50));
        ledger.undo();
        assert!(ledger.can_redo());

        // A new recording invalidates the undone track forever.
        ledger.commit(track(100, 80));
        assert!(!ledger.can_redo());
        assert_eq!(ledger.recorded_count(), 2);
        assert_eq!(ledger.active_tracks()[1], track(100, 80));
    }

    #[test]
    fn test_full_ledger() {
        let mut ledger = DubLedger::new(2);
        ledger.commit(track(0, 10));
        ledger.commit(track(10, 10));
        assert!(ledger.is_full());
    }

    #[test]
    fn test_clear_discards_history() {
        let mut ledger = DubLedger::new(4);
        ledger.commit(track(0, 10));
        ledger.undo();
        assert!(ledger.can_redo());
        ledger.clear();
        assert!(!ledger.can_redo());
        assert_eq!(ledger.active_count(), 0);
        assert_eq!(ledger.recorded_count(), 0);
    }

    #[test]
    fn test_invariant_active_le_recorded() {
        let mut ledger = DubLedger::new(8);
        for i in 0..5 {
            ledger.commit(track(i * 10, 10));
        }
        ledger.undo();
        ledger.undo();
        assert!(ledger.active_count() <= ledger.recorded_count());
        assert_eq!(ledger.active_count(), 3);
        assert_eq!(ledger.recorded_count(), 5);
    }
}
