//! The closed set of commands the engine consumes.
//!
//! Debouncing, edge detection, and double-press timing are control-surface
//! concerns that live outside the engine; by the time a [`Command`] reaches
//! [`Looper::apply`](crate::Looper::apply) it is a clean, discrete event.
//! Commands whose preconditions fail (ledger full, arena exhausted, nothing
//! to undo or redo) are silently ignored — there is no error channel in the
//! real-time path.

/// A discrete command applied between audio blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new take, or finish the one in progress.
    Toggle,
    /// Finish any take in progress, then immediately start a new one
    /// (chained overdub).
    Overdub,
    /// Finish any take in progress, then deactivate the newest layer.
    /// Its audio stays intact for a later [`Command::Redo`].
    Undo,
    /// Reactivate the most recently undone layer. No-op while a take is
    /// open or when nothing is left to redo.
    Redo,
    /// Return to the initial empty state. Recorded audio becomes
    /// unreachable (and overwritable) but is not erased.
    Reset,
}
