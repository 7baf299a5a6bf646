//! The looper engine: state machine and per-sample capture/mix loop.
//!
//! One instance owns the [`StorageArena`], [`DubLedger`], and
//! [`LoopTransport`]. The host applies debounced [`Command`]s between
//! blocks and calls [`Looper::process_block`] once per block; everything
//! happens on that single thread with no allocation and no blocking.
//!
//! ## Take lifecycle
//!
//! A take opens in `WaitingForThreshold` with a reserved pending record
//! (arena offset at the current write cursor). The first sample whose
//! amplitude meets the threshold pins the take's loop start index and moves
//! to `Recording`; every recorded sample appends to the arena. Finishing a
//! take fades its stored edges and commits it to the ledger — or abandons
//! it if nothing was captured. The pending record lives outside the ledger,
//! so an uncommitted take never plays and undo/redo cannot disturb it.

use crate::arena::StorageArena;
use crate::command::Command;
use crate::config::LooperConfig;
use crate::dub::{DubLedger, DubTrack};
use crate::math::threshold_db_to_linear;
use crate::param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
use crate::transport::LoopTransport;

/// Engine state, advanced by commands and by the audio loop itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooperState {
    /// No active layer, nothing armed. Initial state; reachable again via
    /// reset or by undoing the sole remaining layer.
    Inactive,
    /// A take is armed but input has not yet met the record threshold.
    WaitingForThreshold,
    /// A take is capturing audio into the arena.
    Recording,
    /// Active layers are looping; no take is open.
    Playing,
}

/// A take in progress, not yet committed to the ledger.
#[derive(Debug, Clone, Copy)]
struct PendingTake {
    storage_offset: usize,
    start_index: usize,
    length: usize,
}

/// Real-time multi-layer looper.
///
/// # Example
///
/// ```rust
/// use ostinato_core::{Command, Looper, LooperConfig, LooperState};
///
/// let config = LooperConfig { max_dubs: 4, max_record_secs: 1.0, ..LooperConfig::default() };
/// let mut looper = Looper::with_config(48000.0, config);
/// looper.set_dry_level(0.0);
///
/// looper.apply(Command::Toggle);
/// let input = [0.5f32; 512];
/// let mut out_l = [0.0f32; 512];
/// let mut out_r = [0.0f32; 512];
/// looper.process_block(&input, &input, &mut out_l, &mut out_r);
/// looper.apply(Command::Toggle);
///
/// assert_eq!(looper.state(), LooperState::Playing);
/// assert_eq!(looper.loop_length(), 512);
/// ```
#[derive(Debug, Clone)]
pub struct Looper {
    state: LooperState,
    arena: StorageArena,
    ledger: DubLedger,
    transport: LoopTransport,
    pending: Option<PendingTake>,
    /// Record threshold in dB; converted to linear once per block.
    threshold_db: f32,
    /// Gain applied to the live input passed through to the output.
    dry_level: f32,
}

impl Looper {
    /// Creates a looper with the default (full pedal) capacity.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_config(sample_rate, LooperConfig::default())
    }

    /// Creates a looper with explicit capacity configuration.
    ///
    /// All storage is allocated here; the audio path never allocates.
    pub fn with_config(sample_rate: f32, config: LooperConfig) -> Self {
        Self {
            state: LooperState::Inactive,
            arena: StorageArena::new(config.arena_capacity(sample_rate)),
            ledger: DubLedger::new(config.max_dubs),
            transport: LoopTransport::new(),
            pending: None,
            threshold_db: crate::math::THRESHOLD_FLOOR_DB,
            dry_level: 1.0,
        }
    }

    /// Sets the record threshold in decibels. At or below −90 dB the
    /// threshold is disabled and recording starts on the first sample.
    pub fn set_threshold_db(&mut self, db: f32) {
        self.threshold_db = db;
    }

    /// Current record threshold in decibels.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Sets the dry (live input) gain, clamped to \[0.0, 1.0\].
    /// 0 means only looped audio reaches the output.
    pub fn set_dry_level(&mut self, level: f32) {
        self.dry_level = level.clamp(0.0, 1.0);
    }

    /// Current dry gain.
    pub fn dry_level(&self) -> f32 {
        self.dry_level
    }

    /// Current engine state.
    pub fn state(&self) -> LooperState {
        self.state
    }

    /// Samples in one loop cycle; 0 until the first take commits.
    pub fn loop_length(&self) -> usize {
        self.transport.loop_length()
    }

    /// Current position within the loop.
    pub fn loop_position(&self) -> usize {
        self.transport.position()
    }

    /// Number of layers currently playing.
    pub fn active_dubs(&self) -> usize {
        self.ledger.active_count()
    }

    /// True when an undone layer can be reactivated.
    pub fn can_redo(&self) -> bool {
        self.ledger.can_redo()
    }

    /// Arena samples claimed by committed and in-progress takes.
    pub fn storage_used(&self) -> usize {
        self.arena.used()
    }

    /// Arena capacity in samples per channel.
    pub fn storage_capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// True while a take is open (armed or capturing).
    fn take_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies one command. Commands whose preconditions fail are silently
    /// ignored; state never partially mutates.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Toggle => {
                if self.take_open() {
                    self.finish_take();
                } else {
                    self.begin_take();
                }
            }
            Command::Overdub => {
                if self.take_open() {
                    self.finish_take();
                }
                self.begin_take();
            }
            Command::Undo => {
                // Finishing first makes a partially-recorded take eligible
                // for redo after the undo.
                if self.take_open() {
                    self.finish_take();
                }
                if let Some(track) = self.ledger.undo() {
                    self.arena.rewind_to(track.storage_offset);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        active = self.ledger.active_count(),
                        "undo: deactivated dub at offset {}",
                        track.storage_offset
                    );
                    if self.ledger.active_count() == 0 {
                        // Like a reset, but the ledger keeps redo history.
                        self.transport.clear();
                        self.state = LooperState::Inactive;
                    }
                }
            }
            Command::Redo => {
                // Redo history refers to storage above the write cursor;
                // an open take is about to overwrite that range.
                if self.take_open() {
                    return;
                }
                if let Some(track) = self.ledger.redo() {
                    self.arena.restore_to(track.storage_end());
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        active = self.ledger.active_count(),
                        "redo: reactivated dub at offset {}",
                        track.storage_offset
                    );
                    if self.ledger.active_count() == 1 {
                        // First layer back: playback restarts from the top.
                        self.transport.set_length(track.length);
                        self.state = LooperState::Playing;
                    }
                }
            }
            Command::Reset => {
                self.ledger.clear();
                self.arena.clear();
                self.transport.clear();
                self.pending = None;
                self.state = LooperState::Inactive;
                #[cfg(feature = "tracing")]
                tracing::debug!("reset: all layers released");
            }
        }
    }

    /// Opens a new take if the ledger and arena have room.
    fn begin_take(&mut self) {
        if self.ledger.is_full() || self.arena.is_exhausted() {
            return;
        }
        self.pending = Some(PendingTake {
            storage_offset: self.arena.used(),
            start_index: self.transport.position(),
            length: 0,
        });
        self.state = LooperState::WaitingForThreshold;
        #[cfg(feature = "tracing")]
        tracing::trace!(offset = self.arena.used(), "take armed");
    }

    /// Closes the open take: commits it if audio was captured, abandons it
    /// otherwise.
    fn finish_take(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        if pending.length == 0 {
            // Threshold never crossed; the reservation simply lapses.
            self.state = if self.ledger.active_count() > 0 {
                LooperState::Playing
            } else {
                LooperState::Inactive
            };
            return;
        }

        self.arena.fade_edges(pending.storage_offset, pending.length);

        if self.ledger.active_count() == 0 {
            // The first layer governs the loop length for all that follow.
            self.transport.set_length(pending.length);
        }
        self.ledger.commit(DubTrack {
            storage_offset: pending.storage_offset,
            length: pending.length,
            start_index: pending.start_index,
        });
        self.state = LooperState::Playing;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            active = self.ledger.active_count(),
            length = pending.length,
            "take committed"
        );
    }

    /// Processes one block of stereo audio.
    ///
    /// Parameters are read once at block start and held constant through
    /// the block. Output is `dry_level * input` plus the sum of every
    /// active layer whose window contains the current loop position.
    ///
    /// All four slices must have the same length.
    pub fn process_block(
        &mut self,
        in_left: &[f32],
        in_right: &[f32],
        out_left: &mut [f32],
        out_right: &mut [f32],
    ) {
        debug_assert_eq!(in_left.len(), in_right.len());
        debug_assert_eq!(in_left.len(), out_left.len());
        debug_assert_eq!(in_left.len(), out_right.len());

        let threshold = threshold_db_to_linear(self.threshold_db);
        let dry = self.dry_level;

        if self.state == LooperState::Inactive {
            for i in 0..in_left.len() {
                out_left[i] = dry * in_left[i];
                out_right[i] = dry * in_right[i];
            }
            return;
        }

        for i in 0..in_left.len() {
            let left = in_left[i];
            let right = in_right[i];

            // Threshold gating: the first qualifying sample pins the
            // take's start within the loop and starts capture.
            if self.state == LooperState::WaitingForThreshold
                && left.abs().max(right.abs()) >= threshold
            {
                if let Some(pending) = &mut self.pending {
                    pending.start_index = self.transport.position();
                }
                self.state = LooperState::Recording;
            }

            // Capture.
            if self.state == LooperState::Recording
                && let Some(pending) = &mut self.pending
                && self.arena.append(left, right)
            {
                pending.length += 1;
            }

            // Mix: dry input plus every active layer audible here.
            let position = self.transport.position();
            let mut mix_left = dry * left;
            let mut mix_right = dry * right;
            for track in self.ledger.active_tracks() {
                if track.contains(position) {
                    let (l, r) = self.arena.sample(track.sample_index(position));
                    mix_left += l;
                    mix_right += r;
                }
            }
            out_left[i] = mix_left;
            out_right[i] = mix_right;

            // Loop advance. The position only moves once a layer is
            // playing; the first take discovers the length instead.
            if self.ledger.active_count() > 0 {
                self.transport.advance();
            }
            let exhausted_mid_take =
                self.state == LooperState::Recording && self.arena.is_exhausted();
            if self.transport.past_end() || exhausted_mid_take {
                self.transport.rewind();
                if self.state == LooperState::Recording {
                    // The cycle boundary ends the take. If this was an
                    // overdub (not the governing first layer), chain
                    // straight into a new take so overdubbing continues
                    // across the wrap without a fresh command.
                    self.finish_take();
                    if self.ledger.active_count() > 1 {
                        self.begin_take();
                    }
                }
            }
        }
    }
}

impl ParameterInfo for Looper {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor {
                name: "Threshold",
                short_name: "Thresh",
                unit: ParamUnit::Decibels,
                min: -90.0,
                max: 0.0,
                default: -90.0,
                step: 1.0,
            }),
            1 => Some(ParamDescriptor {
                name: "Dry Level",
                short_name: "Dry",
                unit: ParamUnit::Linear,
                min: 0.0,
                max: 1.0,
                default: 1.0,
                step: 0.01,
            }),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.threshold_db,
            1 => self.dry_level,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_threshold_db(value.clamp(-90.0, 0.0)),
            1 => self.set_dry_level(value),
            _ => {}
        }
    }
}
