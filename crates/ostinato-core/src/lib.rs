//! Ostinato Core - real-time multi-layer looper engine
//!
//! This crate implements the audio engine of a stereo pedalboard looper:
//! record a phrase, layer overdubs on top of it, and undo or redo layers
//! without glitches. All storage is allocated up front; the audio path is
//! real-time safe with zero allocation and no locks.
//!
//! # Core Abstractions
//!
//! - [`Looper`] - The engine: state machine, capture, and mixing
//! - [`Command`] - Discrete control events applied between blocks
//! - [`LooperConfig`] - Capacity configuration (dub slots, record time)
//! - [`StorageArena`] - Pre-allocated append-only stereo sample storage
//! - [`DubLedger`] / [`DubTrack`] - Layer records with O(1) undo/redo
//! - [`LoopTransport`] - The shared loop length and position cursor
//! - [`ParameterInfo`] - Host-facing parameter introspection
//!
//! # Example
//!
//! ```rust
//! use ostinato_core::{Command, Looper, LooperConfig, LooperState};
//!
//! let config = LooperConfig { max_dubs: 8, max_record_secs: 2.0, ..LooperConfig::default() };
//! let mut looper = Looper::with_config(48000.0, config);
//!
//! // Footswitch pressed: arm a take.
//! looper.apply(Command::Toggle);
//!
//! let input = vec![0.25f32; 512];
//! let mut out_l = vec![0.0f32; 512];
//! let mut out_r = vec![0.0f32; 512];
//! looper.process_block(&input, &input, &mut out_l, &mut out_r);
//!
//! // Footswitch pressed again: the take becomes the first loop layer.
//! looper.apply(Command::Toggle);
//! assert_eq!(looper.state(), LooperState::Playing);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ostinato-core = { version = "0.1", default-features = false }
//! ```
//!
//! Allocation is still required (the arena is heap-backed), but only at
//! construction time.
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations or locks in the audio path
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Single-threaded core**: The host serializes commands and audio
//! - **Silent rejection**: Impossible commands are ignored, never errors

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod arena;
pub mod command;
pub mod config;
pub mod dub;
pub mod engine;
pub mod math;
pub mod param_info;
pub mod transport;

// Re-export main types at crate root
pub use arena::{EDGE_FADE_SAMPLES, StorageArena};
pub use command::Command;
pub use config::LooperConfig;
pub use dub::{DubLedger, DubTrack};
pub use engine::{Looper, LooperState};
pub use math::{THRESHOLD_FLOOR_DB, db_to_linear, linear_to_db, threshold_db_to_linear};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use transport::LoopTransport;
