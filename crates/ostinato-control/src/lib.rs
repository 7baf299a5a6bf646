//! Ostinato Control - footswitch and control surface handling
//!
//! This crate sits between raw switch hardware (or a host UI) and the
//! looper engine. It owns the timing-sensitive parts of control: edge
//! detection, double-press recognition, and the mapping from switch
//! gestures to [`Command`]s.
//!
//! # Core Abstractions
//!
//! - [`Footswitch`] - Edge detection and double-press timing for one switch
//! - [`PedalSurface`] - The five-switch pedal layout bound to commands
//! - [`SwitchFrame`] - One sampled snapshot of raw switch levels
//! - [`CommandQueue`] - Fixed-capacity queue drained between audio blocks
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible and allocation-free. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ostinato-control = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use ostinato_control::{CommandQueue, PedalSurface, Switch, SwitchFrame};
//!
//! let mut surface = PedalSurface::new();
//! let mut queue = CommandQueue::<8>::new();
//! let mut frame = SwitchFrame::new();
//!
//! // Once per audio block: sample the switches and poll.
//! frame.set(Switch::Activate, true);
//! surface.poll(&frame, 0.0, &mut queue);
//!
//! // Drain the queue into the engine, then clear it.
//! for command in queue.iter() {
//!     // looper.apply(command);
//!     let _ = command;
//! }
//! queue.clear();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod footswitch;
pub mod surface;

// Re-export the engine's command type for convenience
pub use ostinato_core::Command;

// Re-export main types at crate root
pub use footswitch::{DOUBLE_PRESS_WINDOW_SECS, Footswitch, SwitchEvent};
pub use surface::{CommandQueue, PedalSurface, SWITCH_COUNT, Switch, SwitchFrame};
