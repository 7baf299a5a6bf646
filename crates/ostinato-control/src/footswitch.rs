//! Momentary footswitch edge detection with double-press timing.
//!
//! Hosts hand the raw switch level to [`Footswitch::update`] once per poll;
//! the switch turns level changes into discrete [`SwitchEvent`]s and flags
//! a press as a double press when it lands within
//! [`DOUBLE_PRESS_WINDOW_SECS`] of the previous one.

/// Two presses closer together than this count as a double press.
pub const DOUBLE_PRESS_WINDOW_SECS: f64 = 1.0;

/// A press or release edge produced by [`Footswitch::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchEvent {
    /// True for a press edge, false for a release edge.
    pub pressed: bool,
    /// For release edges, how long the switch was held. 0 on press edges.
    pub held_secs: f64,
    /// True on a press edge that follows the previous press within the
    /// double-press window.
    pub double_press: bool,
}

/// Edge detector for one momentary footswitch.
///
/// Holds no queue: at most one event is produced per level change, and the
/// caller decides what each edge means.
#[derive(Debug, Clone, Copy)]
pub struct Footswitch {
    held: bool,
    press_time: f64,
    last_press_time: f64,
}

impl Footswitch {
    /// Creates a released footswitch with no press history.
    pub fn new() -> Self {
        Self {
            held: false,
            press_time: 0.0,
            // Far enough in the past that the first press is never a double.
            last_press_time: f64::NEG_INFINITY,
        }
    }

    /// True while the switch is held down.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Feeds the current switch level, returning an event on a level change.
    ///
    /// `now_secs` is a monotonically increasing host clock; only differences
    /// between calls matter.
    pub fn update(&mut self, pressed: bool, now_secs: f64) -> Option<SwitchEvent> {
        if pressed == self.held {
            return None;
        }
        self.held = pressed;

        if pressed {
            let double_press = now_secs - self.last_press_time < DOUBLE_PRESS_WINDOW_SECS;
            self.last_press_time = now_secs;
            self.press_time = now_secs;
            Some(SwitchEvent {
                pressed: true,
                held_secs: 0.0,
                double_press,
            })
        } else {
            Some(SwitchEvent {
                pressed: false,
                held_secs: now_secs - self.press_time,
                double_press: false,
            })
        }
    }
}

impl Default for Footswitch {
    fn default() -> Self {
        Self::new()
    }
}
