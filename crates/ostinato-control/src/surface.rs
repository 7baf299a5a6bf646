//! The pedal's control surface: five footswitches mapped to engine
//! commands.
//!
//! [`PedalSurface::poll`] consumes one [`SwitchFrame`] of raw switch
//! levels per audio block, runs each level through its [`Footswitch`]
//! edge detector, and pushes the resulting [`Command`]s into a
//! fixed-capacity [`CommandQueue`] for the host to drain before the next
//! `process_block`. A double press on any command switch is the panic
//! gesture and maps to [`Command::Reset`].

use crate::footswitch::Footswitch;
use ostinato_core::Command;

/// Number of footswitches on the surface.
pub const SWITCH_COUNT: usize = 5;

/// The pedal's footswitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Start/stop takes. Double press resets.
    Activate,
    /// Deactivate the newest layer. Double press resets.
    Reset,
    /// Deactivate the newest layer.
    Undo,
    /// Reactivate the most recently undone layer.
    Redo,
    /// Chain overdubs. Double press resets.
    Dub,
}

impl Switch {
    /// All switches, in frame order.
    pub const ALL: [Switch; SWITCH_COUNT] = [
        Switch::Activate,
        Switch::Reset,
        Switch::Undo,
        Switch::Redo,
        Switch::Dub,
    ];

    /// Position of this switch within a [`SwitchFrame`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Raw switch levels sampled at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchFrame {
    states: [bool; SWITCH_COUNT],
}

impl SwitchFrame {
    /// A frame with every switch released.
    pub const fn new() -> Self {
        Self {
            states: [false; SWITCH_COUNT],
        }
    }

    /// Sets one switch level.
    #[inline]
    pub fn set(&mut self, switch: Switch, pressed: bool) {
        self.states[switch.index()] = pressed;
    }

    /// Reads one switch level.
    #[inline]
    pub fn is_pressed(&self, switch: Switch) -> bool {
        self.states[switch.index()]
    }
}

/// Fixed-capacity command queue filled during a poll and drained by the
/// host between audio blocks. Overflow drops the newest commands.
#[derive(Debug, Clone, Copy)]
pub struct CommandQueue<const N: usize> {
    commands: [Option<Command>; N],
    len: usize,
}

impl<const N: usize> CommandQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            commands: [None; N],
            len: 0,
        }
    }

    /// Number of queued commands.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is queued.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a command. Returns false (dropping it) when full.
    pub fn push(&mut self, command: Command) -> bool {
        if self.len >= N {
            return false;
        }
        self.commands[self.len] = Some(command);
        self.len += 1;
        true
    }

    /// The queued commands in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.commands[..self.len].iter().flatten().copied()
    }

    /// Empties the queue.
    pub fn clear(&mut self) {
        self.commands = [None; N];
        self.len = 0;
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounces the five footswitches and translates press edges into
/// commands.
///
/// # Example
///
/// ```rust
/// use ostinato_control::{CommandQueue, PedalSurface, Switch, SwitchFrame};
/// use ostinato_core::Command;
///
/// let mut surface = PedalSurface::new();
/// let mut queue = CommandQueue::<8>::new();
///
/// let mut frame = SwitchFrame::new();
/// frame.set(Switch::Activate, true);
/// surface.poll(&frame, 0.0, &mut queue);
///
/// assert_eq!(queue.iter().next(), Some(Command::Toggle));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PedalSurface {
    switches: [Footswitch; SWITCH_COUNT],
}

impl PedalSurface {
    /// Creates a surface with all switches released.
    pub fn new() -> Self {
        Self {
            switches: [Footswitch::new(); SWITCH_COUNT],
        }
    }

    /// Feeds one frame of switch levels, queuing a command per press edge.
    ///
    /// Release edges carry no binding. Commands that do not fit in the
    /// queue are dropped.
    pub fn poll<const N: usize>(
        &mut self,
        frame: &SwitchFrame,
        now_secs: f64,
        queue: &mut CommandQueue<N>,
    ) {
        for switch in Switch::ALL {
            let Some(event) =
                self.switches[switch.index()].update(frame.is_pressed(switch), now_secs)
            else {
                continue;
            };
            if !event.pressed {
                continue;
            }
            queue.push(Self::bind(switch, event.double_press));
        }
    }

    /// Maps a press edge to its command.
    fn bind(switch: Switch, double_press: bool) -> Command {
        match switch {
            Switch::Activate => {
                if double_press {
                    Command::Reset
                } else {
                    Command::Toggle
                }
            }
            Switch::Reset => {
                if double_press {
                    Command::Reset
                } else {
                    Command::Undo
                }
            }
            Switch::Undo => Command::Undo,
            Switch::Redo => Command::Redo,
            Switch::Dub => {
                if double_press {
                    Command::Reset
                } else {
                    Command::Overdub
                }
            }
        }
    }
}
