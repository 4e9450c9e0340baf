//! Command-based control for LEDs.

/// Actions for controlling an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedAction {
    /// Steady on.
    On,
    /// Steady off.
    Off,
    /// Blink with equal on and off intervals (ms).
    Blink(u32),
    /// Blink with separate on and off intervals (ms).
    BlinkSequence { on_ms: u32, off_ms: u32 },
}

/// Command targeting a specific LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedCommand<Id> {
    pub led_id: Id,
    pub action: LedAction,
}

impl<Id> LedCommand<Id> {
    /// Creates command.
    pub fn new(led_id: Id, action: LedAction) -> Self {
        Self { led_id, action }
    }
}
