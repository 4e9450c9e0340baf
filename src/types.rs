//! Core types shared by the button and LED drivers.

/// Mapping between electrical level and logical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// High level means pressed / lit.
    #[default]
    Normal,

    /// Low level means pressed / lit.
    Inverted,
}

impl Polarity {
    /// Builds a polarity from an `inverted` flag.
    #[inline]
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }

    /// Returns true for [`Polarity::Inverted`].
    #[inline]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Polarity::Inverted)
    }

    /// Converts between electrical level and logical state.
    ///
    /// The mapping is its own inverse, so the same call serves reads and writes.
    #[inline]
    pub const fn apply(self, level: bool) -> bool {
        match self {
            Polarity::Normal => level,
            Polarity::Inverted => !level,
        }
    }
}

/// Electrical configuration for an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Enable the internal pull-up resistor.
    pub pull_up: bool,

    /// Enable the internal pull-down resistor.
    pub pull_down: bool,

    /// Enable edge interrupts on the line.
    pub interrupts: bool,
}

impl InputConfig {
    /// Pull-up on, pull-down off, interrupts off. The line is read by polling.
    pub const POLLED_PULL_UP: Self = Self {
        pull_up: true,
        pull_down: false,
        interrupts: false,
    };
}

/// Hardware failures seen by the drivers.
///
/// None of these are fatal: the drivers log them and continue in a degraded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The platform rejected the pin configuration.
    PinConfiguration,

    /// Reading the input level failed.
    PinRead,

    /// Driving the output level failed.
    PinWrite,

    /// The blink timer could not be rearmed.
    TimerRearm,

    /// The blink timer could not be stopped.
    TimerStop,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::PinConfiguration => write!(f, "failed to apply GPIO configuration"),
            DriverError::PinRead => write!(f, "failed to read GPIO level"),
            DriverError::PinWrite => write!(f, "failed to set GPIO level"),
            DriverError::TimerRearm => write!(f, "failed to start blink timer"),
            DriverError::TimerStop => write!(f, "failed to stop blink timer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
