#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonMonitor`**: Polls a button pin and reports sustained presses through a callback
//! - **`LedController`**: Holds an LED steady on, steady off, or blinking
//! - **`BlinkTimer`**: Trait to implement for the one-shot timer that paces blinking
//! - **`ConfigureInput`** / **`ConfigureOutput`**: Traits to implement for electrical pin setup
//! - **`Polarity`**: Whether a high level means pressed/lit (`Normal`) or the opposite (`Inverted`)
//! - **`LedAction`**: Commands that can be sent to control LEDs
//!
//! Level reads and writes go through `embedded_hal::digital`, the poll loop sleeps
//! through `embedded_hal_async::delay::DelayNs`.

#[macro_use]
mod fmt;

pub mod button;
pub mod command;
pub mod hal;
pub mod led;
pub mod types;

pub use button::{ButtonMonitor, PressedCallback};
pub use command::{LedAction, LedCommand};
pub use hal::{BlinkTimer, ConfigureInput, ConfigureOutput};
pub use led::{LedController, LedSnapshot, LedState};
pub use types::{DriverError, InputConfig, Polarity};

/// Fixed cadence of the button poll loop in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 200;

/// On and off interval an LED starts with, in milliseconds.
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 1000;
