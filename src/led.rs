//! Timer-driven LED controller.
//!
//! Provides [`LedController`], which holds an LED steady on, steady off, or blinking
//! with separate on and off intervals. Blinking is paced by a one-shot
//! [`BlinkTimer`]: every expiry flips the output and rearms the timer for the
//! interval of the new phase.
//!
//! Callers and the timer context both mutate the controller, so every field lives
//! behind one blocking mutex. Each transition (`set_on`, `set_off`,
//! `blink_sequence`, expiry) runs entirely under that guard, so readers only ever
//! observe the result of one completed transition.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::{OutputPin, PinState};

use crate::DEFAULT_BLINK_INTERVAL_MS;
use crate::command::LedAction;
use crate::hal::{BlinkTimer, ConfigureOutput};
use crate::types::{DriverError, Polarity};

const LOG_TAG: &str = "gpio_devices::led";

/// The logical state of an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// Steady off.
    Off,
    /// Steady on.
    On,
    /// Blinking. `on_phase` is true while the LED is lit within the cycle.
    Blinking { on_phase: bool },
}

/// State and intervals captured under one guard acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedSnapshot {
    pub state: LedState,
    pub on_interval_ms: u32,
    pub off_interval_ms: u32,
}

struct LedInner<P, T> {
    pin: P,
    timer: T,
    polarity: Polarity,
    on: bool,
    blinking: bool,
    on_interval_ms: u32,
    off_interval_ms: u32,
}

impl<P: OutputPin, T: BlinkTimer> LedInner<P, T> {
    fn drive(&mut self, on: bool) -> Result<(), DriverError> {
        let level = PinState::from(self.polarity.apply(on));
        self.pin.set_state(level).map_err(|_| DriverError::PinWrite)
    }

    fn stop_timer(&mut self) -> Result<(), DriverError> {
        self.timer.stop().map_err(|_| DriverError::TimerStop)
    }

    fn rearm_timer(&mut self, delay_ms: u32) -> Result<(), DriverError> {
        self.timer
            .rearm(delay_ms)
            .map_err(|_| DriverError::TimerRearm)
    }

    fn next_interval(&self) -> u32 {
        if self.on {
            self.on_interval_ms
        } else {
            self.off_interval_ms
        }
    }

    // Drive the current phase and arm the timer for it. A timer that cannot be armed
    // leaves the LED at the level just driven.
    fn arm_current_phase(&mut self) {
        if let Err(err) = self.drive(self.on) {
            warn!("{}: {}", LOG_TAG, err);
        }

        let delay_ms = self.next_interval();
        if let Err(err) = self.rearm_timer(delay_ms) {
            error!("{}: {}", LOG_TAG, err);
            self.blinking = false;
        }
    }

    fn cancel_timer(&mut self) {
        if let Err(err) = self.stop_timer() {
            error!("{}: {}", LOG_TAG, err);
        }
    }

    fn state(&self) -> LedState {
        match (self.blinking, self.on) {
            (true, on_phase) => LedState::Blinking { on_phase },
            (false, true) => LedState::On,
            (false, false) => LedState::Off,
        }
    }
}

/// Controls a single LED connected to a GPIO output.
///
/// Exactly one of steady off, steady on, or blinking is active at a time; entering
/// any of them cancels the others. Every method takes `&self`, so the controller can
/// be shared as `&'static` between application code and the timer context that calls
/// [`on_timer_expired`](Self::on_timer_expired).
///
/// Dropping the controller stops the timer before the timer is released.
///
/// # Type Parameters
/// * `M` - Raw mutex guarding the controller state
/// * `P` - Output pin implementation
/// * `T` - Blink timer implementation
pub struct LedController<M: RawMutex, P: OutputPin, T: BlinkTimer> {
    inner: Mutex<M, RefCell<LedInner<P, T>>>,
}

impl<M: RawMutex, P: OutputPin, T: BlinkTimer> LedController<M, P, T> {
    /// Creates a controller with the LED turned off.
    ///
    /// Applies the output configuration to the pin and takes ownership of the timer,
    /// which must be inactive. A configuration failure is logged and the controller is
    /// still returned.
    pub fn new(mut pin: P, timer: T, polarity: Polarity) -> Self
    where
        P: ConfigureOutput,
    {
        if pin.configure_output().is_err() {
            error!("{}: {}", LOG_TAG, DriverError::PinConfiguration);
        }

        let mut inner = LedInner {
            pin,
            timer,
            polarity,
            on: false,
            blinking: false,
            on_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            off_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
        };

        if let Err(err) = inner.drive(false) {
            warn!("{}: {}", LOG_TAG, err);
        }

        Self {
            inner: Mutex::new(RefCell::new(inner)),
        }
    }

    /// Blinks with equal on and off intervals.
    pub fn blink(&self, interval_ms: u32) {
        self.blink_sequence(interval_ms, interval_ms);
    }

    /// Blinks with separate on and off intervals, starting with the on phase.
    ///
    /// Cancels any pending expiry, lights the LED immediately and arms the timer for
    /// `on_ms`. If the timer cannot be armed the LED stays lit and the controller
    /// leaves the blinking state.
    pub fn blink_sequence(&self, on_ms: u32, off_ms: u32) {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();

            inner.cancel_timer();

            inner.blinking = true;
            inner.on = true;
            inner.on_interval_ms = on_ms;
            inner.off_interval_ms = off_ms;

            inner.arm_current_phase();
        });

        debug!("{}: blinking {}/{} ms", LOG_TAG, on_ms, off_ms);
    }

    /// Sets the LED steady on or steady off, cancelling any blink.
    pub fn set_on(&self, on: bool) {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();

            inner.blinking = false;
            inner.cancel_timer();

            if let Err(err) = inner.drive(on) {
                warn!("{}: {}", LOG_TAG, err);
            }
            inner.on = on;
        });

        debug!("{}: steady {}", LOG_TAG, if on { "on" } else { "off" });
    }

    /// Sets the LED steady off. Same as `set_on(false)`.
    pub fn set_off(&self) {
        self.set_on(false);
    }

    /// Returns true while a blink is scheduled.
    pub fn is_blinking(&self) -> bool {
        self.inner.lock(|inner| inner.borrow().blinking)
    }

    /// Returns true only if the LED is commanded steady on.
    ///
    /// The lit phase of a blink does not count.
    pub fn is_on(&self) -> bool {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            inner.on && !inner.blinking
        })
    }

    /// Returns the current logical state.
    pub fn state(&self) -> LedState {
        self.inner.lock(|inner| inner.borrow().state())
    }

    /// Returns the blink on and off intervals in milliseconds.
    pub fn intervals(&self) -> (u32, u32) {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            (inner.on_interval_ms, inner.off_interval_ms)
        })
    }

    /// Returns state and intervals read under a single guard acquisition.
    pub fn snapshot(&self) -> LedSnapshot {
        self.inner.lock(|inner| {
            let inner = inner.borrow();
            LedSnapshot {
                state: inner.state(),
                on_interval_ms: inner.on_interval_ms,
                off_interval_ms: inner.off_interval_ms,
            }
        })
    }

    /// Advances the blink by one phase. Call this from the timer's expiry context.
    ///
    /// Flips the output and rearms the timer with the interval of the new phase. An
    /// expiry that arrives after the LED left the blinking state is ignored, and so is
    /// one that arrives while the timer is still pending: that expiry belongs to an arm
    /// a newer transition has replaced. If the timer cannot be rearmed the LED keeps its
    /// new level and stops blinking.
    pub fn on_timer_expired(&self) {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();

            if !inner.blinking || inner.timer.is_pending() {
                return;
            }

            inner.on = !inner.on;
            inner.arm_current_phase();
        });
    }

    /// Returns a closure that forwards to [`on_timer_expired`](Self::on_timer_expired),
    /// for timer services that take a context-capturing handler.
    pub fn expiry_handler(&self) -> impl Fn() + '_ {
        move || self.on_timer_expired()
    }

    /// Handles an LED action by dispatching to the matching method.
    pub fn handle_action(&self, action: LedAction) {
        match action {
            LedAction::On => self.set_on(true),
            LedAction::Off => self.set_off(),
            LedAction::Blink(interval_ms) => self.blink(interval_ms),
            LedAction::BlinkSequence { on_ms, off_ms } => self.blink_sequence(on_ms, off_ms),
        }
    }
}

impl<M: RawMutex, P: OutputPin, T: BlinkTimer> Drop for LedController<M, P, T> {
    fn drop(&mut self) {
        // `&mut self` rules out a concurrent expiry; after the stop none can start.
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.blinking = false;
            inner.cancel_timer();
        });
    }
}
