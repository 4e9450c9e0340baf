//! Hardware collaborator traits.
//!
//! Level reads and writes use `embedded_hal::digital`. The traits here cover what
//! `embedded-hal` leaves to each HAL: applying the electrical pin configuration and
//! pacing the blink with a one-shot timer.

use crate::types::InputConfig;

/// Pins that can be put into input mode at runtime.
///
/// HALs that fix the pin mode in the type can return `Ok(())`.
pub trait ConfigureInput {
    /// Error reported by the platform.
    type ConfigError;

    /// Applies the electrical input configuration.
    fn configure_input(&mut self, config: InputConfig) -> Result<(), Self::ConfigError>;
}

/// Pins that can be put into push-pull output mode at runtime.
pub trait ConfigureOutput {
    /// Error reported by the platform.
    type ConfigError;

    /// Applies the electrical output configuration.
    fn configure_output(&mut self) -> Result<(), Self::ConfigError>;
}

/// One-shot timer that paces an LED blink.
///
/// The timer is handed to [`LedController`](crate::LedController) inactive. When an
/// armed timer expires, the platform glue calls
/// [`LedController::on_timer_expired`](crate::LedController::on_timer_expired) from
/// its timer context. Dropping the timer releases it.
pub trait BlinkTimer {
    /// Error reported by the timer service.
    type Error;

    /// Changes the period and (re)starts the timer so it expires once after `delay_ms`.
    ///
    /// Replaces any pending expiry.
    fn rearm(&mut self, delay_ms: u32) -> Result<(), Self::Error>;

    /// Cancels any pending expiry. Stopping an inactive timer succeeds.
    ///
    /// When the timer service runs expiry callbacks on its own thread or task, `stop`
    /// must not return while a callback is still running. It must also never wait on
    /// the controller's guard: the controller calls `stop` with that guard held,
    /// including from its `Drop`. `Drop` has `&mut` access, so no callback can be
    /// inside the controller at that point.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Returns true while an expiry is scheduled and has not fired yet.
    ///
    /// A one-shot timer reports `false` from inside its own expiry callback. The
    /// controller relies on this to ignore expiries of an arm it has since replaced.
    fn is_pending(&mut self) -> bool;
}
