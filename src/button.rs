//! Polled push-button monitor with press-duration debounce.
//!
//! Provides [`ButtonMonitor`], which samples a GPIO input at a fixed cadence of
//! [`POLL_INTERVAL_MS`] and invokes a single registered callback once the button has
//! been seen pressed for enough consecutive polls. Any poll that sees the button
//! released starts the count over, so electrical noise shorter than one poll interval
//! never registers and holding the button fires once per configured duration.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::POLL_INTERVAL_MS;
use crate::hal::ConfigureInput;
use crate::types::{DriverError, InputConfig, Polarity};

const LOG_TAG: &str = "gpio_devices::button";

/// Handler invoked when a press is confirmed.
///
/// Runs synchronously inside the poll loop; it must not block.
pub type PressedCallback<'a> = &'a (dyn Fn() + Sync);

struct ButtonInner<'a, P> {
    pin: P,
    current_trigger_count: u32,
    needed_trigger_count: u32,
    pressed_callback: Option<PressedCallback<'a>>,
}

impl<P: InputPin> ButtonInner<'_, P> {
    fn read_pressed(&mut self, polarity: Polarity) -> Result<bool, DriverError> {
        self.pin
            .is_high()
            .map(|high| polarity.apply(high))
            .map_err(|_| DriverError::PinRead)
    }
}

/// Monitors a single push button connected to a GPIO input.
///
/// All methods take `&self`, so the monitor can live in a `static` and be shared
/// between the task running [`run`](Self::run) and code that reconfigures it. The
/// mutable state sits behind one blocking mutex of type `M`; pick
/// `NoopRawMutex` when everything runs on one executor.
///
/// # Type Parameters
/// * `'a` - Lifetime of the registered callback
/// * `M` - Raw mutex guarding the monitor state
/// * `P` - Input pin implementation
pub struct ButtonMonitor<'a, M: RawMutex, P> {
    polarity: Polarity,
    inner: Mutex<M, RefCell<ButtonInner<'a, P>>>,
}

impl<'a, M: RawMutex, P: InputPin> ButtonMonitor<'a, M, P> {
    /// Creates a monitor and applies the input configuration to the pin.
    ///
    /// The pin is configured with pull-up enabled, pull-down disabled and interrupts
    /// disabled. A configuration failure is logged and the monitor is still
    /// returned; what it senses on that pin is then up to the hardware.
    ///
    /// The press duration starts at zero, so the first pressed poll fires.
    pub fn new(mut pin: P, polarity: Polarity) -> Self
    where
        P: ConfigureInput,
    {
        if pin.configure_input(InputConfig::POLLED_PULL_UP).is_err() {
            error!("{}: {}", LOG_TAG, DriverError::PinConfiguration);
        }

        Self {
            polarity,
            inner: Mutex::new(RefCell::new(ButtonInner {
                pin,
                current_trigger_count: 0,
                needed_trigger_count: 0,
                pressed_callback: None,
            })),
        }
    }

    /// Replaces the press callback. Takes effect on the next poll.
    pub fn set_pressed_callback(&self, callback: PressedCallback<'a>) {
        self.inner
            .lock(|inner| inner.borrow_mut().pressed_callback = Some(callback));
    }

    /// Removes the press callback. Confirmed presses still reset the counter.
    pub fn clear_pressed_callback(&self) {
        self.inner
            .lock(|inner| inner.borrow_mut().pressed_callback = None);
    }

    /// Sets how long the button must be held before the callback fires.
    ///
    /// The duration is truncated to whole poll intervals; anything shorter than
    /// [`POLL_INTERVAL_MS`] fires on the first pressed poll.
    pub fn set_press_duration(&self, duration_ms: u32) {
        let needed = duration_ms / POLL_INTERVAL_MS;
        self.inner
            .lock(|inner| inner.borrow_mut().needed_trigger_count = needed);
    }

    /// Returns the number of consecutive pressed polls required to fire.
    pub fn press_duration_threshold(&self) -> u32 {
        self.inner.lock(|inner| inner.borrow().needed_trigger_count)
    }

    /// Returns the instantaneous pressed state, polarity applied, without debounce.
    ///
    /// A failed read is logged and reported as not pressed.
    pub fn is_pressed(&self) -> bool {
        let read = self
            .inner
            .lock(|inner| inner.borrow_mut().read_pressed(self.polarity));

        read.unwrap_or_else(|err| {
            warn!("{}: {}", LOG_TAG, err);
            false
        })
    }

    /// Runs one poll cycle.
    ///
    /// Returns `true` if this poll confirmed a press. The callback, if any, is invoked
    /// after the internal guard is released, so it may reconfigure the monitor.
    pub fn poll(&self) -> bool {
        let polarity = self.polarity;
        let confirmed = self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();

            let pressed = inner.read_pressed(polarity).unwrap_or_else(|err| {
                warn!("{}: {}", LOG_TAG, err);
                false
            });

            if !pressed {
                inner.current_trigger_count = 0;
                return None;
            }

            inner.current_trigger_count = inner.current_trigger_count.saturating_add(1);
            if inner.current_trigger_count >= inner.needed_trigger_count {
                inner.current_trigger_count = 0;
                Some(inner.pressed_callback)
            } else {
                None
            }
        });

        match confirmed {
            Some(callback) => {
                debug!("{}: press confirmed", LOG_TAG);
                if let Some(callback) = callback {
                    callback();
                }
                true
            }
            None => false,
        }
    }

    /// Polls the button forever at [`POLL_INTERVAL_MS`].
    ///
    /// Spawn this in its own task. A slow callback delays the following polls.
    pub async fn run<D: DelayNs>(&self, mut delay: D) -> ! {
        debug!("{}: polling started", LOG_TAG);

        loop {
            self.poll();
            delay.delay_ms(POLL_INTERVAL_MS).await;
        }
    }

    /// Returns the polarity the monitor was created with.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Consumes the monitor and returns the pin.
    pub fn release(self) -> P {
        self.inner.into_inner().into_inner().pin
    }
}
