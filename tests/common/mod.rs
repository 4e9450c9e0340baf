//! Shared test infrastructure for gpio-devices integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::sync::{Arc, Mutex};

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};
use gpio_devices::{BlinkTimer, ConfigureInput, ConfigureOutput, InputConfig};

// ============================================================================
// Mock Errors
// ============================================================================

/// Failure injected by the mocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ============================================================================
// Mock Input Pin
// ============================================================================

#[derive(Debug, Default)]
pub struct InputProbe {
    pub high: bool,
    pub reads: usize,
    pub fail_reads: bool,
    pub fail_configure: bool,
    pub configured_with: Option<InputConfig>,
}

/// Input pin whose level is set through a shared probe
pub struct MockInputPin {
    probe: Arc<Mutex<InputProbe>>,
}

impl MockInputPin {
    pub fn new(high: bool) -> Self {
        Self {
            probe: Arc::new(Mutex::new(InputProbe {
                high,
                ..Default::default()
            })),
        }
    }

    pub fn failing_configure() -> Self {
        let pin = Self::new(false);
        pin.probe.lock().unwrap().fail_configure = true;
        pin
    }

    pub fn probe(&self) -> InputHandle {
        InputHandle(self.probe.clone())
    }
}

/// Test-side handle to a [`MockInputPin`]
#[derive(Clone)]
pub struct InputHandle(Arc<Mutex<InputProbe>>);

impl InputHandle {
    pub fn set_high(&self, high: bool) {
        self.0.lock().unwrap().high = high;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.0.lock().unwrap().fail_reads = fail;
    }

    pub fn reads(&self) -> usize {
        self.0.lock().unwrap().reads
    }

    pub fn configured_with(&self) -> Option<InputConfig> {
        self.0.lock().unwrap().configured_with
    }
}

impl ErrorType for MockInputPin {
    type Error = MockError;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut probe = self.probe.lock().unwrap();
        probe.reads += 1;
        if probe.fail_reads {
            return Err(MockError);
        }
        Ok(probe.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl ConfigureInput for MockInputPin {
    type ConfigError = MockError;

    fn configure_input(&mut self, config: InputConfig) -> Result<(), Self::ConfigError> {
        let mut probe = self.probe.lock().unwrap();
        if probe.fail_configure {
            return Err(MockError);
        }
        probe.configured_with = Some(config);
        Ok(())
    }
}

// ============================================================================
// Mock Output Pin
// ============================================================================

#[derive(Debug, Default)]
pub struct OutputProbe {
    pub high: bool,
    pub level_history: heapless::Vec<bool, 64>,
    pub configured: bool,
    pub fail_configure: bool,
}

/// Output pin that records every level it is driven to
pub struct MockOutputPin {
    probe: Arc<Mutex<OutputProbe>>,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self {
            probe: Arc::new(Mutex::new(OutputProbe::default())),
        }
    }

    pub fn failing_configure() -> Self {
        let pin = Self::new();
        pin.probe.lock().unwrap().fail_configure = true;
        pin
    }

    pub fn probe(&self) -> OutputHandle {
        OutputHandle(self.probe.clone())
    }

    fn drive(&mut self, high: bool) {
        let mut probe = self.probe.lock().unwrap();
        probe.high = high;
        let _ = probe.level_history.push(high);
    }
}

/// Test-side handle to a [`MockOutputPin`]
#[derive(Clone)]
pub struct OutputHandle(Arc<Mutex<OutputProbe>>);

impl OutputHandle {
    pub fn is_high(&self) -> bool {
        self.0.lock().unwrap().high
    }

    pub fn writes(&self) -> usize {
        self.0.lock().unwrap().level_history.len()
    }

    pub fn level_history(&self) -> Vec<bool> {
        self.0.lock().unwrap().level_history.iter().copied().collect()
    }

    pub fn configured(&self) -> bool {
        self.0.lock().unwrap().configured
    }
}

impl ErrorType for MockOutputPin {
    type Error = MockError;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl ConfigureOutput for MockOutputPin {
    type ConfigError = MockError;

    fn configure_output(&mut self) -> Result<(), Self::ConfigError> {
        let mut probe = self.probe.lock().unwrap();
        if probe.fail_configure {
            return Err(MockError);
        }
        probe.configured = true;
        Ok(())
    }
}

// ============================================================================
// Mock Blink Timer
// ============================================================================

#[derive(Debug, Default)]
pub struct TimerProbe {
    pub armed: Option<u32>,
    pub rearms: usize,
    pub stops: usize,
    pub fail_rearm: bool,
    pub fail_stop: bool,
    pub released: bool,
    pub released_while_armed: bool,
}

/// One-shot timer that records arm/stop calls; expiry is fired by the test
pub struct MockTimer {
    probe: Arc<Mutex<TimerProbe>>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            probe: Arc::new(Mutex::new(TimerProbe::default())),
        }
    }

    pub fn probe(&self) -> TimerHandle {
        TimerHandle(self.probe.clone())
    }
}

impl Drop for MockTimer {
    fn drop(&mut self) {
        let mut probe = self.probe.lock().unwrap();
        probe.released = true;
        probe.released_while_armed = probe.armed.is_some();
    }
}

/// Test-side handle to a [`MockTimer`]
#[derive(Clone)]
pub struct TimerHandle(Arc<Mutex<TimerProbe>>);

impl TimerHandle {
    pub fn armed(&self) -> Option<u32> {
        self.0.lock().unwrap().armed
    }

    pub fn rearms(&self) -> usize {
        self.0.lock().unwrap().rearms
    }

    pub fn stops(&self) -> usize {
        self.0.lock().unwrap().stops
    }

    pub fn released(&self) -> bool {
        self.0.lock().unwrap().released
    }

    pub fn released_while_armed(&self) -> bool {
        self.0.lock().unwrap().released_while_armed
    }

    /// Lets the pending arm fire: the timer goes inactive and the elapsed delay is
    /// returned. The test then runs the expiry callback itself.
    pub fn expire(&self) -> Option<u32> {
        self.0.lock().unwrap().armed.take()
    }

    pub fn set_fail_rearm(&self, fail: bool) {
        self.0.lock().unwrap().fail_rearm = fail;
    }

    pub fn set_fail_stop(&self, fail: bool) {
        self.0.lock().unwrap().fail_stop = fail;
    }
}

impl BlinkTimer for MockTimer {
    type Error = MockError;

    fn rearm(&mut self, delay_ms: u32) -> Result<(), Self::Error> {
        let mut probe = self.probe.lock().unwrap();
        probe.rearms += 1;
        if probe.fail_rearm {
            probe.armed = None;
            return Err(MockError);
        }
        probe.armed = Some(delay_ms);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        let mut probe = self.probe.lock().unwrap();
        probe.stops += 1;
        if probe.fail_stop {
            return Err(MockError);
        }
        probe.armed = None;
        Ok(())
    }

    fn is_pending(&mut self) -> bool {
        self.probe.lock().unwrap().armed.is_some()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Length in ms of each constant-level run on a simulated timeline.
///
/// `events` holds `(time_ms, level)` for every level change, ordered by time.
pub fn phase_lengths(events: &[(u64, bool)]) -> Vec<(bool, u64)> {
    events
        .windows(2)
        .map(|pair| (pair[0].1, pair[1].0 - pair[0].0))
        .collect()
}
