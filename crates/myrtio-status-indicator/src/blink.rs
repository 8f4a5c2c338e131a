//! Blink driver
//!
//! Advances a two-phase (on/off) timer and drives the status LED. The
//! pattern is passed in on every call, so a pattern switch takes effect at
//! the next phase boundary without restarting the current phase.

use embedded_hal::digital::OutputPin;

use crate::{BlinkPattern, Millis, Polarity, elapsed};

/// Half of a blink cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    On,
    Off,
}

impl Phase {
    pub const fn is_on(self) -> bool {
        matches!(self, Phase::On)
    }

    const fn toggled(self) -> Self {
        match self {
            Phase::On => Phase::Off,
            Phase::Off => Phase::On,
        }
    }
}

/// Current phase and the time it started
///
/// `started_at` is `None` until the first boundary. An unstarted phase
/// counts as already expired, so the first tick switches the LED on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPhase {
    pub phase: Phase,
    pub started_at: Option<Millis>,
}

impl BlinkPhase {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Off,
            started_at: None,
        }
    }

    /// Cross at most one phase boundary
    ///
    /// Returns `true` if the phase changed. Time past the boundary is not
    /// carried over into the next phase.
    pub fn advance(&mut self, pattern: BlinkPattern, now: Millis) -> bool {
        let expired = match self.started_at {
            None => true,
            Some(started_at) => elapsed(now, started_at) >= pattern.duration(self.phase),
        };
        if expired {
            self.phase = self.phase.toggled();
            self.started_at = Some(now);
        }
        expired
    }
}

impl Default for BlinkPhase {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a single LED through [`BlinkPhase`]
pub struct BlinkDriver<P> {
    pin: P,
    polarity: Polarity,
    state: BlinkPhase,
}

impl<P: OutputPin> BlinkDriver<P> {
    pub const fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            state: BlinkPhase::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> BlinkPhase {
        self.state
    }

    /// Advance the phase timer and drive the output
    ///
    /// The pin is written on every call, even without a transition, so an
    /// external write between iterations is corrected on the next one.
    pub fn tick(&mut self, pattern: BlinkPattern, now: Millis) -> Result<Phase, P::Error> {
        if self.state.advance(pattern, now) {
            log::trace!("blink: {:?} at {} ms", self.state.phase, now);
        }
        self.pin
            .set_state(self.polarity.output_state(self.state.phase.is_on()))?;
        Ok(self.state.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BrokenPin, FakeOutput};

    #[test]
    fn first_tick_turns_led_on() {
        let led = FakeOutput::new();
        let mut driver = BlinkDriver::new(led.clone(), Polarity::ActiveHigh);

        assert_eq!(driver.phase(), Phase::Off);
        assert_eq!(driver.tick(BlinkPattern::symmetric(500), 0), Ok(Phase::On));
        assert!(led.is_high());
    }

    #[test]
    fn active_low_led_is_driven_low_when_on() {
        let led = FakeOutput::new();
        let mut driver = BlinkDriver::new(led.clone(), Polarity::ActiveLow);

        driver.tick(BlinkPattern::symmetric(500), 0).unwrap();
        assert!(!led.is_high());
        driver.tick(BlinkPattern::symmetric(500), 500).unwrap();
        assert!(led.is_high());
    }

    #[test]
    fn writes_pin_every_tick() {
        let led = FakeOutput::new();
        let mut driver = BlinkDriver::new(led.clone(), Polarity::ActiveHigh);
        let pattern = BlinkPattern::symmetric(500);

        for now in (0..100).step_by(10) {
            driver.tick(pattern, now).unwrap();
        }
        assert_eq!(led.writes(), 10);
    }

    #[test]
    fn restores_level_changed_externally() {
        let led = FakeOutput::new();
        let mut driver = BlinkDriver::new(led.clone(), Polarity::ActiveHigh);
        let pattern = BlinkPattern::symmetric(500);

        driver.tick(pattern, 0).unwrap();
        led.force(false);
        driver.tick(pattern, 10).unwrap();
        assert!(led.is_high());
    }

    #[test]
    fn delayed_tick_crosses_only_one_boundary() {
        let mut driver = BlinkDriver::new(FakeOutput::new(), Polarity::ActiveHigh);
        let pattern = BlinkPattern::symmetric(100);

        driver.tick(pattern, 0).unwrap();
        // Several boundaries were missed; only one is taken and the new
        // phase starts now.
        assert_eq!(driver.tick(pattern, 1000), Ok(Phase::Off));
        assert_eq!(driver.state().started_at, Some(1000));
        assert_eq!(driver.tick(pattern, 1099), Ok(Phase::Off));
        assert_eq!(driver.tick(pattern, 1100), Ok(Phase::On));
    }

    #[test]
    fn pattern_switch_keeps_phase_start() {
        let mut driver = BlinkDriver::new(FakeOutput::new(), Polarity::ActiveHigh);

        driver.tick(BlinkPattern::symmetric(1000), 0).unwrap();
        driver.tick(BlinkPattern::symmetric(1000), 300).unwrap();
        // Switching to a shorter pattern mid-phase ends the phase once the
        // new duration has elapsed since the original start.
        assert_eq!(driver.tick(BlinkPattern::symmetric(500), 400), Ok(Phase::On));
        assert_eq!(driver.state().started_at, Some(0));
        assert_eq!(driver.tick(BlinkPattern::symmetric(500), 500), Ok(Phase::Off));
    }

    #[test]
    fn survives_counter_wraparound() {
        let mut driver = BlinkDriver::new(FakeOutput::new(), Polarity::ActiveHigh);
        let pattern = BlinkPattern::symmetric(100);
        let start = u32::MAX - 50;

        driver.tick(pattern, start).unwrap();
        assert_eq!(driver.tick(pattern, start.wrapping_add(99)), Ok(Phase::On));
        assert_eq!(driver.tick(pattern, start.wrapping_add(100)), Ok(Phase::Off));
    }

    #[test]
    fn propagates_pin_error() {
        let mut driver = BlinkDriver::new(BrokenPin, Polarity::ActiveHigh);
        assert!(driver.tick(BlinkPattern::symmetric(100), 0).is_err());
    }
}
