//! Long-press reset detector
//!
//! State machine: `Idle -> Pressed -> {Released | Triggered}`, and
//! `Triggered -> Idle` only on physical release.
//!
//! The raw level is trusted directly by default: the gesture needs several
//! seconds of contact, so contact bounce cannot fake a trigger. An optional
//! debounce window can be set for noisy hardware.

use embedded_hal::digital::InputPin;

use crate::{Millis, Polarity, elapsed};

/// Hold time that triggers the reset action
pub const DEFAULT_THRESHOLD_MS: u32 = 5000;

const COUNTDOWN_STEP_MS: u32 = 1000;

/// Notification raised by [`LongPressDetector::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    PressStarted,
    /// Whole seconds left until the reset triggers
    SecondsRemaining(u8),
    /// Threshold reached, reset action invoked
    Triggered,
    /// Released before the threshold, nothing happens
    ReleasedEarly { held_ms: u32 },
    /// Released after the threshold was reached
    Released { held_ms: u32 },
}

/// Destructive action run when the long press completes
///
/// On hardware this erases the stored network credentials and restarts,
/// so it does not return.
pub trait ResetAction {
    fn reset_and_restart(&mut self);
}

/// Button hold bookkeeping, mutated only by [`LongPressDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoldState {
    pub pressed: bool,
    pub press_started_at: Millis,
    /// Set at most once per press, cleared on release
    pub triggered: bool,
    /// Last countdown value announced, 0 before the first one
    pub last_reported_remaining: u8,
    /// First active sample while the debounce window is still open
    pub settling_since: Option<Millis>,
}

impl HoldState {
    /// How long the current press has lasted
    pub fn held_ms(&self, now: Millis) -> Option<u32> {
        self.pressed
            .then(|| elapsed(now, self.press_started_at))
    }
}

/// Polls the reset button and detects the long-press gesture
pub struct LongPressDetector<P> {
    pin: P,
    polarity: Polarity,
    threshold_ms: u32,
    debounce_ms: u32,
    state: HoldState,
}

impl<P: InputPin> LongPressDetector<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            threshold_ms: DEFAULT_THRESHOLD_MS,
            debounce_ms: 0,
            state: HoldState::default(),
        }
    }

    /// Set the hold time needed to trigger
    #[must_use]
    pub fn with_threshold(mut self, threshold_ms: u32) -> Self {
        self.threshold_ms = threshold_ms;
        self
    }

    /// Require the input to stay active this long before committing a press
    ///
    /// The press start is still the first active sample, so the hold
    /// threshold is measured from first contact.
    #[must_use]
    pub fn with_debounce(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn state(&self) -> &HoldState {
        &self.state
    }

    /// Button is held and the threshold has not been reached yet
    pub fn countdown_active(&self, now: Millis) -> bool {
        matches!(self.state.held_ms(now), Some(held) if held < self.threshold_ms)
    }

    /// Sample the button once
    ///
    /// Invokes `reset` exactly once per press when the hold reaches the
    /// threshold. Returns at most one event per call.
    pub fn poll(
        &mut self,
        now: Millis,
        reset: &mut impl ResetAction,
    ) -> Result<Option<ButtonEvent>, P::Error> {
        let active = self.polarity.is_active(self.pin.is_high()?);
        let event = if !active {
            self.release(now)
        } else if !self.state.pressed {
            self.begin_press(now)
        } else {
            self.hold(now, reset)
        };
        Ok(event)
    }

    fn begin_press(&mut self, now: Millis) -> Option<ButtonEvent> {
        let since = *self.state.settling_since.get_or_insert(now);
        if elapsed(now, since) < self.debounce_ms {
            return None;
        }
        self.state = HoldState {
            pressed: true,
            press_started_at: since,
            triggered: false,
            last_reported_remaining: 0,
            settling_since: None,
        };
        log::info!(
            "button: pressed, hold for {} s to reset wifi",
            self.threshold_ms / COUNTDOWN_STEP_MS
        );
        Some(ButtonEvent::PressStarted)
    }

    fn hold(&mut self, now: Millis, reset: &mut impl ResetAction) -> Option<ButtonEvent> {
        let held_ms = elapsed(now, self.state.press_started_at);

        if held_ms >= self.threshold_ms {
            if self.state.triggered {
                return None;
            }
            self.state.triggered = true;
            log::warn!("button: held {} ms, resetting wifi now", held_ms);
            reset.reset_and_restart();
            return Some(ButtonEvent::Triggered);
        }

        let remaining = self.seconds_remaining(held_ms);
        if remaining == self.state.last_reported_remaining {
            return None;
        }
        self.state.last_reported_remaining = remaining;
        log::info!("button: hold for {} more seconds", remaining);
        Some(ButtonEvent::SecondsRemaining(remaining))
    }

    fn release(&mut self, now: Millis) -> Option<ButtonEvent> {
        self.state.settling_since = None;
        let held_ms = self.state.held_ms(now)?;
        self.state = HoldState::default();

        if held_ms < self.threshold_ms {
            log::info!(
                "button: released after {}.{} s, no reset",
                held_ms / 1000,
                held_ms % 1000 / 100
            );
            Some(ButtonEvent::ReleasedEarly { held_ms })
        } else {
            Some(ButtonEvent::Released { held_ms })
        }
    }

    /// Whole seconds until the threshold, rounded up
    fn seconds_remaining(&self, held_ms: u32) -> u8 {
        let remaining = self
            .threshold_ms
            .saturating_sub(held_ms)
            .div_ceil(COUNTDOWN_STEP_MS);
        u8::try_from(remaining).unwrap_or(u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{BrokenPin, CountingReset, FakeInput};

    /// Pull-up button, idle (high)
    fn detector() -> (FakeInput, LongPressDetector<FakeInput>) {
        let button = FakeInput::new(true);
        let detector = LongPressDetector::new(button.clone(), Polarity::ActiveLow);
        (button, detector)
    }

    #[test]
    fn idle_button_raises_nothing() {
        let (_button, mut detector) = detector();
        let mut reset = CountingReset::default();

        for now in (0..1000).step_by(10) {
            assert_eq!(detector.poll(now, &mut reset), Ok(None));
        }
        assert!(!detector.state().pressed);
    }

    #[test]
    fn press_records_start_time() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();

        button.set_high(false);
        assert_eq!(
            detector.poll(1234, &mut reset),
            Ok(Some(ButtonEvent::PressStarted))
        );
        assert!(detector.state().pressed);
        assert_eq!(detector.state().press_started_at, 1234);
        assert!(!detector.state().triggered);
    }

    #[test]
    fn countdown_is_reported_once_per_value() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();
        button.set_high(false);

        let mut countdown = Vec::new();
        for now in (0..5000).step_by(7) {
            if let Ok(Some(ButtonEvent::SecondsRemaining(n))) = detector.poll(now, &mut reset) {
                countdown.push(n);
            }
        }
        assert_eq!(countdown, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn countdown_follows_elapsed_time_on_irregular_ticks() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();
        button.set_high(false);

        detector.poll(0, &mut reset).unwrap();
        assert_eq!(
            detector.poll(2500, &mut reset),
            Ok(Some(ButtonEvent::SecondsRemaining(3)))
        );
        assert_eq!(detector.poll(2900, &mut reset), Ok(None));
        assert_eq!(
            detector.poll(3000, &mut reset),
            Ok(Some(ButtonEvent::SecondsRemaining(2)))
        );
    }

    #[test]
    fn triggers_once_at_threshold() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();
        button.set_high(false);

        detector.poll(0, &mut reset).unwrap();
        assert_eq!(
            detector.poll(4999, &mut reset).unwrap(),
            Some(ButtonEvent::SecondsRemaining(1))
        );
        assert_eq!(reset.calls, 0);
        assert_eq!(detector.poll(5000, &mut reset), Ok(Some(ButtonEvent::Triggered)));
        assert_eq!(reset.calls, 1);
        for now in (5010..20_000).step_by(10) {
            assert_eq!(detector.poll(now, &mut reset), Ok(None));
        }
        assert_eq!(reset.calls, 1);
        assert!(detector.state().triggered);
        assert!(!detector.countdown_active(6000));
    }

    #[test]
    fn late_tick_still_triggers_once() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();
        button.set_high(false);

        detector.poll(0, &mut reset).unwrap();
        assert_eq!(detector.poll(9000, &mut reset), Ok(Some(ButtonEvent::Triggered)));
        assert_eq!(detector.poll(9001, &mut reset), Ok(None));
        assert_eq!(reset.calls, 1);
    }

    #[test]
    fn release_after_trigger_rearms() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();

        button.set_high(false);
        detector.poll(0, &mut reset).unwrap();
        detector.poll(5000, &mut reset).unwrap();
        button.set_high(true);
        assert_eq!(
            detector.poll(5200, &mut reset),
            Ok(Some(ButtonEvent::Released { held_ms: 5200 }))
        );
        assert_eq!(*detector.state(), HoldState::default());

        button.set_high(false);
        detector.poll(6000, &mut reset).unwrap();
        detector.poll(11_000, &mut reset).unwrap();
        assert_eq!(reset.calls, 2);
    }

    #[test]
    fn early_release_reports_duration() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();

        button.set_high(false);
        detector.poll(100, &mut reset).unwrap();
        button.set_high(true);
        assert_eq!(
            detector.poll(4000, &mut reset),
            Ok(Some(ButtonEvent::ReleasedEarly { held_ms: 3900 }))
        );
        assert_eq!(detector.poll(4010, &mut reset), Ok(None));
        assert_eq!(reset.calls, 0);
    }

    #[test]
    fn countdown_active_only_while_holding_below_threshold() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();

        assert!(!detector.countdown_active(0));
        button.set_high(false);
        detector.poll(0, &mut reset).unwrap();
        assert!(detector.countdown_active(4999));
        assert!(!detector.countdown_active(5000));
    }

    #[test]
    fn debounce_ignores_short_glitch() {
        let (button, detector) = detector();
        let mut detector = detector.with_debounce(20);
        let mut reset = CountingReset::default();

        button.set_high(false);
        assert_eq!(detector.poll(0, &mut reset), Ok(None));
        assert_eq!(detector.poll(10, &mut reset), Ok(None));
        button.set_high(true);
        assert_eq!(detector.poll(15, &mut reset), Ok(None));
        assert!(!detector.state().pressed);

        button.set_high(false);
        assert_eq!(detector.poll(100, &mut reset), Ok(None));
        assert_eq!(
            detector.poll(120, &mut reset),
            Ok(Some(ButtonEvent::PressStarted))
        );
        // Hold time counts from first contact
        assert_eq!(detector.state().press_started_at, 100);
        detector.poll(5099, &mut reset).unwrap();
        assert_eq!(reset.calls, 0);
        assert_eq!(detector.poll(5100, &mut reset), Ok(Some(ButtonEvent::Triggered)));
    }

    #[test]
    fn custom_threshold() {
        let (button, detector) = detector();
        let mut detector = detector.with_threshold(3000);
        let mut reset = CountingReset::default();

        button.set_high(false);
        detector.poll(0, &mut reset).unwrap();
        assert_eq!(
            detector.poll(10, &mut reset),
            Ok(Some(ButtonEvent::SecondsRemaining(3)))
        );
        assert_eq!(detector.poll(3000, &mut reset), Ok(Some(ButtonEvent::Triggered)));
    }

    #[test]
    fn hold_across_counter_wraparound() {
        let (button, mut detector) = detector();
        let mut reset = CountingReset::default();
        let start = u32::MAX - 1000;

        button.set_high(false);
        detector.poll(start, &mut reset).unwrap();
        assert_eq!(
            detector.poll(start.wrapping_add(4999), &mut reset).unwrap(),
            Some(ButtonEvent::SecondsRemaining(1))
        );
        assert_eq!(
            detector.poll(start.wrapping_add(5000), &mut reset),
            Ok(Some(ButtonEvent::Triggered))
        );
        assert_eq!(reset.calls, 1);
    }

    #[test]
    fn propagates_pin_error() {
        let mut detector = LongPressDetector::new(BrokenPin, Polarity::ActiveLow);
        let mut reset = CountingReset::default();
        assert!(detector.poll(0, &mut reset).is_err());
    }
}
