//! Auxiliary toggle button
//!
//! Each press of the button flips an auxiliary LED. Edges that arrive
//! within the lockout window after an accepted press are treated as
//! contact bounce and ignored.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::{IndicatorError, Millis, Polarity, elapsed};

/// Bounce lockout after an accepted press
pub const DEFAULT_LOCKOUT_MS: u32 = 50;

pub struct ToggleButton<B, L> {
    button: B,
    button_polarity: Polarity,
    led: L,
    led_polarity: Polarity,
    lockout_ms: u32,
    led_on: bool,
    was_active: bool,
    last_toggle_at: Option<Millis>,
}

impl<B: InputPin, L: OutputPin> ToggleButton<B, L> {
    pub fn new(button: B, button_polarity: Polarity, led: L, led_polarity: Polarity) -> Self {
        Self {
            button,
            button_polarity,
            led,
            led_polarity,
            lockout_ms: DEFAULT_LOCKOUT_MS,
            led_on: false,
            was_active: false,
            last_toggle_at: None,
        }
    }

    #[must_use]
    pub fn with_lockout(mut self, lockout_ms: u32) -> Self {
        self.lockout_ms = lockout_ms;
        self
    }

    /// Drive the LED to its initial (off) state
    pub fn init(&mut self) -> Result<(), IndicatorError<B::Error, L::Error>> {
        self.led
            .set_state(self.led_polarity.output_state(self.led_on))
            .map_err(IndicatorError::Output)
    }

    pub fn is_on(&self) -> bool {
        self.led_on
    }

    /// Sample the button; returns the new LED state when it was toggled
    pub fn poll(
        &mut self,
        now: Millis,
    ) -> Result<Option<bool>, IndicatorError<B::Error, L::Error>> {
        let level = self.button.is_high().map_err(IndicatorError::Input)?;
        let active = self.button_polarity.is_active(level);
        let pressed = active && !self.was_active;
        self.was_active = active;

        if !pressed {
            return Ok(None);
        }
        if let Some(last) = self.last_toggle_at
            && elapsed(now, last) < self.lockout_ms
        {
            return Ok(None);
        }

        self.led_on = !self.led_on;
        self.last_toggle_at = Some(now);
        self.led
            .set_state(self.led_polarity.output_state(self.led_on))
            .map_err(IndicatorError::Output)?;
        log::info!("aux button: pressed, led {}", if self.led_on { "on" } else { "off" });
        Ok(Some(self.led_on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BrokenPin, FakeInput, FakeOutput};

    fn toggle() -> (FakeInput, FakeOutput, ToggleButton<FakeInput, FakeOutput>) {
        let button = FakeInput::new(true);
        let led = FakeOutput::new();
        let toggle = ToggleButton::new(
            button.clone(),
            Polarity::ActiveLow,
            led.clone(),
            Polarity::ActiveHigh,
        );
        (button, led, toggle)
    }

    #[test]
    fn each_press_flips_led() {
        let (button, led, mut toggle) = toggle();
        toggle.init().unwrap();
        assert!(!led.is_high());

        button.set_high(false);
        assert_eq!(toggle.poll(0), Ok(Some(true)));
        assert!(led.is_high());
        // Holding does not toggle again
        assert_eq!(toggle.poll(100), Ok(None));

        button.set_high(true);
        assert_eq!(toggle.poll(200), Ok(None));
        button.set_high(false);
        assert_eq!(toggle.poll(300), Ok(Some(false)));
        assert!(!led.is_high());
    }

    #[test]
    fn bounce_within_lockout_is_ignored() {
        let (button, _led, mut toggle) = toggle();

        button.set_high(false);
        assert_eq!(toggle.poll(0), Ok(Some(true)));
        button.set_high(true);
        toggle.poll(5).unwrap();
        button.set_high(false);
        assert_eq!(toggle.poll(10), Ok(None));
        assert!(toggle.is_on());

        button.set_high(true);
        toggle.poll(60).unwrap();
        button.set_high(false);
        assert_eq!(toggle.poll(70), Ok(Some(false)));
    }

    #[test]
    fn input_error_is_reported() {
        let mut toggle = ToggleButton::new(
            BrokenPin,
            Polarity::ActiveLow,
            FakeOutput::new(),
            Polarity::ActiveHigh,
        );
        assert!(matches!(toggle.poll(0), Err(IndicatorError::Input(_))));
    }
}
