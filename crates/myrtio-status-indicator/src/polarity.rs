//! Pin polarity
//!
//! Boards wire LEDs and buttons either way round. The core only reasons
//! about logical on/active; the polarity decides the electrical level.

use embedded_hal::digital::PinState;

/// Electrical polarity of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Logical on/active is electrically high
    ActiveHigh,
    /// Logical on/active is electrically low (sinking LEDs, pull-up buttons)
    ActiveLow,
}

impl Polarity {
    /// Electrical state to drive for a logical output value
    pub const fn output_state(self, on: bool) -> PinState {
        match (self, on) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => PinState::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => PinState::Low,
        }
    }

    /// Whether a sampled electrical level means "active"
    pub const fn is_active(self, is_high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => is_high,
            Polarity::ActiveLow => !is_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low_inverts_output() {
        assert_eq!(Polarity::ActiveLow.output_state(true), PinState::Low);
        assert_eq!(Polarity::ActiveLow.output_state(false), PinState::High);
        assert_eq!(Polarity::ActiveHigh.output_state(true), PinState::High);
        assert_eq!(Polarity::ActiveHigh.output_state(false), PinState::Low);
    }

    #[test]
    fn pull_up_button_is_active_when_low() {
        assert!(Polarity::ActiveLow.is_active(false));
        assert!(!Polarity::ActiveLow.is_active(true));
        assert!(Polarity::ActiveHigh.is_active(true));
    }
}
