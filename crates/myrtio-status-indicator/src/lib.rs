#![cfg_attr(not(test), no_std)]

//! Status indicator core
//!
//! Cooperative, non-blocking logic for a single status LED and a long-press
//! reset button, polled once per iteration of the host loop.
//!
//! Architecture layers:
//! - `polarity` - Mapping between logical on/active and electrical levels
//! - `pattern` - Blink patterns and priority-based pattern selection
//! - `blink` - Two-phase on/off driver for the status LED
//! - `long_press` - Long-press reset gesture detector
//! - `toggle` - Edge-triggered toggle for an auxiliary LED
//! - `indicator` - Per-iteration orchestration (detector, selector, driver)
//!
//! Time is a free-running `u32` millisecond counter. Elapsed time is always
//! computed with wrapping subtraction, so counter overflow is harmless.

pub mod blink;
pub mod error;
pub mod indicator;
pub mod long_press;
pub mod pattern;
pub mod polarity;
pub mod toggle;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use blink::{BlinkDriver, BlinkPhase, Phase};
pub use error::IndicatorError;
pub use indicator::{StatusIndicator, TickOutcome};
pub use long_press::{ButtonEvent, HoldState, LongPressDetector, ResetAction};
pub use pattern::{BlinkPattern, Connectivity, PatternSet};
pub use polarity::Polarity;
pub use toggle::ToggleButton;

/// Milliseconds since boot, truncated to 32 bits
pub type Millis = u32;

/// Milliseconds elapsed from `since` to `now`, tolerant to counter wraparound
#[inline]
pub(crate) const fn elapsed(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}
