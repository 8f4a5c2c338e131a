//! Per-iteration orchestration
//!
//! One [`StatusIndicator::tick`] runs the long-press detector, then the
//! pattern selector, then the blink driver. The detector goes first so the
//! selector always sees the fresh hold state.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::{
    BlinkDriver,
    BlinkPattern,
    ButtonEvent,
    Connectivity,
    IndicatorError,
    LongPressDetector,
    Millis,
    PatternSet,
    Phase,
    ResetAction,
};

/// Result of one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub event: Option<ButtonEvent>,
    pub pattern: BlinkPattern,
    pub phase: Phase,
}

/// Status LED and reset button, driven from the host loop
pub struct StatusIndicator<B, L> {
    detector: LongPressDetector<B>,
    patterns: PatternSet,
    blink: BlinkDriver<L>,
}

impl<B: InputPin, L: OutputPin> StatusIndicator<B, L> {
    pub fn new(
        detector: LongPressDetector<B>,
        patterns: PatternSet,
        blink: BlinkDriver<L>,
    ) -> Self {
        Self {
            detector,
            patterns,
            blink,
        }
    }

    pub fn detector(&self) -> &LongPressDetector<B> {
        &self.detector
    }

    pub fn blink(&self) -> &BlinkDriver<L> {
        &self.blink
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Run one iteration
    ///
    /// `connectivity` must be sampled once at the start of the iteration.
    /// `reset` is invoked when the long press completes.
    pub fn tick(
        &mut self,
        now: Millis,
        connectivity: Connectivity,
        reset: &mut impl ResetAction,
    ) -> Result<TickOutcome, IndicatorError<B::Error, L::Error>> {
        let event = self
            .detector
            .poll(now, reset)
            .map_err(IndicatorError::Input)?;
        let pattern = self
            .patterns
            .select(connectivity, self.detector.countdown_active(now));
        let phase = self
            .blink
            .tick(pattern, now)
            .map_err(IndicatorError::Output)?;

        Ok(TickOutcome {
            event,
            pattern,
            phase,
        })
    }
}
