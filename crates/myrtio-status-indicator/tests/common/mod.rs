use myrtio_status_indicator::{
    BlinkDriver,
    LongPressDetector,
    PatternSet,
    Polarity,
    StatusIndicator,
    mock::{FakeInput, FakeOutput},
};

/// Active-low reset button and active-high LED wired to a fresh indicator
pub fn indicator(
    patterns: PatternSet,
) -> (FakeInput, FakeOutput, StatusIndicator<FakeInput, FakeOutput>) {
    let button = FakeInput::released();
    let led = FakeOutput::new();
    let indicator = StatusIndicator::new(
        LongPressDetector::new(button.clone(), Polarity::ActiveLow),
        patterns,
        BlinkDriver::new(led.clone(), Polarity::ActiveHigh),
    );
    (button, led, indicator)
}
