use embedded_hal::digital::{Error, ErrorKind};

/// Error raised by a pin access inside the indicator core
///
/// The core itself has no failure modes; only the underlying pins can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorError<I, O> {
    /// Sampling the button input failed
    Input(I),
    /// Driving the LED output failed
    Output(O),
}

impl<I: Error, O: Error> IndicatorError<I, O> {
    /// Hardware-independent error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndicatorError::Input(e) => e.kind(),
            IndicatorError::Output(e) => e.kind(),
        }
    }
}
