//! Pin doubles for host tests
//!
//! Available in test builds and with the `mock` feature. Handles are cheap
//! clones sharing one level, so a test keeps a copy while the driver under
//! test owns the other.

extern crate alloc;

use alloc::rc::Rc;
use core::{cell::Cell, convert::Infallible};

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::ResetAction;

/// Input pin whose level is set by the test
#[derive(Clone)]
pub struct FakeInput {
    high: Rc<Cell<bool>>,
}

impl FakeInput {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
        }
    }

    /// Pull-up button at rest
    pub fn released() -> Self {
        Self::new(true)
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }

    /// Pull an active-low button to ground
    pub fn press(&self) {
        self.set_high(false);
    }

    pub fn release(&self) {
        self.set_high(true);
    }
}

impl ErrorType for FakeInput {
    type Error = Infallible;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}

/// Output pin recording its level and the number of writes
#[derive(Clone, Default)]
pub struct FakeOutput {
    high: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Change the level behind the driver's back
    pub fn force(&self, high: bool) {
        self.high.set(high);
    }

    fn write(&self, high: bool) {
        self.high.set(high);
        self.writes.set(self.writes.get() + 1);
    }
}

impl ErrorType for FakeOutput {
    type Error = Infallible;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Pin that fails every access
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

/// Reset action counting its invocations
#[derive(Debug, Default)]
pub struct CountingReset {
    pub calls: usize,
}

impl ResetAction for CountingReset {
    fn reset_and_restart(&mut self) {
        self.calls += 1;
    }
}
