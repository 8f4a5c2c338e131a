use esp_hal::delay::Delay;

use crate::domain::ports::SystemControl;

pub struct EspSystemControl {
    delay: Delay,
}

impl EspSystemControl {
    pub fn new() -> Self {
        Self {
            delay: Delay::new(),
        }
    }
}

impl Default for EspSystemControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemControl for EspSystemControl {
    fn restart(&mut self) {
        esp_hal::system::software_reset();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_millis(ms);
    }
}
