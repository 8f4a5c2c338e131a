//! Flash storage driver for the credentials partition.
//!
//! The driver owns the flash exclusively; nothing else in the firmware
//! touches it.

use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;

use crate::core::storage::{StorageDriver, StorageError};

pub(crate) const BLOCK_SIZE: u32 = 4096;

/// Region of `SIZE` bytes at the start of one flash sector
pub struct EspFlashStorageDriver<const SIZE: usize> {
    flash: &'static mut FlashStorage<'static>,
    addr: u32,
}

impl<const SIZE: usize> EspFlashStorageDriver<SIZE> {
    /// `addr` must be sector aligned
    pub fn new(flash: &'static mut FlashStorage<'static>, addr: u32) -> Self {
        const { assert!(SIZE as u32 <= BLOCK_SIZE && SIZE % 4 == 0) };
        Self { flash, addr }
    }
}

impl<const SIZE: usize> StorageDriver<SIZE> for EspFlashStorageDriver<SIZE> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.flash.read(self.addr, buffer).map_err(|e| {
            log::error!("flash: read at {:#x} failed: {e:?}", self.addr);
            StorageError::DriverError
        })
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
        self.erase()?;
        self.flash.write(self.addr, buffer).map_err(|e| {
            log::error!("flash: write at {:#x} failed: {e:?}", self.addr);
            StorageError::DriverError
        })
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.flash
            .erase(self.addr, self.addr + BLOCK_SIZE)
            .map_err(|e| {
                log::error!("flash: erase at {:#x} failed: {e:?}", self.addr);
                StorageError::DriverError
            })
    }
}
