//! Flash record framing
//!
//! Every record starts with a little-endian magic header so that erased or
//! foreign flash contents are never mistaken for valid data.

const MAGIC_HEADER: u16 = 0xBEEF;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    DriverError,
    InvalidMagicHeader,
    InvalidData,
}

pub trait Encodable<const SIZE: usize>
where
    Self: Sized,
{
    fn encode(&self) -> [u8; SIZE];
    fn decode(data: &[u8]) -> Option<Self>;
}

/// Raw access to a fixed-size flash region
pub trait StorageDriver<const STORAGE_SIZE: usize> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError>;
    fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError>;
    /// Return the region to the erased state
    fn erase(&mut self) -> Result<(), StorageError>;
}

/// Persistent storage implementation using a storage driver.
pub struct PersistentStorage<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize> {
    driver: DRIVER,
}

impl<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize>
    PersistentStorage<DRIVER, STORAGE_SIZE>
{
    pub fn new(driver: DRIVER) -> Self {
        Self { driver }
    }

    /// Load a record from flash
    pub fn load<const SIZE: usize, T: Encodable<SIZE>>(&mut self) -> Result<T, StorageError> {
        const { assert!(MAGIC_HEADER_SIZE + SIZE <= STORAGE_SIZE) };

        let mut buffer = [0u8; STORAGE_SIZE];
        self.driver
            .read(&mut buffer)
            .map_err(|_| StorageError::DriverError)?;

        let magic = u16::from_le_bytes([buffer[0], buffer[1]]);
        if magic != MAGIC_HEADER {
            return Err(StorageError::InvalidMagicHeader);
        }
        T::decode(&buffer[MAGIC_HEADER_SIZE..MAGIC_HEADER_SIZE + SIZE])
            .ok_or(StorageError::InvalidData)
    }

    /// Save a record to flash, replacing the previous one
    pub fn save<const SIZE: usize, T: Encodable<SIZE>>(
        &mut self,
        value: &T,
    ) -> Result<(), StorageError> {
        const { assert!(MAGIC_HEADER_SIZE + SIZE <= STORAGE_SIZE) };

        let mut data = [0u8; STORAGE_SIZE];
        data[0..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        data[MAGIC_HEADER_SIZE..MAGIC_HEADER_SIZE + SIZE].copy_from_slice(&value.encode());

        self.driver
            .write(&data)
            .map_err(|_| StorageError::DriverError)
    }

    /// Erase the record. A subsequent `load` fails with `InvalidMagicHeader`.
    pub fn erase(&mut self) -> Result<(), StorageError> {
        self.driver.erase().map_err(|_| StorageError::DriverError)
    }
}
