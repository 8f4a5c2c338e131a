use crate::core::storage::{PersistentStorage, StorageDriver, StorageError};
use crate::domain::entity::{CREDENTIALS_RECORD_SIZE, CREDENTIALS_STORAGE_SIZE, WifiCredentials};
use crate::domain::ports::CredentialStore;

/// Station credentials kept in a dedicated flash region
pub struct FlashCredentialStore<D: StorageDriver<CREDENTIALS_STORAGE_SIZE>> {
    storage: PersistentStorage<D, CREDENTIALS_STORAGE_SIZE>,
}

impl<D: StorageDriver<CREDENTIALS_STORAGE_SIZE>> FlashCredentialStore<D> {
    pub fn new(driver: D) -> Self {
        Self {
            storage: PersistentStorage::new(driver),
        }
    }
}

impl<D: StorageDriver<CREDENTIALS_STORAGE_SIZE>> CredentialStore for FlashCredentialStore<D> {
    fn load(&mut self) -> Result<WifiCredentials, StorageError> {
        self.storage.load::<CREDENTIALS_RECORD_SIZE, WifiCredentials>()
    }

    fn save(&mut self, credentials: &WifiCredentials) -> Result<(), StorageError> {
        self.storage.save(credentials)
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.storage.erase()
    }
}
