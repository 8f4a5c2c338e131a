//! Storage, radio and system doubles for unit tests
//!
//! Pin doubles live in `myrtio_status_indicator::mock`.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    vec::Vec,
};

use crate::core::storage::{StorageDriver, StorageError};
use crate::domain::entity::{LinkState, StationInfo, WifiCredentials};
use crate::domain::ports::{CredentialStore, PortalInbox, SystemControl, WifiRadio};

// ============================================================================
// Storage
// ============================================================================

/// Flash region kept in memory, starting erased
pub(crate) struct MemoryStorageDriver<const N: usize> {
    bytes: Rc<RefCell<[u8; N]>>,
    fail_next: Rc<Cell<bool>>,
}

impl<const N: usize> MemoryStorageDriver<N> {
    pub(crate) fn erased() -> Self {
        Self {
            bytes: Rc::new(RefCell::new([0xFF; N])),
            fail_next: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn bytes(&self) -> Rc<RefCell<[u8; N]>> {
        Rc::clone(&self.bytes)
    }

    /// Make the next driver call fail
    pub(crate) fn fail_next(&self) {
        self.fail_next.set(true);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_next.replace(false) {
            return Err(StorageError::DriverError);
        }
        Ok(())
    }
}

impl<const N: usize> StorageDriver<N> for MemoryStorageDriver<N> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check()?;
        buffer.copy_from_slice(&self.bytes.borrow()[..buffer.len()]);
        Ok(())
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
        self.check()?;
        self.bytes.borrow_mut()[..buffer.len()].copy_from_slice(buffer);
        Ok(())
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.check()?;
        self.bytes.borrow_mut().fill(0xFF);
        Ok(())
    }
}

/// Credential store shared with the test body
#[derive(Clone, Default)]
pub(crate) struct MemoryCredentialStore {
    pub(crate) stored: Rc<RefCell<Option<WifiCredentials>>>,
    pub(crate) failing: Rc<Cell<bool>>,
    pub(crate) erases: Rc<Cell<usize>>,
}

impl MemoryCredentialStore {
    pub(crate) fn with(credentials: WifiCredentials) -> Self {
        let store = Self::default();
        *store.stored.borrow_mut() = Some(credentials);
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&mut self) -> Result<WifiCredentials, StorageError> {
        if self.failing.get() {
            return Err(StorageError::DriverError);
        }
        self.stored
            .borrow()
            .clone()
            .ok_or(StorageError::InvalidMagicHeader)
    }

    fn save(&mut self, credentials: &WifiCredentials) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::DriverError);
        }
        *self.stored.borrow_mut() = Some(credentials.clone());
        Ok(())
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.erases.set(self.erases.get() + 1);
        if self.failing.get() {
            return Err(StorageError::DriverError);
        }
        *self.stored.borrow_mut() = None;
        Ok(())
    }
}

// ============================================================================
// Radio, system and portal
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RadioCall {
    Connect(WifiCredentials),
    StartAccessPoint,
    StopAccessPoint,
}

#[derive(Clone)]
pub(crate) struct FakeRadio {
    pub(crate) calls: Rc<RefCell<Vec<RadioCall>>>,
    pub(crate) link: Rc<Cell<LinkState>>,
    pub(crate) station: Rc<Cell<Option<StationInfo>>>,
}

impl FakeRadio {
    pub(crate) fn new() -> Self {
        Self {
            calls: Rc::default(),
            link: Rc::new(Cell::new(LinkState::Down)),
            station: Rc::default(),
        }
    }

    pub(crate) fn take_calls(&self) -> Vec<RadioCall> {
        self.calls.take()
    }
}

impl WifiRadio for FakeRadio {
    fn connect_station(&mut self, credentials: &WifiCredentials) {
        self.calls
            .borrow_mut()
            .push(RadioCall::Connect(credentials.clone()));
    }

    fn start_access_point(&mut self) {
        self.calls.borrow_mut().push(RadioCall::StartAccessPoint);
    }

    fn stop_access_point(&mut self) {
        self.calls.borrow_mut().push(RadioCall::StopAccessPoint);
    }

    fn link_state(&self) -> LinkState {
        self.link.get()
    }

    fn station_info(&self) -> Option<StationInfo> {
        self.station.get()
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeSystem {
    pub(crate) restarts: Rc<Cell<usize>>,
    pub(crate) delays: Rc<RefCell<Vec<u32>>>,
}

impl SystemControl for FakeSystem {
    fn restart(&mut self) {
        self.restarts.set(self.restarts.get() + 1);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.borrow_mut().push(ms);
    }
}

#[derive(Clone, Default)]
pub(crate) struct QueueInbox {
    pub(crate) queue: Rc<RefCell<VecDeque<WifiCredentials>>>,
}

impl QueueInbox {
    pub(crate) fn submit(&self, credentials: WifiCredentials) {
        self.queue.borrow_mut().push_back(credentials);
    }
}

impl PortalInbox for QueueInbox {
    fn take_submission(&mut self) -> Option<WifiCredentials> {
        self.queue.borrow_mut().pop_front()
    }
}

pub(crate) fn credentials(ssid: &str, password: &str) -> WifiCredentials {
    WifiCredentials::new(ssid, password).unwrap()
}
