use myrtio_status_indicator::Millis;

use crate::core::storage::StorageError;
use crate::domain::entity::{Connectivity, LinkState, StationInfo, WifiCredentials};

/// Reader interface for the network connectivity
pub trait ConnectivityMonitor {
    /// Sample the current connectivity. Called once per loop iteration.
    fn connectivity(&self) -> Connectivity;
    /// Address and signal of the joined network, while connected
    fn station_info(&self) -> Option<StationInfo>;
}

/// Non-blocking background work driven by the main loop
pub trait ProvisioningProcessor {
    /// Advance provisioning. Must return promptly.
    fn process(&mut self, now: Millis);
}

/// Control interface for the Wi-Fi radio
///
/// Requests are queued and applied by the radio in the background.
pub trait WifiRadio {
    /// Join the given network and keep reconnecting until told otherwise
    fn connect_station(&mut self, credentials: &WifiCredentials);
    /// Open the configuration access point alongside the station
    fn start_access_point(&mut self);
    fn stop_access_point(&mut self);
    fn link_state(&self) -> LinkState;
    fn station_info(&self) -> Option<StationInfo>;
}

/// Persistence interface for the station credentials
pub trait CredentialStore {
    fn load(&mut self) -> Result<WifiCredentials, StorageError>;
    fn save(&mut self, credentials: &WifiCredentials) -> Result<(), StorageError>;
    fn erase(&mut self) -> Result<(), StorageError>;
}

/// Source of credentials submitted through the configuration portal
pub trait PortalInbox {
    fn take_submission(&mut self) -> Option<WifiCredentials>;
}

/// System-level control
pub trait SystemControl {
    /// Restart the device. Does not return on hardware.
    fn restart(&mut self);
    /// Blocking delay
    fn delay_ms(&mut self, ms: u32);
}
