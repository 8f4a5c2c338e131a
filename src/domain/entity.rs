use core::fmt;
use core::net::Ipv4Addr;

use heapless::String;
pub use myrtio_status_indicator::Connectivity;
use myrtio_status_indicator::Millis;

use crate::core::storage::{Encodable, MAGIC_HEADER_SIZE};

pub const SSID_MAX_LEN: usize = 32;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Length-prefixed SSID followed by length-prefixed password
pub const CREDENTIALS_RECORD_SIZE: usize = 1 + SSID_MAX_LEN + 1 + PASSWORD_MAX_LEN;
/// Flash footprint of the credential record including its header
pub const CREDENTIALS_STORAGE_SIZE: usize = MAGIC_HEADER_SIZE + CREDENTIALS_RECORD_SIZE;

const PASSWORD_OFFSET: usize = 1 + SSID_MAX_LEN;

/// Station credentials of the network to join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String<SSID_MAX_LEN>,
    pub password: String<PASSWORD_MAX_LEN>,
}

impl WifiCredentials {
    /// Returns `None` if the SSID is empty or either field is too long
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        if ssid.is_empty() {
            return None;
        }
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }

    /// Open networks have no password
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

impl Encodable<CREDENTIALS_RECORD_SIZE> for WifiCredentials {
    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self) -> [u8; CREDENTIALS_RECORD_SIZE] {
        let mut data = [0u8; CREDENTIALS_RECORD_SIZE];

        let ssid = self.ssid.as_bytes();
        data[0] = ssid.len() as u8;
        data[1..=ssid.len()].copy_from_slice(ssid);

        let password = self.password.as_bytes();
        data[PASSWORD_OFFSET] = password.len() as u8;
        data[PASSWORD_OFFSET + 1..=PASSWORD_OFFSET + password.len()].copy_from_slice(password);

        data
    }

    fn decode(data: &[u8]) -> Option<Self> {
        let ssid_len = usize::from(*data.first()?);
        let password_len = usize::from(*data.get(PASSWORD_OFFSET)?);
        if ssid_len > SSID_MAX_LEN || password_len > PASSWORD_MAX_LEN {
            return None;
        }

        let ssid = core::str::from_utf8(data.get(1..=ssid_len)?).ok()?;
        let password = core::str::from_utf8(
            data.get(PASSWORD_OFFSET + 1..=PASSWORD_OFFSET + password_len)?,
        )
        .ok()?;

        Self::new(ssid, password)
    }
}

/// Station link as reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Down,
    Up,
}

/// Station link details for the status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationInfo {
    pub address: Ipv4Addr,
    /// Signal strength, once the radio has sampled it
    pub rssi_dbm: Option<i8>,
}

impl fmt::Display for StationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IP: {}", self.address)?;
        match self.rssi_dbm {
            Some(rssi) => write!(f, " | RSSI: {rssi} dBm"),
            None => write!(f, " | RSSI: unknown"),
        }
    }
}

/// Provisioning flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningMode {
    /// Not started yet
    Idle,
    /// Joining the stored network
    Connecting { since: Millis },
    /// Configuration portal is open
    Portal { since: Millis },
    Connected,
    /// New credentials saved, waiting for the restart
    Restarting { since: Millis },
}

impl ProvisioningMode {
    /// Connectivity as seen by the status indicator
    pub const fn connectivity(self) -> Connectivity {
        match self {
            ProvisioningMode::Portal { .. } => Connectivity::Configuring,
            ProvisioningMode::Connected => Connectivity::Connected,
            ProvisioningMode::Idle
            | ProvisioningMode::Connecting { .. }
            | ProvisioningMode::Restarting { .. } => Connectivity::Disconnected,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_validates_lengths() {
        assert!(WifiCredentials::new("home", "").is_some());
        assert!(WifiCredentials::new("", "secret").is_none());
        assert!(WifiCredentials::new(&"s".repeat(32), &"p".repeat(64)).is_some());
        assert!(WifiCredentials::new(&"s".repeat(33), "").is_none());
        assert!(WifiCredentials::new("home", &"p".repeat(65)).is_none());
    }

    #[test]
    fn record_layout() {
        let data = WifiCredentials::new("ab", "xyz").unwrap().encode();
        assert_eq!(data.len(), 98);
        assert_eq!(data[..3], [2, b'a', b'b']);
        assert_eq!(data[33..37], [3, b'x', b'y', b'z']);
        assert!(data[3..33].iter().all(|b| *b == 0));
    }

    #[test]
    fn decode_full_length_fields() {
        let credentials = WifiCredentials::new(&"s".repeat(32), &"p".repeat(64)).unwrap();
        let decoded = WifiCredentials::decode(&credentials.encode());
        assert_eq!(decoded, Some(credentials));
    }

    #[test]
    fn decode_rejects_erased_flash() {
        assert_eq!(
            WifiCredentials::decode(&[0xFF; CREDENTIALS_RECORD_SIZE]),
            None
        );
        // zero-length SSID
        assert_eq!(
            WifiCredentials::decode(&[0u8; CREDENTIALS_RECORD_SIZE]),
            None
        );
        assert_eq!(WifiCredentials::decode(&[4, b'a']), None);
    }

    #[test]
    fn station_info_display() {
        let info = StationInfo {
            address: Ipv4Addr::new(192, 168, 1, 42),
            rssi_dbm: Some(-61),
        };
        assert_eq!(std::format!("{info}"), "IP: 192.168.1.42 | RSSI: -61 dBm");

        let info = StationInfo {
            rssi_dbm: None,
            ..info
        };
        assert_eq!(std::format!("{info}"), "IP: 192.168.1.42 | RSSI: unknown");
    }

    #[test]
    fn mode_connectivity() {
        assert_eq!(
            ProvisioningMode::Portal { since: 0 }.connectivity(),
            Connectivity::Configuring
        );
        assert_eq!(
            ProvisioningMode::Connected.connectivity(),
            Connectivity::Connected
        );
        assert_eq!(
            ProvisioningMode::Connecting { since: 0 }.connectivity(),
            Connectivity::Disconnected
        );
        assert_eq!(
            ProvisioningMode::Restarting { since: 0 }.connectivity(),
            Connectivity::Disconnected
        );
    }
}
