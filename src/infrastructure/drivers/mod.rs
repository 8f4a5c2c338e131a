mod clock;
mod flash_storage;
mod network;
mod wifi;

pub use clock::now_millis;
pub use flash_storage::EspFlashStorageDriver;
pub use network::{NetworkParts, RadioInitError, init_network};
pub use wifi::EspWifiRadio;
pub(crate) use wifi::{RADIO_COMMANDS, RSSI_UNKNOWN, STATION_ADDRESS, STATION_LINK_UP, STATION_RSSI};
