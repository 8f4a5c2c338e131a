use core::net::Ipv4Addr;
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::domain::entity::{LinkState, StationInfo, WifiCredentials};
use crate::domain::ports::WifiRadio;
use crate::domain::radio::RadioCommand;

const RADIO_QUEUE_SIZE: usize = 4;

pub(crate) static RADIO_COMMANDS: Channel<CriticalSectionRawMutex, RadioCommand, RADIO_QUEUE_SIZE> =
    Channel::new();

/// Set while the station interface holds a DHCP lease
pub(crate) static STATION_LINK_UP: AtomicBool = AtomicBool::new(false);
/// Leased station address, zero without a lease
pub(crate) static STATION_ADDRESS: AtomicU32 = AtomicU32::new(0);
/// Last sampled station RSSI in dBm
pub(crate) static STATION_RSSI: AtomicI32 = AtomicI32::new(RSSI_UNKNOWN);

pub(crate) const RSSI_UNKNOWN: i32 = i32::MIN;

/// Non-blocking radio front end for the provisioning flow
///
/// Requests are queued for `wifi_control_task`; link state is published by
/// `station_link_task`.
#[derive(Debug, Default)]
pub struct EspWifiRadio;

impl EspWifiRadio {
    pub fn new() -> Self {
        Self
    }

    fn request(&self, command: RadioCommand) {
        if let Err(e) = RADIO_COMMANDS.try_send(command) {
            log::warn!("wifi: command queue full, dropped {e:?}");
        }
    }
}

impl WifiRadio for EspWifiRadio {
    fn connect_station(&mut self, credentials: &WifiCredentials) {
        self.request(RadioCommand::Connect(credentials.clone()));
    }

    fn start_access_point(&mut self) {
        self.request(RadioCommand::StartAccessPoint);
    }

    fn stop_access_point(&mut self) {
        self.request(RadioCommand::StopAccessPoint);
    }

    fn link_state(&self) -> LinkState {
        if STATION_LINK_UP.load(Ordering::Relaxed) {
            LinkState::Up
        } else {
            LinkState::Down
        }
    }

    fn station_info(&self) -> Option<StationInfo> {
        let address = STATION_ADDRESS.load(Ordering::Relaxed);
        if self.link_state() == LinkState::Down || address == 0 {
            return None;
        }
        Some(StationInfo {
            address: Ipv4Addr::from_bits(address),
            rssi_dbm: i8::try_from(STATION_RSSI.load(Ordering::Relaxed)).ok(),
        })
    }
}
