use core::net::Ipv4Addr;

use embassy_net::{
    DhcpConfig,
    Ipv4Cidr,
    Runner,
    Stack,
    StackResources,
    StaticConfigV4,
};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{Config as WifiConfig, WifiController, WifiDevice, WifiError};
use heapless::String;

use crate::config::ProvisioningConfig;
use crate::mk_static;

const STATION_SOCKETS: usize = 4;
/// DHCP server plus a few concurrent portal connections
const PORTAL_SOCKETS: usize = 4;

#[derive(Debug)]
pub enum RadioInitError {
    Radio(esp_radio::InitializationError),
    Wifi(WifiError),
    Hostname,
}

/// Radio controller and the two network stacks sharing it
pub struct NetworkParts {
    pub controller: WifiController<'static>,
    /// DHCP client on the station interface
    pub station: Stack<'static>,
    pub station_runner: Runner<'static, WifiDevice<'static>>,
    /// Static address on the access point interface
    pub portal: Stack<'static>,
    pub portal_runner: Runner<'static, WifiDevice<'static>>,
}

pub fn init_network(
    wifi_device: WIFI<'static>,
    config: &ProvisioningConfig,
) -> Result<NetworkParts, RadioInitError> {
    let radio = esp_radio::init().map_err(RadioInitError::Radio)?;
    let radio = &*mk_static!(esp_radio::Controller<'static>, radio);
    let (controller, interfaces) = esp_radio::wifi::new(radio, wifi_device, WifiConfig::default())
        .map_err(RadioInitError::Wifi)?;

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname =
        Some(String::try_from(config.hostname).map_err(|()| RadioInitError::Hostname)?);
    let station_resources = mk_static!(
        StackResources<STATION_SOCKETS>,
        StackResources::<STATION_SOCKETS>::new()
    );
    let (station, station_runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(dhcp_config),
        station_resources,
        get_seed(),
    );

    let portal_address = Ipv4Addr::from(config.portal_address);
    let portal_config = StaticConfigV4 {
        address: Ipv4Cidr::new(portal_address, config.portal_prefix_len),
        gateway: Some(portal_address),
        dns_servers: heapless::Vec::default(),
    };
    let portal_resources = mk_static!(
        StackResources<PORTAL_SOCKETS>,
        StackResources::<PORTAL_SOCKETS>::new()
    );
    let (portal, portal_runner) = embassy_net::new(
        interfaces.ap,
        embassy_net::Config::ipv4_static(portal_config),
        portal_resources,
        get_seed(),
    );

    Ok(NetworkParts {
        controller,
        station,
        station_runner,
        portal,
        portal_runner,
    })
}

fn get_seed() -> u64 {
    let rng = Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}
