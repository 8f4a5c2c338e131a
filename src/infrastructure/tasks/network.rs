use core::sync::atomic::Ordering;

use embassy_net::{Runner, Stack};
use esp_radio::wifi::WifiDevice;

use crate::infrastructure::drivers::{STATION_ADDRESS, STATION_LINK_UP};

/// Background task for running a network stack
///
/// One instance per interface: station and access point.
#[embassy_executor::task(pool_size = 2)]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Publish the station lease state for the provisioning flow
#[embassy_executor::task]
pub async fn station_link_task(stack: Stack<'static>) {
    loop {
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            log::info!("network: station address {}", config.address);
            STATION_ADDRESS.store(config.address.address().to_bits(), Ordering::Relaxed);
        }
        STATION_LINK_UP.store(true, Ordering::Relaxed);

        stack.wait_config_down().await;
        STATION_LINK_UP.store(false, Ordering::Relaxed);
        STATION_ADDRESS.store(0, Ordering::Relaxed);
        log::warn!("network: station address lost");
    }
}
