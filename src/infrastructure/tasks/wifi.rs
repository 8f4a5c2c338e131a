use core::convert::Infallible;
use core::pin::pin;
use core::sync::atomic::Ordering;

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    AccessPointConfig,
    AuthMethod,
    ClientConfig,
    ModeConfig,
    WifiController,
    WifiError,
    WifiEvent,
    WifiStaState,
};

use crate::domain::entity::WifiCredentials;
use crate::domain::radio::RadioPlan;
use crate::infrastructure::drivers::{RADIO_COMMANDS, RSSI_UNKNOWN, STATION_RSSI};

const RECONNECT_DELAY: Duration = Duration::from_millis(2000);
const RETRY_DELAY: Duration = Duration::from_millis(5000);
const RSSI_REFRESH: Duration = Duration::from_secs(10);

fn mode_config(plan: &RadioPlan, ap_ssid: &str) -> Option<ModeConfig> {
    let access_point = || {
        AccessPointConfig::default()
            .with_ssid(ap_ssid.into())
            .with_auth_method(AuthMethod::None)
    };
    match (&plan.station, plan.access_point) {
        (Some(credentials), false) => Some(ModeConfig::Client(client_config(credentials))),
        (Some(credentials), true) => {
            Some(ModeConfig::ApSta(client_config(credentials), access_point()))
        }
        (None, true) => Some(ModeConfig::AccessPoint(access_point())),
        (None, false) => None,
    }
}

fn client_config(credentials: &WifiCredentials) -> ClientConfig {
    let config = ClientConfig::default().with_ssid(credentials.ssid.as_str().into());
    if credentials.is_open() {
        config.with_auth_method(AuthMethod::None)
    } else {
        config.with_password(credentials.password.as_str().into())
    }
}

/// Background task owning the Wi-Fi controller
///
/// Applies queued radio commands and keeps the station connected while one
/// is configured. The radio is restarted only when a command changes the
/// plan.
#[embassy_executor::task]
pub async fn wifi_control_task(mut controller: WifiController<'static>, ap_ssid: &'static str) {
    let mut plan = RadioPlan::default();

    loop {
        {
            // Commands that leave the plan as is must not interrupt a
            // reconnect in flight.
            let mut keeper = pin!(keep_station_connected(&mut controller, plan.station.is_some()));
            loop {
                match select(RADIO_COMMANDS.receive(), keeper.as_mut()).await {
                    Either::First(command) => {
                        if plan.apply(command) {
                            break;
                        }
                        log::debug!("wifi: radio already in the requested mode");
                    }
                    Either::Second(never) => match never {},
                }
            }
        }

        if let Err(e) = reconfigure(&mut controller, &plan, ap_ssid).await {
            log::error!("wifi: reconfiguration failed: {e:?}");
        }
    }
}

async fn reconfigure(
    controller: &mut WifiController<'static>,
    plan: &RadioPlan,
    ap_ssid: &str,
) -> Result<(), WifiError> {
    if matches!(controller.is_started(), Ok(true)) {
        controller.stop_async().await?;
    }
    let Some(mode) = mode_config(plan, ap_ssid) else {
        log::info!("wifi: radio idle");
        return Ok(());
    };

    controller.set_config(&mode)?;
    controller.start_async().await?;
    log::info!(
        "wifi: radio started (station: {}, access point: {})",
        plan.station.is_some(),
        plan.access_point
    );
    Ok(())
}

async fn keep_station_connected(
    controller: &mut WifiController<'static>,
    enabled: bool,
) -> Infallible {
    if !enabled {
        return core::future::pending().await;
    }

    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            sample_rssi(controller);
            let disconnected = select(
                controller.wait_for_event(WifiEvent::StaDisconnected),
                Timer::after(RSSI_REFRESH),
            )
            .await;
            if let Either::Second(()) = disconnected {
                continue;
            }
            STATION_RSSI.store(RSSI_UNKNOWN, Ordering::Relaxed);
            Timer::after(RECONNECT_DELAY).await;
        }

        log::info!("wifi: connecting");
        if let Err(e) = controller.connect_async().await {
            log::warn!("wifi: connect failed: {e:?}");
            Timer::after(RETRY_DELAY).await;
        }
    }
}

fn sample_rssi(controller: &WifiController<'static>) {
    match controller.rssi() {
        Ok(rssi) => STATION_RSSI.store(rssi, Ordering::Relaxed),
        Err(e) => log::debug!("wifi: rssi unavailable: {e:?}"),
    }
}
