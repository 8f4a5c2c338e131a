use embedded_hal::digital::{ErrorKind, InputPin, OutputPin};
use myrtio_status_indicator::{Millis, ResetAction, StatusIndicator, TickOutcome, ToggleButton};

use crate::config::PROVISIONING;
use crate::domain::entity::Connectivity;
use crate::domain::ports::{ConnectivityMonitor, ProvisioningProcessor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    Indicator(ErrorKind),
    AuxButton(ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSettings {
    /// Interval of the periodic status line
    pub report_period_ms: u32,
}

/// One main-loop iteration worth of device status work
///
/// Samples connectivity once, runs the status indicator with the provisioning
/// flow as its reset action, then gives provisioning and the auxiliary toggle
/// their turn.
pub struct StatusUsecases<B, L, AB, AL, P> {
    indicator: StatusIndicator<B, L>,
    aux: ToggleButton<AB, AL>,
    provisioning: P,
    settings: StatusSettings,
    last_connectivity: Option<Connectivity>,
    last_report_at: Millis,
}

impl<B, L, AB, AL, P> StatusUsecases<B, L, AB, AL, P>
where
    B: InputPin,
    L: OutputPin,
    AB: InputPin,
    AL: OutputPin,
    P: ConnectivityMonitor + ProvisioningProcessor + ResetAction,
{
    pub fn new(
        indicator: StatusIndicator<B, L>,
        aux: ToggleButton<AB, AL>,
        provisioning: P,
        settings: StatusSettings,
        now: Millis,
    ) -> Self {
        Self {
            indicator,
            aux,
            provisioning,
            settings,
            last_connectivity: None,
            last_report_at: now,
        }
    }

    pub fn indicator(&self) -> &StatusIndicator<B, L> {
        &self.indicator
    }

    pub fn aux(&self) -> &ToggleButton<AB, AL> {
        &self.aux
    }

    pub fn provisioning(&self) -> &P {
        &self.provisioning
    }

    /// Run one iteration
    ///
    /// Provisioning is processed even when the status pins fail, so a broken
    /// LED never stalls the network flow.
    pub fn tick(&mut self, now: Millis) -> Result<TickOutcome, StatusError> {
        let connectivity = self.provisioning.connectivity();
        self.track_connectivity(connectivity);

        let outcome = self
            .indicator
            .tick(now, connectivity, &mut self.provisioning);
        self.provisioning.process(now);

        let outcome = outcome.map_err(|e| StatusError::Indicator(e.kind()))?;
        self.aux
            .poll(now)
            .map_err(|e| StatusError::AuxButton(e.kind()))?;
        self.report(now, connectivity);

        Ok(outcome)
    }

    fn track_connectivity(&mut self, connectivity: Connectivity) {
        if self.last_connectivity == Some(connectivity) {
            return;
        }
        self.last_connectivity = Some(connectivity);
        match connectivity {
            Connectivity::Connected => log::info!("status: wifi connected"),
            Connectivity::Configuring => log::info!(
                "status: configuration portal up, join '{}' and open http://{}",
                PROVISIONING.ap_ssid,
                PortalAddress(PROVISIONING.portal_address)
            ),
            Connectivity::Disconnected => log::info!("status: wifi disconnected"),
        }
    }

    fn report(&mut self, now: Millis, connectivity: Connectivity) {
        if now.wrapping_sub(self.last_report_at) < self.settings.report_period_ms {
            return;
        }
        self.last_report_at = now;
        let uptime_s = now / 1000;
        match connectivity {
            Connectivity::Configuring => log::info!(
                "status: waiting for configuration on '{}' at http://{}, uptime {} s",
                PROVISIONING.ap_ssid,
                PortalAddress(PROVISIONING.portal_address),
                uptime_s
            ),
            Connectivity::Connected => match self.provisioning.station_info() {
                Some(station) => log::info!("status: connected, {station}, uptime {uptime_s} s"),
                None => log::info!("status: connected, uptime {uptime_s} s"),
            },
            Connectivity::Disconnected => {
                log::info!("status: not connected, uptime {} s", uptime_s);
            }
        }
    }
}

struct PortalAddress([u8; 4]);

impl core::fmt::Display for PortalAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}
