use myrtio_status_indicator::{Millis, ResetAction};

use crate::core::storage::StorageError;
use crate::domain::entity::{
    Connectivity,
    LinkState,
    ProvisioningMode,
    StationInfo,
    WifiCredentials,
};
use crate::domain::ports::{
    ConnectivityMonitor,
    CredentialStore,
    PortalInbox,
    ProvisioningProcessor,
    SystemControl,
    WifiRadio,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningError {
    Storage(StorageError),
}

/// Timing of the provisioning flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisioningSettings {
    /// Station connect attempt length before the portal opens
    pub connect_timeout_ms: u32,
    /// Portal lifetime before the stored network is retried
    pub portal_timeout_ms: u32,
    /// Pause between saving credentials or erasing them and the restart
    pub restart_delay_ms: u32,
}

/// Wi-Fi provisioning flow
///
/// Joins the stored network, falls back to a configuration portal when there
/// is nothing stored or the network cannot be reached, and restarts the
/// device once new credentials are submitted.
pub struct ProvisioningUsecases<R, S, C, I> {
    radio: R,
    store: S,
    system: C,
    inbox: I,
    settings: ProvisioningSettings,
    credentials: Option<WifiCredentials>,
    mode: ProvisioningMode,
    restart_issued: bool,
}

impl<R, S, C, I> ProvisioningUsecases<R, S, C, I>
where
    R: WifiRadio,
    S: CredentialStore,
    C: SystemControl,
    I: PortalInbox,
{
    pub fn new(radio: R, store: S, system: C, inbox: I, settings: ProvisioningSettings) -> Self {
        Self {
            radio,
            store,
            system,
            inbox,
            settings,
            credentials: None,
            mode: ProvisioningMode::Idle,
            restart_issued: false,
        }
    }

    pub fn mode(&self) -> ProvisioningMode {
        self.mode
    }

    pub fn credentials(&self) -> Option<&WifiCredentials> {
        self.credentials.as_ref()
    }

    /// Load stored credentials and start joining, or open the portal
    pub fn start(&mut self, now: Millis) {
        match self.store.load() {
            Ok(credentials) => {
                log::info!("provisioning: joining '{}'", credentials.ssid);
                self.radio.connect_station(&credentials);
                self.credentials = Some(credentials);
                self.mode = ProvisioningMode::Connecting { since: now };
            }
            Err(StorageError::DriverError) => {
                log::error!("provisioning: credential storage is unreadable");
                self.open_portal(now);
            }
            Err(_) => {
                log::info!("provisioning: no stored credentials");
                self.open_portal(now);
            }
        }
    }

    /// Persist new credentials and schedule a restart
    pub fn submit_credentials(
        &mut self,
        credentials: WifiCredentials,
        now: Millis,
    ) -> Result<(), ProvisioningError> {
        self.store
            .save(&credentials)
            .map_err(ProvisioningError::Storage)?;

        log::info!(
            "provisioning: credentials for '{}' saved, restarting in {} ms",
            credentials.ssid,
            self.settings.restart_delay_ms
        );
        self.credentials = Some(credentials);
        self.mode = ProvisioningMode::Restarting { since: now };
        Ok(())
    }

    fn open_portal(&mut self, now: Millis) {
        log::info!("provisioning: configuration portal open");
        self.radio.start_access_point();
        self.mode = ProvisioningMode::Portal { since: now };
    }

    fn connecting(&mut self, since: Millis, now: Millis) -> ProvisioningMode {
        if self.radio.link_state() == LinkState::Up {
            log::info!("provisioning: station connected");
            return ProvisioningMode::Connected;
        }
        if now.wrapping_sub(since) < self.settings.connect_timeout_ms {
            return ProvisioningMode::Connecting { since };
        }

        log::warn!(
            "provisioning: no connection after {} ms",
            self.settings.connect_timeout_ms
        );
        self.radio.start_access_point();
        ProvisioningMode::Portal { since: now }
    }

    fn portal(&mut self, since: Millis, now: Millis) -> ProvisioningMode {
        if self.radio.link_state() == LinkState::Up {
            log::info!("provisioning: station connected, closing portal");
            self.radio.stop_access_point();
            return ProvisioningMode::Connected;
        }
        if now.wrapping_sub(since) < self.settings.portal_timeout_ms {
            return ProvisioningMode::Portal { since };
        }

        // The station stays configured while the portal is open, so closing
        // the portal is enough to retry it.
        match &self.credentials {
            Some(credentials) => {
                log::info!("provisioning: portal timed out, retrying '{}'", credentials.ssid);
                self.radio.stop_access_point();
                ProvisioningMode::Connecting { since: now }
            }
            None => {
                log::info!("provisioning: still waiting for credentials");
                ProvisioningMode::Portal { since: now }
            }
        }
    }

    fn connected(&mut self, now: Millis) -> ProvisioningMode {
        if self.radio.link_state() == LinkState::Up {
            return ProvisioningMode::Connected;
        }

        log::warn!("provisioning: station link lost, radio is reconnecting");
        ProvisioningMode::Connecting { since: now }
    }

    fn restarting(&mut self, since: Millis, now: Millis) -> ProvisioningMode {
        if !self.restart_issued && now.wrapping_sub(since) >= self.settings.restart_delay_ms {
            log::info!("provisioning: restarting");
            self.restart_issued = true;
            self.system.restart();
        }
        ProvisioningMode::Restarting { since }
    }
}

impl<R, S, C, I> ProvisioningProcessor for ProvisioningUsecases<R, S, C, I>
where
    R: WifiRadio,
    S: CredentialStore,
    C: SystemControl,
    I: PortalInbox,
{
    fn process(&mut self, now: Millis) {
        if let Some(credentials) = self.inbox.take_submission()
            && let Err(e) = self.submit_credentials(credentials, now)
        {
            log::error!("provisioning: failed to save credentials: {e:?}");
        }

        self.mode = match self.mode {
            ProvisioningMode::Idle => ProvisioningMode::Idle,
            ProvisioningMode::Connecting { since } => self.connecting(since, now),
            ProvisioningMode::Portal { since } => self.portal(since, now),
            ProvisioningMode::Connected => self.connected(now),
            ProvisioningMode::Restarting { since } => self.restarting(since, now),
        };
    }
}

impl<R, S, C, I> ConnectivityMonitor for ProvisioningUsecases<R, S, C, I>
where
    R: WifiRadio,
{
    fn connectivity(&self) -> Connectivity {
        self.mode.connectivity()
    }

    fn station_info(&self) -> Option<StationInfo> {
        match self.mode {
            ProvisioningMode::Connected => self.radio.station_info(),
            _ => None,
        }
    }
}

impl<R, S, C, I> ResetAction for ProvisioningUsecases<R, S, C, I>
where
    R: WifiRadio,
    S: CredentialStore,
    C: SystemControl,
    I: PortalInbox,
{
    fn reset_and_restart(&mut self) {
        match self.store.erase() {
            Ok(()) => log::warn!("provisioning: stored credentials erased"),
            Err(e) => log::error!("provisioning: failed to erase credentials: {e:?}"),
        }
        self.credentials = None;
        self.system.delay_ms(self.settings.restart_delay_ms);
        log::info!("provisioning: restarting");
        self.system.restart();
    }
}
