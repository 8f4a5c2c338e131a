#![allow(clippy::unreadable_literal)]

use myrtio_status_indicator::{PatternSet, Polarity};

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

pub struct PinConfig {
    pub status_led: Polarity,
    pub reset_button: Polarity,
    pub aux_led: Polarity,
    pub aux_button: Polarity,
}

pub struct IndicatorConfig {
    pub patterns: PatternSet,
    pub long_press_ms: u32,
    pub press_debounce_ms: u32,
    pub aux_lockout_ms: u32,
}

pub struct LoopConfig {
    pub pause_ms: u64,
    pub status_report_period_ms: u32,
}

pub struct ProvisioningConfig {
    pub ap_ssid: &'static str,
    /// DHCP hostname of the station interface
    pub hostname: &'static str,
    pub portal_address: [u8; 4],
    pub portal_prefix_len: u8,
    pub http_port: u16,
    pub connect_timeout_ms: u32,
    pub portal_timeout_ms: u32,
    pub restart_delay_ms: u32,
}

pub struct StorageConfig {
    /// Flash offset of the `wifi_creds` partition
    pub credentials_offset: u32,
}

/// Built-in LED and BOOT button are both active-low on the supermini board
pub const PINS: PinConfig = PinConfig {
    status_led: Polarity::ActiveLow,
    reset_button: Polarity::ActiveLow,
    aux_led: Polarity::ActiveHigh,
    aux_button: Polarity::ActiveLow,
};

pub const INDICATOR: IndicatorConfig = IndicatorConfig {
    patterns: PatternSet::new(),
    long_press_ms: 5000,
    press_debounce_ms: 0,
    aux_lockout_ms: 50,
};

pub const LOOP: LoopConfig = LoopConfig {
    pause_ms: 5,
    status_report_period_ms: 30_000,
};

pub const PROVISIONING: ProvisioningConfig = ProvisioningConfig {
    ap_ssid: "ESP32-C3-Supermini",
    hostname: "esp32-c3-supermini",
    portal_address: [192, 168, 4, 1],
    portal_prefix_len: 24,
    http_port: 80,
    connect_timeout_ms: 10_000,
    portal_timeout_ms: 180_000,
    restart_delay_ms: 1000,
};

pub const STORAGE: StorageConfig = StorageConfig {
    credentials_offset: 0x31_0000,
};

#[macro_export]
macro_rules! status_led_gpio {
    ($p:expr) => {
        $p.GPIO8
    };
}

#[macro_export]
macro_rules! reset_button_gpio {
    ($p:expr) => {
        $p.GPIO9
    };
}

#[macro_export]
macro_rules! aux_led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}

#[macro_export]
macro_rules! aux_button_gpio {
    ($p:expr) => {
        $p.GPIO3
    };
}
