#![no_std]
#![no_main]

use core::net::Ipv4Addr;

use embassy_executor::Spawner;
use embassy_time::Timer;
use embedded_hal::digital::PinState;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    interrupt::software::SoftwareInterruptControl,
    timer::timg::TimerGroup,
};
use esp_storage::FlashStorage;

use myrtio_esp_status::app::usecases::{
    ProvisioningSettings,
    ProvisioningUsecases,
    StatusSettings,
    StatusUsecases,
};
use myrtio_esp_status::config::{BUILD_VERSION, INDICATOR, LOOP, PINS, PROVISIONING, STORAGE};
use myrtio_esp_status::controllers::portal::PortalHttpController;
use myrtio_esp_status::infrastructure::drivers::{
    EspFlashStorageDriver,
    EspWifiRadio,
    init_network,
    now_millis,
};
use myrtio_esp_status::infrastructure::repositories::FlashCredentialStore;
use myrtio_esp_status::infrastructure::services::{
    ChannelPortalInbox,
    EspSystemControl,
    portal_submission_sender,
};
use myrtio_esp_status::infrastructure::tasks::{
    dhcp_server_task,
    network_runner_task,
    portal_http_task,
    station_link_task,
    wifi_control_task,
};
use myrtio_esp_status::{
    aux_button_gpio,
    aux_led_gpio,
    mk_static,
    reset_button_gpio,
    status_led_gpio,
};
use myrtio_status_indicator::{
    BlinkDriver,
    LongPressDetector,
    Polarity,
    StatusIndicator,
    ToggleButton,
};

esp_bootloader_esp_idf::esp_app_desc!();

/// Electrical level that keeps an LED of the given polarity dark
fn off_level(polarity: Polarity) -> Level {
    match polarity.output_state(false) {
        PinState::High => Level::High,
        PinState::Low => Level::Low,
    }
}

fn button_input_config(polarity: Polarity) -> InputConfig {
    let pull = match polarity {
        Polarity::ActiveLow => Pull::Up,
        Polarity::ActiveHigh => Pull::Down,
    };
    InputConfig::default().with_pull(pull)
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    log::info!("boot: esp32-c3 status firmware {BUILD_VERSION}");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);

    // Pins
    let status_led = Output::new(
        status_led_gpio!(peripherals),
        off_level(PINS.status_led),
        OutputConfig::default(),
    );
    let reset_button = Input::new(
        reset_button_gpio!(peripherals),
        button_input_config(PINS.reset_button),
    );
    let aux_led = Output::new(
        aux_led_gpio!(peripherals),
        off_level(PINS.aux_led),
        OutputConfig::default(),
    );
    let aux_button = Input::new(
        aux_button_gpio!(peripherals),
        button_input_config(PINS.aux_button),
    );

    // Credentials storage
    let flash = mk_static!(FlashStorage<'static>, FlashStorage::new(peripherals.FLASH));
    let store =
        FlashCredentialStore::new(EspFlashStorageDriver::new(flash, STORAGE.credentials_offset));

    // Radio, network stacks and portal servers
    let network = match init_network(peripherals.WIFI, &PROVISIONING) {
        Ok(network) => network,
        Err(e) => panic!("radio initialization failed: {e:?}"),
    };
    let portal_address = Ipv4Addr::from(PROVISIONING.portal_address);
    let portal_controller = mk_static!(
        PortalHttpController,
        PortalHttpController::new(portal_submission_sender())
    );

    spawner
        .spawn(wifi_control_task(network.controller, PROVISIONING.ap_ssid))
        .ok();
    spawner
        .spawn(network_runner_task(network.station_runner))
        .ok();
    spawner.spawn(network_runner_task(network.portal_runner)).ok();
    spawner.spawn(station_link_task(network.station)).ok();
    spawner
        .spawn(dhcp_server_task(network.portal, portal_address))
        .ok();
    spawner
        .spawn(portal_http_task(network.portal, portal_controller))
        .ok();

    let mut provisioning = ProvisioningUsecases::new(
        EspWifiRadio::new(),
        store,
        EspSystemControl::new(),
        ChannelPortalInbox,
        ProvisioningSettings {
            connect_timeout_ms: PROVISIONING.connect_timeout_ms,
            portal_timeout_ms: PROVISIONING.portal_timeout_ms,
            restart_delay_ms: PROVISIONING.restart_delay_ms,
        },
    );
    provisioning.start(now_millis());

    // Status indicator and auxiliary toggle
    let detector = LongPressDetector::new(reset_button, PINS.reset_button)
        .with_threshold(INDICATOR.long_press_ms)
        .with_debounce(INDICATOR.press_debounce_ms);
    let indicator = StatusIndicator::new(
        detector,
        INDICATOR.patterns,
        BlinkDriver::new(status_led, PINS.status_led),
    );
    let mut aux = ToggleButton::new(aux_button, PINS.aux_button, aux_led, PINS.aux_led)
        .with_lockout(INDICATOR.aux_lockout_ms);
    if let Err(e) = aux.init() {
        log::error!("boot: aux led init failed: {:?}", e.kind());
    }

    let mut status = StatusUsecases::new(
        indicator,
        aux,
        provisioning,
        StatusSettings {
            report_period_ms: LOOP.status_report_period_ms,
        },
        now_millis(),
    );
    log::info!(
        "boot: hold the BOOT button for {} s to erase Wi-Fi credentials",
        INDICATOR.long_press_ms / 1000
    );

    loop {
        if let Err(e) = status.tick(now_millis()) {
            log::error!("status: {e:?}");
        }
        Timer::after_millis(LOOP.pause_ms).await;
    }
}
