//! Background tasks
//!
//! Everything that has to wait on the radio or on sockets lives here, so the
//! main loop itself never blocks.

mod network;
mod portal;
mod wifi;

pub use network::{network_runner_task, station_link_task};
pub use portal::{dhcp_server_task, portal_http_task};
pub use wifi::wifi_control_task;
