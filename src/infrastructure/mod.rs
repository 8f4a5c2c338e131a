//! Infrastructure layer - Port implementations
//!
//! Concrete implementations of the domain ports on top of the ESP32-C3
//! hardware, plus the background tasks that keep the radio and the portal
//! running.

#[cfg(feature = "firmware")]
pub mod drivers;
pub mod repositories;
#[cfg(feature = "firmware")]
pub mod services;
#[cfg(feature = "firmware")]
pub mod tasks;
