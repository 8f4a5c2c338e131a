#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod controllers;
pub mod core;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(feature = "firmware")]
#[macro_export]
// Create a static cell for a given type and value
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}
