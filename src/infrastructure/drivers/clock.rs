use embassy_time::Instant;
use myrtio_status_indicator::Millis;

/// Milliseconds since boot, truncated to the indicator's wrapping counter
#[allow(clippy::cast_possible_truncation)]
pub fn now_millis() -> Millis {
    Instant::now().as_millis() as Millis
}
