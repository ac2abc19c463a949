//! nRF52840 bindings for the core's hardware traits.

use bt_jiggler::clock::Clock;
use embassy_nrf::saadc::Saadc;
use embassy_time::Instant;

/// Uptime from the embassy time driver (RTC1).
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// One reading from a floating analog input.  Only the low bits carry
/// noise; the value is just seed material.
pub async fn sample_noise(adc: &mut Saadc<'_, 1>) -> u16 {
    let mut buf = [0i16; 1];
    adc.sample(&mut buf).await;
    buf[0] as u16
}
