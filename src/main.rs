//! bt-jiggler firmware for the nRF52840 with SoftDevice S140.
//!
//! Boot order matters: the SoftDevice must be enabled before any task
//! touches the radio, and every interrupt used by embassy has to sit at
//! a priority the SoftDevice leaves free (2, 3, 5-7).

#![no_std]
#![no_main]

mod ble;
mod board;

use bt_jiggler::{ActivityController, Config, Hardware, SeededEntropy};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::{bind_interrupts, peripherals, spim};
use embassy_time::{Delay, Instant};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;
use ws2812_spi::prerendered::Ws2812;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

/// One status pixel, 12 SPI bytes per LED.
const LED_BUF_LEN: usize = 12;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("bt-jiggler starting");

    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM3.set_priority(Priority::P3);

    // ── BLE ─────────────────────────────────────────────────────────────
    let sd = Softdevice::enable(&ble::softdevice_config());
    static SERVER: StaticCell<ble::server::Server> = StaticCell::new();
    let server: &'static ble::server::Server = SERVER.init(unwrap!(ble::server::Server::new(sd)));
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(ble::softdevice_task(sd)));
    unwrap!(spawner.spawn(ble::ble_task(sd, server)));

    // ── Entropy: floating AIN0 (P0.02) mixed with uptime ────────────────
    let seed = {
        let channel = ChannelConfig::single_ended(p.P0_02);
        let mut adc = Saadc::new(p.SAADC, Irqs, saadc::Config::default(), [channel]);
        adc.calibrate().await;
        board::sample_noise(&mut adc).await
    };
    let rng = SeededEntropy::from_noise(seed, Instant::now().as_millis());

    // ── Toggle button: P0.11, active-low ────────────────────────────────
    let button = Input::new(p.P0_11, Pull::Up);

    // ── Status pixel: WS2812 on SPIM3 MOSI (P0.13); SCK (P0.14) unused ──
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M2;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_14, p.P0_13, spi_config);
    static LED_BUF: StaticCell<[u8; LED_BUF_LEN]> = StaticCell::new();
    let led = Ws2812::new(spi, LED_BUF.init([0; LED_BUF_LEN]));

    let hw = Hardware {
        button,
        link: ble::mouse::BleMouse::new(server),
        led,
        clock: board::EmbassyClock,
        delay: Delay,
    };
    let mut controller = ActivityController::new(Config::default(), hw, rng);
    controller.run().await
}
