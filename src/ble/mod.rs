//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Server** - Battery Service plus a HID-over-GATT mouse.
//! 2. **Mouse link** - [`mouse::BleMouse`], the controller's view of the
//!    radio: connected?, relative move, click, battery level.
//! 3. **Advertiser** - [`ble_task`] advertises when asked, then serves
//!    GATT on the connection until the central goes away.
//!
//! The controller and the BLE task share only two statics: the current
//! connection and the "please advertise" signal.

pub mod mouse;
pub mod server;

use core::mem;

use defmt::{info, warn};
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Config, Softdevice};

use bt_jiggler::config::{BLE_APPEARANCE_MOUSE, BLE_DEVICE_NAME};

use self::mouse::{ADVERTISE, CONNECTION};
use self::server::Server;

/// Advertising interval in 0.625 ms units (100 ms).
const ADV_INTERVAL: u32 = 160;

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    // Enable dcdc-mode, reduce power consumption
    unsafe {
        raw::sd_power_dcdc_mode_set(raw::NRF_POWER_DCDC_MODES_NRF_POWER_DCDC_ENABLE as u8);
    };
    sd.run().await
}

/// SoftDevice configuration for a single-link peripheral.
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: 1024,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        conn_gatts: Some(raw::ble_gatts_conn_cfg_t {
            hvn_tx_queue_size: 4,
        }),
        ..Default::default()
    }
}

fn advertisement_data() -> LegacyAdvertisementPayload {
    LegacyAdvertisementBuilder::new()
        .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
        .services_16(
            ServiceList::Incomplete,
            &[ServiceUuid16::BATTERY, ServiceUuid16::HUMAN_INTERFACE_DEVICE],
        )
        .full_name(BLE_DEVICE_NAME)
        // Host shows a mouse icon
        .raw(
            AdvertisementDataType::APPEARANCE,
            &BLE_APPEARANCE_MOUSE.to_le_bytes(),
        )
        .build()
}

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(
        ServiceList::Complete,
        &[ServiceUuid16::BATTERY, ServiceUuid16::HUMAN_INTERFACE_DEVICE],
    )
    .build();

/// Advertise on request, then serve the connection until it drops.
///
/// Requests come from [`mouse::BleMouse::connect`]; while disconnected
/// the controller re-issues them on its reconnect backoff.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let adv_data = advertisement_data();
    let mut config = peripheral::Config::default();
    config.interval = ADV_INTERVAL;

    loop {
        ADVERTISE.wait().await;
        info!("BLE: advertising as {}", BLE_DEVICE_NAME);

        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv_data,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("BLE: advertise failed: {:?}", e);
                continue;
            }
        };

        info!("BLE: central connected");
        CONNECTION.lock(|c| c.replace(Some(conn.clone())));

        let reason = gatt_server::run(&conn, server, |_| {}).await;

        CONNECTION.lock(|c| c.replace(None));
        info!("BLE: central disconnected: {:?}", reason);
    }
}
