//! GATT server: Device Information, Battery Service and a HID-over-GATT
//! mouse.
//!
//! The battery service uses the attribute macro; the HID service is
//! assembled with the builder because its input report needs a Report
//! Reference descriptor.  The mouse runs in report protocol only, so
//! there is no Protocol Mode characteristic and no boot report.

use defmt::{debug, info};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, RegisterError, Service, WriteOp};
use nrf_softdevice::ble::{Connection, Uuid};
use nrf_softdevice::Softdevice;

use bt_jiggler::config::{BLE_INITIAL_BATTERY, BLE_MANUFACTURER};
use bt_jiggler::hid::{MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};

const DEVICE_INFORMATION: Uuid = Uuid::new_16(0x180a);
const MANUFACTURER_NAME: Uuid = Uuid::new_16(0x2a29);

const HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const HID_INFO: Uuid = Uuid::new_16(0x2a4a);
const REPORT_MAP: Uuid = Uuid::new_16(0x2a4b);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2a4c);
const HID_REPORT: Uuid = Uuid::new_16(0x2a4d);
const REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);

/// Report Reference: no report ID, input report.
const INPUT_REPORT_REFERENCE: [u8; 2] = [0x00, 0x01];

pub struct DeviceInformationService {}

impl DeviceInformationService {
    pub fn new(sd: &mut Softdevice, manufacturer: &'static str) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, DEVICE_INFORMATION)?;

        sb.add_characteristic(
            MANUFACTURER_NAME,
            Attribute::new(manufacturer),
            Metadata::new(Properties::new().read()),
        )?
        .build();

        let _service_handle = sb.build();

        Ok(DeviceInformationService {})
    }
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct HidService {
    hid_control: u16,
    pub input_mouse: u16,
    input_mouse_cccd: u16,
}

#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum HidServiceEvent {
    ControlPoint(u8),
    MouseNotifications(bool),
}

impl HidService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut builder = ServiceBuilder::new(sd, HID_SERVICE)?;

        builder
            .add_characteristic(
                HID_INFO,
                // bcdHID 1.11, no country, normally connectable
                Attribute::new([0x11u8, 0x01, 0x00, 0x02]),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        builder
            .add_characteristic(
                REPORT_MAP,
                Attribute::new(MOUSE_REPORT_DESCRIPTOR),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let hid_control = builder
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let mut input_mouse = builder.add_characteristic(
            HID_REPORT,
            Attribute::new([0u8; MOUSE_REPORT_SIZE]),
            Metadata::new(Properties::new().read().notify()),
        )?;
        input_mouse.add_descriptor(REPORT_REFERENCE, Attribute::new(INPUT_REPORT_REFERENCE))?;
        let input_mouse = input_mouse.build();

        let _service = builder.build();

        Ok(Self {
            hid_control: hid_control.value_handle,
            input_mouse: input_mouse.value_handle,
            input_mouse_cccd: input_mouse.cccd_handle,
        })
    }
}

impl gatt_server::Service for HidService {
    type Event = HidServiceEvent;

    fn on_write(&self, handle: u16, data: &[u8]) -> Option<Self::Event> {
        let first = data.first().copied().unwrap_or(0);
        if handle == self.hid_control {
            Some(HidServiceEvent::ControlPoint(first))
        } else if handle == self.input_mouse_cccd {
            Some(HidServiceEvent::MouseNotifications(first & 0x01 != 0))
        } else {
            None
        }
    }
}

pub struct Server {
    _dis: DeviceInformationService,
    pub bas: BatteryService,
    pub hid: HidService,
}

impl Server {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let dis = DeviceInformationService::new(sd, BLE_MANUFACTURER)?;
        let bas = BatteryService::new(sd)?;
        let hid = HidService::new(sd)?;
        if bas.battery_level_set(&BLE_INITIAL_BATTERY).is_err() {
            debug!("GATT: initial battery level not set");
        }
        Ok(Self { _dis: dis, bas, hid })
    }
}

impl gatt_server::Server for Server {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if let Some(event) = self.hid.on_write(handle, data) {
            info!("GATT: {:?}", event);
        }
        let _ = self.bas.on_write(handle, data);
        None
    }
}
