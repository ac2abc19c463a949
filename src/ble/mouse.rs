//! The controller's handle on the radio.

use core::cell::RefCell;

use defmt::trace;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use nrf_softdevice::ble::Connection;

use bt_jiggler::{BleError, Error, MouseButton, MouseReport, PointerLink};

use super::server::Server;

/// Live connection, `None` while advertising or idle.
pub static CONNECTION: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

/// Raised by [`BleMouse::connect`]; consumed by the BLE task.
pub static ADVERTISE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

fn current_connection() -> Option<Connection> {
    CONNECTION.lock(|c| c.borrow().clone())
}

fn notify_error(e: NotifyValueError) -> Error {
    match e {
        NotifyValueError::Disconnected => Error::Disconnected,
        NotifyValueError::Raw(_) => BleError::NotifyFailed.into(),
    }
}

pub struct BleMouse {
    server: &'static Server,
}

impl BleMouse {
    pub fn new(server: &'static Server) -> Self {
        Self { server }
    }

    fn send(&self, report: MouseReport) -> Result<(), Error> {
        let conn = current_connection().ok_or(Error::Disconnected)?;
        gatt_server::notify_value(&conn, self.server.hid.input_mouse, &report.to_bytes())
            .map_err(notify_error)
    }
}

impl PointerLink for BleMouse {
    fn connect(&mut self) {
        ADVERTISE.signal(());
    }

    fn is_connected(&self) -> bool {
        CONNECTION.lock(|c| c.borrow().is_some())
    }

    fn move_relative(&mut self, dx: i8, dy: i8, wheel: i8) -> Result<(), Error> {
        self.send(MouseReport::motion(dx, dy, wheel))
    }

    fn click(&mut self, button: MouseButton) -> Result<(), Error> {
        self.send(MouseReport::press(button))?;
        self.send(MouseReport::empty())
    }

    fn set_battery_level(&mut self, percent: u8) -> Result<(), Error> {
        self.server
            .bas
            .battery_level_set(&percent)
            .map_err(|_| BleError::SetValueFailed)?;
        if let Some(conn) = current_connection() {
            self.server
                .bas
                .battery_level_notify(&conn, &percent)
                .map_err(notify_error)?;
        }
        trace!("BLE: battery {}%", percent);
        Ok(())
    }
}
