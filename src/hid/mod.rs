//! HID report types sent over the radio link.

pub mod mouse;


pub use mouse::{MouseButton, MouseReport, MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};
