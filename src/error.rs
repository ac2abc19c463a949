//! Unified error type for bt-jiggler.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The activity core never fails: every collaborator call is
//! fire-and-forget, so these errors only travel as far as the link and
//! indicator wrappers, which log them and move on.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    /// A report was produced while no central is connected.
    Disconnected,

    // Indicator
    /// The LED driver rejected the pixel write.
    Led,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Characteristic notification failed.
    NotifyFailed,
    /// Local characteristic value update failed.
    SetValueFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
