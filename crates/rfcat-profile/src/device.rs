//! Radio device capability consumed by profiles
//!
//! The driver itself (USB transport, register access, packet timing) lives
//! outside this crate. A profile only needs the operations below, called in
//! the order documented on [`crate::ModemSettings::setup`] and
//! [`crate::Manufacturer::tx_cmd`].

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::{Modulation, NumPreamble};

/// Operations a sub-GHz transceiver driver must provide
///
/// Every method is blocking. Implementations own their handle; callers must
/// serialize access if a device is shared between threads.
pub trait RadioDevice {
    /// Driver-specific failure type, returned unchanged to callers
    type Error: std::error::Error + 'static;

    /// Set the carrier frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Set the FSK frequency deviation in Hz
    fn set_deviation(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Select the modulation format
    fn set_modulation(&mut self, modulation: Modulation) -> Result<(), Self::Error>;

    /// Set the receive channel filter bandwidth in Hz
    fn set_channel_bandwidth(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Set the symbol rate in baud
    fn set_data_rate(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Set the number of preamble bytes sent before each packet
    fn set_num_preamble(&mut self, preamble: NumPreamble) -> Result<(), Self::Error>;

    /// Use fixed-length packets of `len` bytes
    fn set_fixed_length(&mut self, len: u32) -> Result<(), Self::Error>;

    /// Use variable-length packets (length byte in the payload)
    fn set_variable_length(&mut self) -> Result<(), Self::Error>;

    /// Set the 16-bit sync word
    fn set_sync_word(&mut self, word: u16) -> Result<(), Self::Error>;

    /// Enable or disable data whitening
    fn set_data_whitening(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Enable or disable Manchester encoding
    fn set_manchester(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Enable or disable forward error correction
    fn set_fec(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Transmit raw bytes, blocking until the driver accepts them
    fn transmit(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Blocking delay backed by [`std::thread::sleep`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
