//! Call-recording device for unit tests

use embedded_hal::delay::DelayNs;
use thiserror::Error;

use crate::{Modulation, NumPreamble, RadioDevice};

#[derive(Debug, Error)]
#[error("mock failure on {0}")]
pub struct MockError(pub &'static str);

/// Records every call as a short string; optionally fails one call kind
#[derive(Debug, Default)]
pub struct MockDevice {
    pub calls: Vec<String>,
    pub fail_on: Option<&'static str>,
}

impl MockDevice {
    fn record(&mut self, kind: &'static str, call: String) -> Result<(), MockError> {
        if self.fail_on == Some(kind) {
            return Err(MockError(kind));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RadioDevice for MockDevice {
    type Error = MockError;

    fn set_frequency(&mut self, hz: u32) -> Result<(), MockError> {
        self.record("freq", format!("freq {}", hz))
    }

    fn set_deviation(&mut self, hz: u32) -> Result<(), MockError> {
        self.record("deviation", format!("deviation {}", hz))
    }

    fn set_modulation(&mut self, modulation: Modulation) -> Result<(), MockError> {
        self.record("modulation", format!("modulation {}", modulation))
    }

    fn set_channel_bandwidth(&mut self, hz: u32) -> Result<(), MockError> {
        self.record("channel_bw", format!("channel_bw {}", hz))
    }

    fn set_data_rate(&mut self, baud: u32) -> Result<(), MockError> {
        self.record("data_rate", format!("data_rate {}", baud))
    }

    fn set_num_preamble(&mut self, preamble: NumPreamble) -> Result<(), MockError> {
        self.record("preamble", format!("preamble {}", preamble.bytes()))
    }

    fn set_fixed_length(&mut self, len: u32) -> Result<(), MockError> {
        self.record("fixed_length", format!("fixed_length {}", len))
    }

    fn set_variable_length(&mut self) -> Result<(), MockError> {
        self.record("variable_length", "variable_length".to_string())
    }

    fn set_sync_word(&mut self, word: u16) -> Result<(), MockError> {
        self.record("sync_word", format!("sync_word 0x{:04X}", word))
    }

    fn set_data_whitening(&mut self, enable: bool) -> Result<(), MockError> {
        self.record("whitening", format!("whitening {}", enable))
    }

    fn set_manchester(&mut self, enable: bool) -> Result<(), MockError> {
        self.record("manchester", format!("manchester {}", enable))
    }

    fn set_fec(&mut self, enable: bool) -> Result<(), MockError> {
        self.record("fec", format!("fec {}", enable))
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), MockError> {
        self.record("transmit", format!("transmit {:02X?}", data))
    }
}

/// Delay that only remembers what it was asked to wait
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
