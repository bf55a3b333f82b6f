//! Modem configuration: modulation, data rate, framing and line coding
//!
//! Modulation names and preamble lengths in a profile are mapped onto the
//! discrete values the transceiver supports through two static tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::{merge_field, Settings};
use crate::{ProfileError, RadioDevice};

/// Default receive channel bandwidth in Hz
pub const DEFAULT_CHANNEL_BW_HZ: u32 = 63_000;

/// Default data rate in baud
pub const DEFAULT_DATA_RATE: u32 = 4_880;

/// Default preamble length in bytes (before quantization)
pub const DEFAULT_PREAMBLE_BYTES: i64 = 24;

/// Default sync word
pub const DEFAULT_SYNC_WORD: u16 = 0x1693;

/// Default fixed packet length in bytes
pub const DEFAULT_PKT_LEN: i32 = 13;

/// Modulation formats supported by the transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modulation {
    /// Binary frequency shift keying
    TwoFsk,
    /// Gaussian-filtered FSK
    Gfsk,
    /// Amplitude shift keying / on-off keying
    AskOok,
    /// Minimum shift keying
    Msk,
}

impl Modulation {
    /// Canonical name of the modulation
    pub fn name(&self) -> &'static str {
        match self {
            Modulation::TwoFsk => "2FSK",
            Modulation::Gfsk => "GFSK",
            Modulation::AskOok => "ASK/OOK",
            Modulation::Msk => "MSK",
        }
    }

    /// Value of the MDMCFG2 MOD_FORMAT field for this modulation
    pub fn register_value(&self) -> u8 {
        match self {
            Modulation::TwoFsk => 0x00,
            Modulation::Gfsk => 0x10,
            Modulation::AskOok => 0x30,
            Modulation::Msk => 0x70,
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modulation {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_modulation(s)
    }
}

// Profile spellings, matched case-sensitively
static MODULATIONS: &[(&str, Modulation)] = &[
    ("FSK", Modulation::TwoFsk),
    ("2FSK", Modulation::TwoFsk),
    ("GFSK", Modulation::Gfsk),
    ("OOK", Modulation::AskOok),
    ("ASK", Modulation::AskOok),
    ("MSK", Modulation::Msk),
];

/// Look up a modulation by its profile name
pub fn lookup_modulation(name: &str) -> Result<Modulation, ProfileError> {
    MODULATIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, modulation)| *modulation)
        .ok_or_else(|| ProfileError::UnknownModulation(name.to_string()))
}

/// Preamble lengths supported by the transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumPreamble {
    /// 2 bytes
    Bytes2,
    /// 3 bytes
    Bytes3,
    /// 4 bytes
    Bytes4,
    /// 6 bytes
    Bytes6,
    /// 8 bytes
    Bytes8,
    /// 12 bytes
    Bytes12,
    /// 16 bytes
    Bytes16,
    /// 24 bytes
    Bytes24,
}

impl NumPreamble {
    /// Number of preamble bytes sent
    pub fn bytes(&self) -> u8 {
        match self {
            NumPreamble::Bytes2 => 2,
            NumPreamble::Bytes3 => 3,
            NumPreamble::Bytes4 => 4,
            NumPreamble::Bytes6 => 6,
            NumPreamble::Bytes8 => 8,
            NumPreamble::Bytes12 => 12,
            NumPreamble::Bytes16 => 16,
            NumPreamble::Bytes24 => 24,
        }
    }

    /// Value of the MDMCFG1 NUM_PREAMBLE field
    pub fn register_value(&self) -> u8 {
        match self {
            NumPreamble::Bytes2 => 0x00,
            NumPreamble::Bytes3 => 0x10,
            NumPreamble::Bytes4 => 0x20,
            NumPreamble::Bytes6 => 0x30,
            NumPreamble::Bytes8 => 0x40,
            NumPreamble::Bytes12 => 0x50,
            NumPreamble::Bytes16 => 0x60,
            NumPreamble::Bytes24 => 0x70,
        }
    }
}

// (exclusive lower bound, bucket), strictly descending
static PREAMBLE_BUCKETS: &[(i64, NumPreamble)] = &[
    (16, NumPreamble::Bytes24),
    (12, NumPreamble::Bytes16),
    (8, NumPreamble::Bytes12),
    (6, NumPreamble::Bytes8),
    (4, NumPreamble::Bytes6),
    (3, NumPreamble::Bytes4),
    (2, NumPreamble::Bytes3),
];

/// Quantize a requested preamble length to a supported bucket
///
/// The first bucket whose bound `count` exceeds wins; anything at or below
/// 2 maps to the 2-byte preamble.
pub fn lookup_preamble(count: i64) -> NumPreamble {
    PREAMBLE_BUCKETS
        .iter()
        .find(|(bound, _)| count > *bound)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(NumPreamble::Bytes2)
}

/// Packet framing mode derived from `pkt_len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketFraming {
    /// Every packet is exactly this many bytes
    Fixed(u32),
    /// Packet length is carried in the payload
    Variable,
}

/// `modem` section of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModemSection {
    /// Modulation name (see [`lookup_modulation`])
    pub modulation: Option<String>,
    /// Channel bandwidth in Hz
    pub channel_bw: Option<u32>,
    /// Data rate in baud
    pub data_rate: Option<u32>,
    /// Requested preamble length in bytes (see [`lookup_preamble`])
    pub num_preamble: Option<i64>,
    /// Sync word
    pub sync_word: Option<u16>,
    /// Manchester encoding
    pub manchester: Option<bool>,
    /// Forward error correction
    pub fec: Option<bool>,
    /// Data whitening
    pub whitening: Option<bool>,
    /// Fixed packet length; zero or negative selects variable length
    pub pkt_len: Option<i32>,
}

/// Modem settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemSettings {
    modulation: Modulation,
    channel_bw: u32,
    data_rate: u32,
    num_preamble: NumPreamble,
    sync_word: u16,
    manchester: bool,
    fec: bool,
    whitening: bool,
    pkt_len: i32,
}

impl Default for ModemSettings {
    fn default() -> Self {
        Self {
            modulation: Modulation::Gfsk,
            channel_bw: DEFAULT_CHANNEL_BW_HZ,
            data_rate: DEFAULT_DATA_RATE,
            num_preamble: lookup_preamble(DEFAULT_PREAMBLE_BYTES),
            sync_word: DEFAULT_SYNC_WORD,
            manchester: true,
            fec: false,
            whitening: false,
            pkt_len: DEFAULT_PKT_LEN,
        }
    }
}

impl Settings for ModemSettings {
    type Section = ModemSection;

    fn merge(&mut self, section: ModemSection) -> Result<(), ProfileError> {
        if let Some(name) = section.modulation {
            self.modulation = lookup_modulation(&name)?;
        }
        if let Some(count) = section.num_preamble {
            self.num_preamble = lookup_preamble(count);
        }
        merge_field(&mut self.channel_bw, section.channel_bw);
        merge_field(&mut self.data_rate, section.data_rate);
        merge_field(&mut self.sync_word, section.sync_word);
        merge_field(&mut self.manchester, section.manchester);
        merge_field(&mut self.fec, section.fec);
        merge_field(&mut self.whitening, section.whitening);
        merge_field(&mut self.pkt_len, section.pkt_len);
        Ok(())
    }
}

impl ModemSettings {
    /// Modulation format
    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    /// Channel bandwidth in Hz
    pub fn channel_bw(&self) -> u32 {
        self.channel_bw
    }

    /// Data rate in baud
    pub fn data_rate(&self) -> u32 {
        self.data_rate
    }

    /// Quantized preamble length
    pub fn num_preamble(&self) -> NumPreamble {
        self.num_preamble
    }

    /// Sync word
    pub fn sync_word(&self) -> u16 {
        self.sync_word
    }

    /// Whether Manchester encoding is enabled
    pub fn manchester(&self) -> bool {
        self.manchester
    }

    /// Whether forward error correction is enabled
    pub fn fec(&self) -> bool {
        self.fec
    }

    /// Whether data whitening is enabled
    pub fn whitening(&self) -> bool {
        self.whitening
    }

    /// Configured packet length as given in the profile
    pub fn pkt_len(&self) -> i32 {
        self.pkt_len
    }

    /// Framing mode selected by `pkt_len`
    pub fn framing(&self) -> PacketFraming {
        match u32::try_from(self.pkt_len) {
            Ok(len) if len > 0 => PacketFraming::Fixed(len),
            _ => PacketFraming::Variable,
        }
    }

    /// Program the modem
    ///
    /// Calls are issued in a fixed order: modulation, channel bandwidth,
    /// data rate, preamble, framing, sync word, whitening, Manchester, FEC.
    /// The driver depends on framing being set before the sync word.
    pub fn setup<D: RadioDevice + ?Sized>(&self, device: &mut D) -> Result<(), D::Error> {
        device.set_modulation(self.modulation)?;
        device.set_channel_bandwidth(self.channel_bw)?;
        device.set_data_rate(self.data_rate)?;
        device.set_num_preamble(self.num_preamble)?;

        match self.framing() {
            PacketFraming::Fixed(len) => device.set_fixed_length(len)?,
            PacketFraming::Variable => device.set_variable_length()?,
        }

        device.set_sync_word(self.sync_word)?;

        device.set_data_whitening(self.whitening)?;
        device.set_manchester(self.manchester)?;
        device.set_fec(self.fec)?;
        Ok(())
    }
}
