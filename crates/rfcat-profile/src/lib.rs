//! Manufacturer RF Profiles
//!
//! This crate configures and drives a sub-GHz transceiver (CC1111-class,
//! as found in RfCat dongles) for manufacturer-specific remote-control
//! protocols. A profile declares:
//!
//! - **radio**: carrier frequency and deviation
//! - **modem**: modulation, channel bandwidth, data rate, preamble,
//!   framing, sync word, whitening, Manchester and FEC
//! - **repeat**: how many times a command is sent and the pause in between
//! - **commands**: named raw byte payloads
//!
//! # Architecture
//!
//! The radio driver is external and reached through the [`RadioDevice`]
//! trait. A [`Manufacturer`] is built once from a [`Profile`], pushes its
//! settings to a device with [`Manufacturer::setup`], and transmits named
//! commands with [`Manufacturer::tx_cmd`]. Everything is blocking and runs
//! on the caller's thread.
//!
//! # Example
//!
//! ```rust
//! use rfcat_profile::{Manufacturer, Modulation};
//!
//! let manufacturer = Manufacturer::from_json_str(
//!     r#"{
//!         "modem": { "modulation": "OOK", "pkt_len": 0 },
//!         "repeat": { "count": 5, "delay": 25 },
//!         "commands": [ { "name": "open", "code": "ªª\u0001" } ]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(manufacturer.modem().modulation(), Modulation::AskOok);
//! assert_eq!(manufacturer.command("open").unwrap().code(), &[0xAA, 0xAA, 0x01]);
//! ```

pub mod command;
pub mod device;
pub mod error;
pub mod manufacturer;
pub mod modem;
pub mod profile;
pub mod radio;
pub mod repeat;
pub mod settings;

#[cfg(test)]
mod mock;

pub use command::{decode_code, Command, CommandSpec};
pub use device::{RadioDevice, ThreadDelay};
pub use error::{ProfileError, TxError};
pub use manufacturer::Manufacturer;
pub use modem::{
    lookup_modulation, lookup_preamble, ModemSection, ModemSettings, Modulation, NumPreamble,
    PacketFraming,
};
pub use profile::Profile;
pub use radio::{RadioSection, RadioSettings};
pub use repeat::{RepeatSection, RepeatSettings};
pub use settings::Settings;
