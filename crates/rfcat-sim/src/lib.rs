//! Sub-GHz Transceiver Simulation
//!
//! This crate provides a virtual transceiver for exercising manufacturer
//! profiles without an RfCat dongle attached:
//!
//! - **VirtualTransceiver**: implements [`RadioDevice`], tracks register state
//!   and records every driver call in order
//! - **VirtualDelay**: a delay provider that logs waits into the same call
//!   log instead of sleeping
//!
//! # Example
//!
//! ```rust
//! use rfcat_profile::Manufacturer;
//! use rfcat_sim::{DeviceCall, VirtualTransceiver};
//!
//! let manufacturer = Manufacturer::from_json_str(
//!     r#"{ "repeat": { "count": 2, "delay": 50 },
//!          "commands": [ { "name": "bell", "code": "\u0007" } ] }"#,
//! )
//! .unwrap();
//!
//! let mut radio = VirtualTransceiver::new("dongle");
//! let mut delay = radio.delay();
//! manufacturer.tx_cmd_with_delay(&mut radio, &mut delay, "bell").unwrap();
//!
//! assert_eq!(
//!     radio.calls(),
//!     vec![
//!         DeviceCall::Transmit(vec![0x07]),
//!         DeviceCall::Delay { ms: 50 },
//!         DeviceCall::Transmit(vec![0x07]),
//!     ]
//! );
//! ```
//!
//! [`RadioDevice`]: rfcat_profile::RadioDevice

pub mod error;
pub mod transceiver;

pub use error::SimError;
pub use transceiver::{CallKind, DeviceCall, RegisterState, VirtualDelay, VirtualTransceiver};
