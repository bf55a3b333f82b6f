//! Manufacturer profile: settings plus named commands
//!
//! A [`Manufacturer`] is built once from a [`Profile`] and never changes.
//! Callers program the radio with [`Manufacturer::setup`] and then send
//! commands by name with [`Manufacturer::tx_cmd`].

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use tracing::{debug, info, warn};

use crate::settings::Settings;
use crate::{
    Command, ModemSettings, PacketFraming, Profile, ProfileError, RadioDevice, RadioSettings,
    RepeatSettings, ThreadDelay, TxError,
};

/// Radio configuration and command set for one manufacturer's protocol
#[derive(Debug, Clone)]
pub struct Manufacturer {
    radio: RadioSettings,
    modem: ModemSettings,
    repeat: RepeatSettings,
    commands: HashMap<String, Command>,
}

impl Manufacturer {
    /// Build a manufacturer from a parsed profile
    pub fn from_profile(profile: Profile) -> Result<Self, ProfileError> {
        let radio = RadioSettings::from_section(profile.radio)?;
        let modem = ModemSettings::from_section(profile.modem)?;
        let repeat = RepeatSettings::from_section(profile.repeat)?;

        let mut commands = HashMap::new();
        for spec in profile.commands.unwrap_or_default() {
            let cmd = Command::from_spec(spec)?;
            if let Some(previous) = commands.insert(cmd.name().to_string(), cmd) {
                warn!(
                    "Command '{}' defined more than once, using last definition",
                    previous.name()
                );
            }
        }

        info!("Loaded profile with {} commands", commands.len());

        Ok(Self {
            radio,
            modem,
            repeat,
            commands,
        })
    }

    /// Parse a JSON profile and build a manufacturer from it
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Self::from_profile(Profile::from_json_str(json)?)
    }

    /// Carrier settings
    pub fn radio(&self) -> &RadioSettings {
        &self.radio
    }

    /// Modem settings
    pub fn modem(&self) -> &ModemSettings {
        &self.modem
    }

    /// Repeat/timing policy
    pub fn repeat(&self) -> &RepeatSettings {
        &self.repeat
    }

    /// Look up a command by exact name
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All command names, sorted
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Program radio and modem settings into the device
    ///
    /// Radio settings go first. The first driver error aborts setup and is
    /// returned as-is; calls already made are not rolled back.
    pub fn setup<D: RadioDevice + ?Sized>(&self, device: &mut D) -> Result<(), D::Error> {
        self.radio.setup(device)?;
        self.modem.setup(device)?;
        info!("Radio configured");
        debug!("{}", self.summary());
        Ok(())
    }

    /// Transmit the named command, sleeping on the current thread between repeats
    pub fn tx_cmd<D: RadioDevice + ?Sized>(
        &self,
        device: &mut D,
        name: &str,
    ) -> Result<(), TxError<D::Error>> {
        self.tx_cmd_with_delay(device, &mut ThreadDelay, name)
    }

    /// Transmit the named command `repeat.count` times
    ///
    /// `delay` waits `repeat.delay` ms between consecutive transmissions,
    /// never after the last one. A count of zero sends nothing.
    pub fn tx_cmd_with_delay<D, T>(
        &self,
        device: &mut D,
        delay: &mut T,
        name: &str,
    ) -> Result<(), TxError<D::Error>>
    where
        D: RadioDevice + ?Sized,
        T: DelayNs + ?Sized,
    {
        let cmd = self
            .command(name)
            .ok_or_else(|| TxError::CommandNotFound(name.to_string()))?;

        let count = self.repeat.count();
        for t in 0..count {
            debug!("Sending {:02X?}", cmd.code());
            device.transmit(cmd.code()).map_err(TxError::Device)?;
            if t + 1 < count {
                debug!("Waiting for {}ms", self.repeat.delay());
                delay.delay_ms(self.repeat.delay());
            }
        }
        Ok(())
    }

    /// One-line description of the radio configuration
    pub fn summary(&self) -> String {
        let framing = match self.modem.framing() {
            PacketFraming::Fixed(len) => format!("fixed {} bytes", len),
            PacketFraming::Variable => "variable length".to_string(),
        };
        format!(
            "{} dev {} Hz, {} {} baud, bw {} Hz, preamble {}, sync 0x{:04X}, {}{}{}{}",
            self.radio.frequency_display(),
            self.radio.deviation(),
            self.modem.modulation(),
            self.modem.data_rate(),
            self.modem.channel_bw(),
            self.modem.num_preamble().bytes(),
            self.modem.sync_word(),
            framing,
            if self.modem.manchester() { ", manchester" } else { "" },
            if self.modem.whitening() { ", whitening" } else { "" },
            if self.modem.fec() { ", fec" } else { "" },
        )
    }
}

impl TryFrom<Profile> for Manufacturer {
    type Error = ProfileError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Self::from_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockDevice};
    use crate::{Modulation, NumPreamble};
    use serde_json::json;

    fn manufacturer(value: serde_json::Value) -> Manufacturer {
        Manufacturer::from_profile(Profile::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_profile_defaults() {
        let m = manufacturer(json!({}));
        assert_eq!(m.radio().freq(), 433_920_000);
        assert_eq!(m.radio().deviation(), 5_200);
        assert_eq!(m.modem().modulation(), Modulation::Gfsk);
        assert_eq!(m.modem().num_preamble(), NumPreamble::Bytes24);
        assert_eq!(m.repeat().count(), 3);
        assert_eq!(m.repeat().delay(), 100);
        assert!(m.command_names().is_empty());
    }

    #[test]
    fn test_unknown_modulation_aborts_construction() {
        let profile = Profile::from_value(json!({ "modem": { "modulation": "PSK" } })).unwrap();
        let err = Manufacturer::try_from(profile).unwrap_err();
        assert!(matches!(err, ProfileError::UnknownModulation(ref s) if s == "PSK"));
    }

    #[test]
    fn test_duplicate_command_last_wins() {
        let m = manufacturer(json!({
            "commands": [
                { "name": "on", "code": "\u{1}" },
                { "name": "off", "code": "\u{0}" },
                { "name": "on", "code": "\u{2}" }
            ]
        }));
        assert_eq!(m.command("on").unwrap().code(), &[0x02]);
        assert_eq!(m.command_names(), vec!["off", "on"]);
    }

    #[test]
    fn test_setup_radio_before_modem() {
        let m = manufacturer(json!({}));
        let mut device = MockDevice::default();
        m.setup(&mut device).unwrap();
        assert_eq!(device.calls[0], "freq 433920000");
        assert_eq!(device.calls[1], "deviation 5200");
        assert_eq!(device.calls[2], "modulation GFSK");
        assert_eq!(device.calls.len(), 11);
    }

    #[test]
    fn test_setup_radio_failure_skips_modem() {
        let m = manufacturer(json!({}));
        let mut device = MockDevice {
            fail_on: Some("deviation"),
            ..Default::default()
        };
        let err = m.setup(&mut device).unwrap_err();
        assert_eq!(err.0, "deviation");
        assert_eq!(device.calls, vec!["freq 433920000"]);
    }

    #[test]
    fn test_tx_cmd_repeats_with_delay() {
        let m = manufacturer(json!({
            "repeat": { "count": 3, "delay": 100 },
            "commands": [ { "name": "on", "code": "\u{1}\u{2}" } ]
        }));
        let mut device = MockDevice::default();
        let mut delay = MockDelay::default();
        m.tx_cmd_with_delay(&mut device, &mut delay, "on").unwrap();

        assert_eq!(device.calls, vec!["transmit [01, 02]"; 3]);
        assert_eq!(delay.waits_ms, vec![100, 100]);
    }

    #[test]
    fn test_tx_cmd_zero_count() {
        let m = manufacturer(json!({
            "repeat": { "count": 0 },
            "commands": [ { "name": "on", "code": "A" } ]
        }));
        let mut device = MockDevice::default();
        let mut delay = MockDelay::default();
        m.tx_cmd_with_delay(&mut device, &mut delay, "on").unwrap();

        assert!(device.calls.is_empty());
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn test_tx_cmd_single_has_no_delay() {
        let m = manufacturer(json!({
            "repeat": { "count": 1 },
            "commands": [ { "name": "on", "code": "A" } ]
        }));
        let mut device = MockDevice::default();
        let mut delay = MockDelay::default();
        m.tx_cmd_with_delay(&mut device, &mut delay, "on").unwrap();

        assert_eq!(device.calls.len(), 1);
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn test_tx_cmd_unknown_name() {
        let m = manufacturer(json!({ "commands": [ { "name": "on", "code": "A" } ] }));
        let mut device = MockDevice::default();
        let err = m.tx_cmd(&mut device, "off").unwrap_err();
        assert!(matches!(err, TxError::CommandNotFound(ref s) if s == "off"));
        assert!(device.calls.is_empty());
    }

    #[test]
    fn test_tx_cmd_device_error_stops_loop() {
        let m = manufacturer(json!({ "commands": [ { "name": "on", "code": "A" } ] }));
        let mut device = MockDevice {
            fail_on: Some("transmit"),
            ..Default::default()
        };
        let mut delay = MockDelay::default();
        let err = m
            .tx_cmd_with_delay(&mut device, &mut delay, "on")
            .unwrap_err();
        assert!(matches!(err, TxError::Device(_)));
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn test_summary() {
        let m = manufacturer(json!({ "modem": { "modulation": "OOK", "pkt_len": 0 } }));
        let summary = m.summary();
        assert!(summary.starts_with("433.920 MHz"));
        assert!(summary.contains("ASK/OOK"));
        assert!(summary.contains("variable length"));
        assert!(summary.contains("sync 0x1693"));
    }
}
