//! Virtual transceiver
//!
//! Records driver calls and the register state they produce, so profile
//! behavior can be checked without a dongle.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use rfcat_profile::{Modulation, NumPreamble, PacketFraming, RadioDevice};
use tracing::debug;

use crate::SimError;

/// A single call made on the virtual transceiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    SetFrequency { hz: u32 },
    SetDeviation { hz: u32 },
    SetModulation(Modulation),
    SetChannelBandwidth { hz: u32 },
    SetDataRate { baud: u32 },
    SetNumPreamble(NumPreamble),
    SetFixedLength { len: u32 },
    SetVariableLength,
    SetSyncWord(u16),
    SetDataWhitening(bool),
    SetManchester(bool),
    SetFec(bool),
    Transmit(Vec<u8>),
    /// Wait issued through a [`VirtualDelay`]
    Delay { ms: u32 },
}

/// Call kinds, used to arm failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    SetFrequency,
    SetDeviation,
    SetModulation,
    SetChannelBandwidth,
    SetDataRate,
    SetNumPreamble,
    SetFixedLength,
    SetVariableLength,
    SetSyncWord,
    SetDataWhitening,
    SetManchester,
    SetFec,
    Transmit,
    Delay,
}

impl DeviceCall {
    /// The kind of this call
    pub fn kind(&self) -> CallKind {
        match self {
            DeviceCall::SetFrequency { .. } => CallKind::SetFrequency,
            DeviceCall::SetDeviation { .. } => CallKind::SetDeviation,
            DeviceCall::SetModulation(_) => CallKind::SetModulation,
            DeviceCall::SetChannelBandwidth { .. } => CallKind::SetChannelBandwidth,
            DeviceCall::SetDataRate { .. } => CallKind::SetDataRate,
            DeviceCall::SetNumPreamble(_) => CallKind::SetNumPreamble,
            DeviceCall::SetFixedLength { .. } => CallKind::SetFixedLength,
            DeviceCall::SetVariableLength => CallKind::SetVariableLength,
            DeviceCall::SetSyncWord(_) => CallKind::SetSyncWord,
            DeviceCall::SetDataWhitening(_) => CallKind::SetDataWhitening,
            DeviceCall::SetManchester(_) => CallKind::SetManchester,
            DeviceCall::SetFec(_) => CallKind::SetFec,
            DeviceCall::Transmit(_) => CallKind::Transmit,
            DeviceCall::Delay { .. } => CallKind::Delay,
        }
    }
}

/// Register values set so far; `None` means never written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterState {
    pub frequency_hz: Option<u32>,
    pub deviation_hz: Option<u32>,
    pub modulation: Option<Modulation>,
    pub channel_bw_hz: Option<u32>,
    pub data_rate: Option<u32>,
    pub num_preamble: Option<NumPreamble>,
    pub framing: Option<PacketFraming>,
    pub sync_word: Option<u16>,
    pub whitening: Option<bool>,
    pub manchester: Option<bool>,
    pub fec: Option<bool>,
}

type CallLog = Rc<RefCell<Vec<DeviceCall>>>;

/// A simulated transceiver implementing [`RadioDevice`]
#[derive(Debug)]
pub struct VirtualTransceiver {
    /// Identifier for logging
    id: String,
    state: RegisterState,
    log: CallLog,
    fail_on: HashSet<CallKind>,
}

impl VirtualTransceiver {
    /// Create a transceiver with no registers written
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: RegisterState::default(),
            log: Rc::new(RefCell::new(Vec::new())),
            fail_on: HashSet::new(),
        }
    }

    /// Get the identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Make every future call of `kind` fail with [`SimError::Injected`]
    ///
    /// Failing calls are not recorded and do not change register state.
    pub fn fail_on(&mut self, kind: CallKind) {
        self.fail_on.insert(kind);
    }

    /// Stop failing calls of `kind`
    pub fn clear_failure(&mut self, kind: CallKind) {
        self.fail_on.remove(&kind);
    }

    /// A delay provider that records into this transceiver's call log
    pub fn delay(&self) -> VirtualDelay {
        VirtualDelay {
            log: Rc::clone(&self.log),
        }
    }

    /// Current register state
    pub fn state(&self) -> &RegisterState {
        &self.state
    }

    /// Snapshot of every recorded call, in order
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.log.borrow().clone()
    }

    /// Payloads transmitted so far
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Transmit(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls (register state is kept)
    pub fn clear_calls(&mut self) {
        self.log.borrow_mut().clear();
    }

    fn record(&mut self, call: DeviceCall) -> Result<(), SimError> {
        let kind = call.kind();
        if self.fail_on.contains(&kind) {
            debug!("Virtual transceiver {} failing {:?}", self.id, kind);
            return Err(SimError::Injected(kind));
        }
        debug!("Virtual transceiver {}: {:?}", self.id, call);
        self.log.borrow_mut().push(call);
        Ok(())
    }
}

impl RadioDevice for VirtualTransceiver {
    type Error = SimError;

    fn set_frequency(&mut self, hz: u32) -> Result<(), SimError> {
        self.record(DeviceCall::SetFrequency { hz })?;
        self.state.frequency_hz = Some(hz);
        Ok(())
    }

    fn set_deviation(&mut self, hz: u32) -> Result<(), SimError> {
        self.record(DeviceCall::SetDeviation { hz })?;
        self.state.deviation_hz = Some(hz);
        Ok(())
    }

    fn set_modulation(&mut self, modulation: Modulation) -> Result<(), SimError> {
        self.record(DeviceCall::SetModulation(modulation))?;
        self.state.modulation = Some(modulation);
        Ok(())
    }

    fn set_channel_bandwidth(&mut self, hz: u32) -> Result<(), SimError> {
        self.record(DeviceCall::SetChannelBandwidth { hz })?;
        self.state.channel_bw_hz = Some(hz);
        Ok(())
    }

    fn set_data_rate(&mut self, baud: u32) -> Result<(), SimError> {
        self.record(DeviceCall::SetDataRate { baud })?;
        self.state.data_rate = Some(baud);
        Ok(())
    }

    fn set_num_preamble(&mut self, preamble: NumPreamble) -> Result<(), SimError> {
        self.record(DeviceCall::SetNumPreamble(preamble))?;
        self.state.num_preamble = Some(preamble);
        Ok(())
    }

    fn set_fixed_length(&mut self, len: u32) -> Result<(), SimError> {
        self.record(DeviceCall::SetFixedLength { len })?;
        self.state.framing = Some(PacketFraming::Fixed(len));
        Ok(())
    }

    fn set_variable_length(&mut self) -> Result<(), SimError> {
        self.record(DeviceCall::SetVariableLength)?;
        self.state.framing = Some(PacketFraming::Variable);
        Ok(())
    }

    fn set_sync_word(&mut self, word: u16) -> Result<(), SimError> {
        self.record(DeviceCall::SetSyncWord(word))?;
        self.state.sync_word = Some(word);
        Ok(())
    }

    fn set_data_whitening(&mut self, enable: bool) -> Result<(), SimError> {
        self.record(DeviceCall::SetDataWhitening(enable))?;
        self.state.whitening = Some(enable);
        Ok(())
    }

    fn set_manchester(&mut self, enable: bool) -> Result<(), SimError> {
        self.record(DeviceCall::SetManchester(enable))?;
        self.state.manchester = Some(enable);
        Ok(())
    }

    fn set_fec(&mut self, enable: bool) -> Result<(), SimError> {
        self.record(DeviceCall::SetFec(enable))?;
        self.state.fec = Some(enable);
        Ok(())
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), SimError> {
        self.record(DeviceCall::Transmit(data.to_vec()))
    }
}

/// Delay provider that logs waits instead of sleeping
#[derive(Debug, Clone)]
pub struct VirtualDelay {
    log: CallLog,
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(DeviceCall::Delay {
            ms: ns.div_ceil(1_000_000),
        });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(DeviceCall::Delay { ms });
    }
}
