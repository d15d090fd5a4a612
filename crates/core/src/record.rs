use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, time::Duration};

/// Number of distinct values the rotating call parameter takes (one per blood type).
pub const PARAM_CYCLE: u64 = 8;

/// The two state-changing calls the harness sends to the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum CallKind {
    /// `updateDonation(uint8)`: records a blood-type contribution.
    Donation,
    /// `compareBlood(uint8)`: evaluates compatibility against the bank.
    Match,
}

impl CallKind {
    pub const ALL: [CallKind; 2] = [CallKind::Donation, CallKind::Match];

    /// Name of the contract function this kind of call invokes.
    pub fn function_name(&self) -> &'static str {
        match self {
            CallKind::Donation => "updateDonation",
            CallKind::Match => "compareBlood",
        }
    }

    /// Label used in per-call progress lines.
    pub fn progress_label(&self) -> &'static str {
        match self {
            CallKind::Donation => "Donation",
            CallKind::Match => "Matching",
        }
    }
}

impl Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallKind::Donation => write!(f, "Donation"),
            CallKind::Match => write!(f, "Match"),
        }
    }
}

/// A single contract call the driver is about to submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractCall {
    pub kind: CallKind,
    pub param: u64,
}

impl ContractCall {
    pub fn new(kind: CallKind, param: u64) -> Self {
        Self { kind, param }
    }

    /// Builds the call for the `index`-th submission of a phase.
    pub fn rotating(kind: CallKind, index: u64) -> Self {
        Self::new(kind, index % PARAM_CYCLE)
    }
}

impl Display for ContractCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind.function_name(), self.param)
    }
}

/// What the chain reported back for one submitted call.
#[derive(Clone, Debug)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub gas_used: u64,
    /// Time between broadcasting the signed tx and receiving its receipt.
    pub latency: Duration,
    pub status: bool,
}

/// One row of the metrics file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TxRecord {
    #[serde(rename = "Type")]
    pub kind: CallKind,
    #[serde(rename = "GasUsed")]
    pub gas_used: u64,
    #[serde(rename = "LatencySec")]
    pub latency_secs: f64,
    #[serde(rename = "Status", with = "status_flag")]
    pub status: bool,
}

impl TxRecord {
    pub fn new(kind: CallKind, outcome: &TxOutcome) -> Self {
        Self {
            kind,
            gas_used: outcome.gas_used,
            latency_secs: round_to(outcome.latency.as_secs_f64(), 3),
            status: outcome.status,
        }
    }
}

/// Rounds `value` to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Receipt status is written as `1`/`0`, the way nodes report it.
mod status_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*status))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}
