use crate::record::ContractCall;
use alloy::{
    dyn_abi,
    network::{Ethereum, TransactionBuilderError},
    primitives::{Address, TxHash},
    providers::PendingTransactionError,
    signers::local::LocalSignerError,
    transports::{RpcError, TransportErrorKind},
};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("deployment receipt for tx {0} has no contract address")]
    ContractAddressMissing(TxHash),

    #[error("contract interface has no deployable bytecode")]
    BytecodeMissing,

    #[error("failed to encode or decode function data")]
    DynAbi(#[from] dyn_abi::Error),

    #[error("function `{name}` takes {expected} argument(s), got {actual}")]
    FunctionArgCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("function `{0}` not found in contract interface")]
    FunctionMissing(String),

    #[error("failed to parse contract interface {}", .0.display())]
    InterfaceParse(PathBuf, #[source] serde_json::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("failed to find pending tx")]
    PendingTx(#[from] PendingTransactionError),

    #[error("no receipt for {call} within {timeout:?}")]
    ReceiptTimeout { call: ContractCall, timeout: Duration },

    #[error("rpc error")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("serde_json error")]
    SerdeJson(#[from] serde_json::Error),

    #[error("failed to build eth transaction")]
    TransactionBuilderEth(#[from] TransactionBuilderError<Ethereum>),

    #[error("`{0}` did not return a single unsigned integer")]
    UnexpectedOutput(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid rpc url: {0}")]
    InvalidRpcUrl(String),

    #[error("invalid signer key")]
    InvalidSignerKey(#[from] LocalSignerError),

    #[error("missing required option `{0}`")]
    Missing(&'static str),

    #[error("signer address {configured} does not match the address of the signer key ({derived})")]
    SignerMismatch { configured: Address, derived: Address },

    #[error("toml deserialization error")]
    TomlDe(#[from] toml::de::Error),

    #[error("toml serialization error")]
    TomlSer(#[from] toml::ser::Error),
}
