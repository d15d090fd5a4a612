use crate::error::ConfigError;
use alloy::{
    primitives::Address, signers::local::PrivateKeySigner, transports::http::reqwest::Url,
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::debug;

pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;
pub const DEFAULT_GAS_PRICE: u64 = 0;
pub const DEFAULT_DONATIONS: u64 = 1000;
pub const DEFAULT_MATCHES: u64 = 500;

/// Harness options as they appear in a TOML config file.
///
/// Every field is optional so that files, environment variables and CLI
/// flags can be layered with [`ConfigFile::merge`] before resolving.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// JSON-RPC endpoint of the target node.
    pub rpc_url: Option<String>,

    /// Hex-encoded private key used to sign every transaction.
    pub signer_key: Option<String>,

    /// Expected address of `signer_key`; checked at startup when present.
    pub signer_address: Option<Address>,

    /// Address of the deployed blood-matching contract.
    pub contract_address: Option<Address>,

    /// Hardhat artifact (or bare ABI) describing the contract.
    pub interface_file: Option<PathBuf>,

    /// Human-readable network name, recorded in deployment files.
    pub network: Option<String>,

    /// Chain ID; fetched from the node when omitted.
    pub chain_id: Option<u64>,

    pub gas_limit: Option<u64>,

    /// Legacy gas price in wei.
    pub gas_price: Option<u64>,

    /// Upper bound on how long to wait for each receipt. Waits forever when omitted.
    pub receipt_timeout_secs: Option<u64>,

    pub n_donations: Option<u64>,

    pub n_matches: Option<u64>,
}

impl ConfigFile {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let file_contents = std::fs::read_to_string(file_path)?;
        let config = Self::from_toml(&file_contents)?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn encode_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn save_toml(&self, file_path: impl AsRef<Path>) -> Result<(), crate::Error> {
        let encoded = self.encode_toml()?;
        std::fs::write(file_path, encoded)?;
        Ok(())
    }

    /// A starting point for new config files, with every default spelled out.
    pub fn template() -> Self {
        Self {
            rpc_url: Some("http://localhost:8545".to_owned()),
            signer_key: Some(String::new()),
            signer_address: None,
            contract_address: None,
            interface_file: Some("artifacts/contracts/Match.sol/BloodMatching.json".into()),
            network: None,
            chain_id: None,
            gas_limit: Some(DEFAULT_GAS_LIMIT),
            gas_price: Some(DEFAULT_GAS_PRICE),
            receipt_timeout_secs: None,
            n_donations: Some(DEFAULT_DONATIONS),
            n_matches: Some(DEFAULT_MATCHES),
        }
    }

    /// Layers `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: ConfigFile) -> Self {
        Self {
            rpc_url: overrides.rpc_url.or(self.rpc_url),
            signer_key: overrides.signer_key.or(self.signer_key),
            signer_address: overrides.signer_address.or(self.signer_address),
            contract_address: overrides.contract_address.or(self.contract_address),
            interface_file: overrides.interface_file.or(self.interface_file),
            network: overrides.network.or(self.network),
            chain_id: overrides.chain_id.or(self.chain_id),
            gas_limit: overrides.gas_limit.or(self.gas_limit),
            gas_price: overrides.gas_price.or(self.gas_price),
            receipt_timeout_secs: overrides.receipt_timeout_secs.or(self.receipt_timeout_secs),
            n_donations: overrides.n_donations.or(self.n_donations),
            n_matches: overrides.n_matches.or(self.n_matches),
        }
    }

    /// Validates the layered options and fills in defaults.
    pub fn resolve(self) -> Result<HarnessConfig, ConfigError> {
        let rpc_url = self.rpc_url.ok_or(ConfigError::Missing("rpc_url"))?;
        let rpc_url = Url::parse(&rpc_url)
            .map_err(|e| ConfigError::InvalidRpcUrl(format!("{rpc_url} ({e})")))?;

        let signer_key = self
            .signer_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("signer_key"))?;
        let signer = PrivateKeySigner::from_str(signer_key.trim())?;
        if let Some(configured) = self.signer_address {
            if configured != signer.address() {
                return Err(ConfigError::SignerMismatch {
                    configured,
                    derived: signer.address(),
                });
            }
        }
        debug!("using signer {}", signer.address());

        let interface_file = self
            .interface_file
            .ok_or(ConfigError::Missing("interface_file"))?;

        Ok(HarnessConfig {
            rpc_url,
            signer,
            contract_address: self.contract_address,
            interface_file,
            network: self.network,
            chain_id: self.chain_id,
            gas_limit: self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT),
            gas_price: self.gas_price.unwrap_or(DEFAULT_GAS_PRICE),
            receipt_timeout: self.receipt_timeout_secs.map(Duration::from_secs),
            n_donations: self.n_donations.unwrap_or(DEFAULT_DONATIONS),
            n_matches: self.n_matches.unwrap_or(DEFAULT_MATCHES),
        })
    }
}

/// Fully-resolved harness configuration.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub contract_address: Option<Address>,
    pub interface_file: PathBuf,
    pub network: Option<String>,
    pub chain_id: Option<u64>,
    pub gas_limit: u64,
    pub gas_price: u64,
    pub receipt_timeout: Option<Duration>,
    pub n_donations: u64,
    pub n_matches: u64,
}

impl HarnessConfig {
    /// The contract address, which every command except `deploy` needs.
    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        self.contract_address
            .ok_or(ConfigError::Missing("contract_address"))
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }
}
