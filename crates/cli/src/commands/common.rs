//! Arguments shared by every subcommand that talks to the chain.

use crate::error::CliError;
use crate::util::parse_duration;
use alloy::primitives::Address;
use b2ms_core::{
    config::{ConfigFile, HarnessConfig},
    deploy::Deployment,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "b2ms.toml";
pub const DEFAULT_OUT_DIR: &str = "./b2ms-results";

#[derive(Clone, Debug, clap::Args)]
pub struct ChainCliArgs {
    /// Path to a TOML config file.
    #[arg(
        short,
        long,
        long_help = "Path to a TOML config file. Defaults to ./b2ms.toml when it exists. Env vars and flags override values from the file."
    )]
    pub config: Option<PathBuf>,

    /// RPC URL to send transactions to.
    #[arg(env = "B2MS_RPC_URL", short, long)]
    pub rpc_url: Option<String>,

    /// Private key of the sending account.
    #[arg(
        env = "B2MS_PRIVATE_KEY",
        short,
        long = "priv-key",
        hide_env_values = true
    )]
    pub private_key: Option<String>,

    /// Expected address of the sending account.
    #[arg(
        env = "B2MS_SIGNER_ADDRESS",
        long,
        long_help = "Expected address of the sending account. Startup fails if it doesn't match the private key."
    )]
    pub signer_address: Option<Address>,

    /// Address of the deployed contract.
    #[arg(env = "B2MS_CONTRACT_ADDRESS", long = "contract")]
    pub contract_address: Option<Address>,

    /// Contract interface: a compiler artifact with `abi` (and `bytecode`), or a bare ABI array.
    #[arg(env = "B2MS_INTERFACE_FILE", short, long = "interface")]
    pub interface_file: Option<PathBuf>,

    /// How long to wait for each receipt before aborting.
    #[arg(
        env = "B2MS_RECEIPT_TIMEOUT",
        long,
        long_help = "How long to wait for each receipt before aborting the run, e.g. 30s or 2m. Waits indefinitely when unset.",
        value_parser = parse_duration
    )]
    pub receipt_timeout: Option<Duration>,

    /// Gas limit for every transaction.
    #[arg(long)]
    pub gas_limit: Option<u64>,

    /// Gas price for every transaction, in wei.
    #[arg(long)]
    pub gas_price: Option<u64>,

    /// Chain ID to sign for. Queried from the node when unset.
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Network name recorded in deployment files.
    #[arg(long)]
    pub network: Option<String>,

    /// Deployment record written by `deploy`.
    #[arg(
        env = "B2MS_DEPLOYMENT_FILE",
        short,
        long,
        long_help = "Deployment record written by `deploy`. Other commands read the contract address from it when none is configured; `deploy` writes to it (default deployment/<chain_id>.json)."
    )]
    pub deployment_file: Option<PathBuf>,
}

impl ChainCliArgs {
    /// Values given by env var or flag.
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            rpc_url: self.rpc_url.to_owned(),
            signer_key: self.private_key.to_owned(),
            signer_address: self.signer_address,
            contract_address: self.contract_address,
            interface_file: self.interface_file.to_owned(),
            network: self.network.to_owned(),
            chain_id: self.chain_id,
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
            receipt_timeout_secs: self.receipt_timeout.map(|t| t.as_secs()),
            n_donations: None,
            n_matches: None,
        }
    }

    /// Loads the config file (if any) and layers env vars and flags on top.
    pub fn config_file(&self) -> Result<ConfigFile, CliError> {
        let base = match &self.config {
            Some(path) => ConfigFile::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                debug!("loading {DEFAULT_CONFIG_FILE}");
                ConfigFile::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => ConfigFile::default(),
        };
        let mut config = base.merge(self.overrides());

        if config.contract_address.is_none() {
            if let Some(path) = &self.deployment_file {
                let deployment = Deployment::load(path)?;
                debug!(
                    "using contract {} from {}",
                    deployment.address,
                    path.display()
                );
                if config.chain_id.is_some_and(|id| id != deployment.chain_id) {
                    warn!(
                        "{} was deployed on chain {}, but chain_id is set to {:?}",
                        path.display(),
                        deployment.chain_id,
                        config.chain_id
                    );
                }
                config.contract_address = Some(deployment.address);
            }
        }
        Ok(config)
    }

    pub fn harness_config(&self) -> Result<HarnessConfig, CliError> {
        Ok(self.config_file()?.resolve()?)
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct OutputCliArgs {
    /// Directory for metrics, charts and the HTML report.
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Open the HTML report in a browser when done.
    #[arg(long)]
    pub open: bool,
}
