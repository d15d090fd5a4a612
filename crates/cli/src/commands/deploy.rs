use super::common::ChainCliArgs;
use crate::error::CliError;
use crate::util::bold;
use b2ms_core::{deploy::deploy_contract, interface::ContractInterface, sender::TxSender};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Debug, clap::Args)]
pub struct DeployCliArgs {
    #[command(flatten)]
    pub chain: ChainCliArgs,
}

pub async fn deploy(args: DeployCliArgs) -> Result<(), CliError> {
    let config = args.chain.harness_config()?;
    let interface = ContractInterface::from_file(&config.interface_file)?;
    let sender = TxSender::connect(&config).await?;

    let network = config
        .network
        .to_owned()
        .unwrap_or_else(|| sender.chain_id().to_string());
    let deployment = deploy_contract(&sender, &interface, &network).await?;

    let path = args.chain.deployment_file.unwrap_or_else(|| {
        PathBuf::from("deployment").join(format!("{}.json", deployment.chain_id))
    });
    if path.exists() {
        warn!("overwriting {}", path.display());
    }
    deployment.save(&path)?;
    info!("deployment saved to {}", path.display());
    info!(
        "pass {} (or set contract_address) to target it",
        bold(format!("--contract {}", deployment.address))
    );
    println!("{}", deployment.address);

    Ok(())
}
