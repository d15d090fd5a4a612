use super::common::ChainCliArgs;
use crate::error::CliError;
use alloy::network::ReceiptResponse;
use b2ms_core::{deploy::register_donor, interface::ContractInterface, sender::TxSender};
use tracing::warn;

pub async fn setup(args: ChainCliArgs) -> Result<(), CliError> {
    let config = args.harness_config()?;
    let contract = config.contract_address()?;
    let interface = ContractInterface::from_file(&config.interface_file)?;
    let sender = TxSender::connect(&config).await?;

    let confirmed = register_donor(&sender, contract, &interface).await?;
    if !confirmed.receipt.status() {
        warn!(
            "registerDonor reverted (tx {}); {} may already be registered",
            confirmed.tx_hash,
            sender.address()
        );
    }

    Ok(())
}
