use crate::{
    interface::ContractInterface,
    sender::{ConfirmedTx, TxSender},
    Error, Result,
};
use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash, TxKind, U256},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Parameterless call that enrolls the sender as a donor.
pub const REGISTER_DONOR_FN: &str = "registerDonor";

/// View functions read back after a run, in [`ContractTotals`] field order.
pub const TOTALS_FNS: [&str; 3] = ["viewTotal", "viewBankTotal", "viewTotalSpent"];

/// Contract-wide counters, as reported by the view functions in [`TOTALS_FNS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractTotals {
    pub donated: U256,
    pub bank: U256,
    pub spent: U256,
}

impl ContractTotals {
    pub fn log(&self) {
        info!("Total Donated: {}", self.donated);
        info!("Bank Inventory: {}", self.bank);
        info!("Total Spent: {}", self.spent);
    }
}

/// Where a contract was deployed; saved as JSON so later runs can find it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Deployment {
    pub address: Address,
    pub network: String,
    pub chain_id: u64,
    pub tx_hash: TxHash,
    pub timestamp: DateTime<Utc>,
}

impl Deployment {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Writes pretty-printed JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Deploys the interface's creation bytecode from the sender's account.
pub async fn deploy_contract(
    sender: &TxSender,
    interface: &ContractInterface,
    network: &str,
) -> Result<Deployment> {
    let code = interface.deploy_code()?;
    info!("deploying contract ({} bytes of initcode)...", code.len());
    let confirmed = sender.send_and_confirm(TxKind::Create, code).await?;
    let address = confirmed
        .receipt
        .contract_address()
        .ok_or(Error::ContractAddressMissing(confirmed.tx_hash))?;
    info!("contract deployed at {address}");

    Ok(Deployment {
        address,
        network: network.to_owned(),
        chain_id: sender.chain_id(),
        tx_hash: confirmed.tx_hash,
        timestamp: Utc::now(),
    })
}

/// Registers the sender as a donor so donation updates don't revert.
pub async fn register_donor(
    sender: &TxSender,
    contract: Address,
    interface: &ContractInterface,
) -> Result<ConfirmedTx> {
    let input = interface.encode_call(REGISTER_DONOR_FN, &[] as &[&str])?;
    let confirmed = sender
        .send_and_confirm(TxKind::Call(contract), input)
        .await?;
    info!(
        "donor {} registered (tx {}, status {})",
        sender.address(),
        confirmed.tx_hash,
        u8::from(confirmed.receipt.status())
    );
    Ok(confirmed)
}

async fn call_uint(
    sender: &TxSender,
    contract: Address,
    interface: &ContractInterface,
    name: &str,
) -> Result<U256> {
    let input = interface.encode_call(name, &[] as &[&str])?;
    let output = sender.call(contract, input).await?;
    interface.decode_uint_output(name, &output)
}

/// Reads the donated, banked and spent totals through `eth_call`.
pub async fn read_totals(
    sender: &TxSender,
    contract: Address,
    interface: &ContractInterface,
) -> Result<ContractTotals> {
    let [total_fn, bank_fn, spent_fn] = TOTALS_FNS;
    Ok(ContractTotals {
        donated: call_uint(sender, contract, interface, total_fn).await?,
        bank: call_uint(sender, contract, interface, bank_fn).await?,
        spent: call_uint(sender, contract, interface, spent_fn).await?,
    })
}
