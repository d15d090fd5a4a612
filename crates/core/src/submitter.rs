use crate::{
    interface::ContractInterface,
    record::{ContractCall, TxOutcome},
    sender::TxSender,
    Result,
};
use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxKind},
};
use async_trait::async_trait;

/// Submits a single contract call and blocks until it is confirmed.
#[async_trait]
pub trait TxSubmitter: Send + Sync {
    async fn submit(&self, call: &ContractCall) -> Result<TxOutcome>;
}

#[async_trait]
impl<T: TxSubmitter + ?Sized> TxSubmitter for Box<T> {
    async fn submit(&self, call: &ContractCall) -> Result<TxOutcome> {
        (**self).submit(call).await
    }
}

/// Sends calls to a deployed contract over JSON-RPC.
pub struct RpcSubmitter {
    sender: TxSender,
    contract: Address,
    interface: ContractInterface,
}

impl RpcSubmitter {
    pub fn new(sender: TxSender, contract: Address, interface: ContractInterface) -> Self {
        Self {
            sender,
            contract,
            interface,
        }
    }

    pub fn sender(&self) -> &TxSender {
        &self.sender
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }
}

#[async_trait]
impl TxSubmitter for RpcSubmitter {
    async fn submit(&self, call: &ContractCall) -> Result<TxOutcome> {
        let input = self.interface.encode_contract_call(call)?;
        let confirmed = self
            .sender
            .send_and_confirm(TxKind::Call(self.contract), input)
            .await?;
        Ok(TxOutcome {
            tx_hash: confirmed.tx_hash,
            gas_used: confirmed.receipt.gas_used(),
            latency: confirmed.latency,
            status: confirmed.receipt.status(),
        })
    }
}
