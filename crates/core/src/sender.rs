use crate::{config::HarnessConfig, Result};
use alloy::{
    network::{AnyNetwork, AnyTransactionReceipt, AnyTxEnvelope, EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, TxKind},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionInput, TransactionRequest},
};
use std::time::{Duration, Instant};
use tracing::debug;

pub type AnyProvider = DynProvider<AnyNetwork>;

/// A transaction that was broadcast and included.
#[derive(Clone, Debug)]
pub struct ConfirmedTx {
    pub tx_hash: TxHash,
    pub receipt: AnyTransactionReceipt,
    /// Broadcast-to-receipt wall-clock time.
    pub latency: Duration,
}

/// Signs and sends transactions from a single account, one at a time.
#[derive(Clone)]
pub struct TxSender {
    rpc_client: AnyProvider,
    wallet: EthereumWallet,
    address: Address,
    chain_id: u64,
    gas_limit: u64,
    gas_price: u128,
}

impl TxSender {
    /// Connects to the configured RPC endpoint. The chain ID is queried from
    /// the node unless the config pins one.
    pub async fn connect(config: &HarnessConfig) -> Result<Self> {
        let rpc_client = DynProvider::new(
            ProviderBuilder::new()
                .network::<AnyNetwork>()
                .connect_http(config.rpc_url.to_owned()),
        );
        let chain_id = match config.chain_id {
            Some(chain_id) => chain_id,
            None => rpc_client.get_chain_id().await?,
        };
        debug!("connected to {} (chain id {chain_id})", config.rpc_url);

        Ok(Self {
            rpc_client,
            wallet: EthereumWallet::from(config.signer.to_owned()),
            address: config.signer_address(),
            chain_id,
            gas_limit: config.gas_limit,
            gas_price: u128::from(config.gas_price),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn rpc_client(&self) -> &AnyProvider {
        &self.rpc_client
    }

    /// Read-only `eth_call` from the sender's account against the latest block.
    pub async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let tx_req = TransactionRequest {
            from: Some(self.address),
            to: Some(TxKind::Call(to)),
            input: TransactionInput::new(input),
            ..Default::default()
        };
        Ok(self.rpc_client.call(tx_req.into()).await?)
    }

    /// Fetches the sender's nonce, signs a legacy tx, broadcasts it and waits for its receipt.
    ///
    /// The wait is unbounded; callers that need a deadline wrap this future.
    pub async fn send_and_confirm(&self, to: TxKind, input: Bytes) -> Result<ConfirmedTx> {
        let nonce = self.rpc_client.get_transaction_count(self.address).await?;
        let tx_req = TransactionRequest {
            from: Some(self.address),
            to: Some(to),
            input: TransactionInput::new(input),
            nonce: Some(nonce),
            gas: Some(self.gas_limit),
            gas_price: Some(self.gas_price),
            chain_id: Some(self.chain_id),
            ..Default::default()
        };
        let tx = tx_req.build(&self.wallet).await?;
        let tx_hash = *tx.tx_hash();
        debug!("sending tx {tx_hash} (nonce {nonce})");

        let start = Instant::now();
        let pending = self
            .rpc_client
            .send_tx_envelope(AnyTxEnvelope::Ethereum(tx))
            .await?;
        let receipt = pending.get_receipt().await?;
        let latency = start.elapsed();
        debug!("tx {tx_hash} landed in block {:?}", receipt.block_number);

        Ok(ConfirmedTx {
            tx_hash,
            receipt,
            latency,
        })
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::{config::ConfigFile, interface::ContractInterface};
    use alloy::{
        json_abi::JsonAbi,
        network::ReceiptResponse,
        node_bindings::{Anvil, AnvilInstance},
    };

    pub const ANVIL_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    pub const TEST_GAS_LIMIT: u64 = 3_000_000;
    pub const TEST_GAS_PRICE: u64 = 2_000_000_000;

    /// Copies [`STUB_RUNTIME`] into place.
    pub const STUB_INITCODE: &str = "0x600a600c600039600a6000f3602a60005260206000f3";
    /// Returns the word 42 for any call.
    pub const STUB_RUNTIME: &str = "0x602a60005260206000f3";

    const STUB_ABI: &str = r#"[
        {"type":"function","name":"registerDonor","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"updateDonation","inputs":[{"name":"bloodType","type":"uint8"}],"outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"compareBlood","inputs":[{"name":"recipientType","type":"uint8"}],"outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"viewTotal","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"viewBankTotal","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"viewTotalSpent","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}
    ]"#;

    pub fn spawn_anvil() -> AnvilInstance {
        Anvil::new().block_time(1).try_spawn().unwrap()
    }

    pub fn stub_interface() -> ContractInterface {
        let abi: JsonAbi = serde_json::from_str(STUB_ABI).unwrap();
        ContractInterface::new(abi, Some(STUB_INITCODE.parse().unwrap()))
    }

    pub async fn anvil_sender(anvil: &AnvilInstance) -> TxSender {
        let config = ConfigFile {
            rpc_url: Some(anvil.endpoint()),
            signer_key: Some(ANVIL_KEY.to_owned()),
            interface_file: Some("BloodMatching.json".into()),
            gas_limit: Some(TEST_GAS_LIMIT),
            gas_price: Some(TEST_GAS_PRICE),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        TxSender::connect(&config).await.unwrap()
    }

    #[tokio::test]
    async fn connect_reads_chain_id_from_node() {
        let anvil = spawn_anvil();
        let sender = anvil_sender(&anvil).await;
        assert_eq!(sender.chain_id(), anvil.chain_id());
        assert_eq!(sender.address(), anvil.addresses()[0]);
    }

    #[tokio::test]
    async fn call_returns_contract_output() {
        let anvil = spawn_anvil();
        let sender = anvil_sender(&anvil).await;
        let confirmed = sender
            .send_and_confirm(TxKind::Create, STUB_INITCODE.parse().unwrap())
            .await
            .unwrap();
        let contract = confirmed.receipt.contract_address().unwrap();

        let output = sender.call(contract, Bytes::new()).await.unwrap();
        assert_eq!(output.len(), 32);
        assert_eq!(output[31], 42);
    }
}
