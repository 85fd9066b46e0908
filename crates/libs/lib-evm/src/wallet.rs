//! # Wallet Service
//!
//! The signer boundary for transaction submission. The core never touches key
//! material: [`RpcWallet`] delegates signing to a JSON-RPC node that manages
//! the account (`eth_sendTransaction`) and awaits inclusion by polling
//! `eth_getTransactionReceipt`.
//!
//! [`Signer`] is the seam the state machine depends on, so tests can inject
//! a scripted signer instead of a live node.

use crate::types::TxReceipt;
use alloy_primitives::{hex, Address, U256};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// ERC-20 `approve(address,uint256)` selector.
const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// Receipt polling cadence and bound. Timeouts beyond this are reported,
/// never silently ignored.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

/// Wallet operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// No account connected.
    #[error("wallet not connected")]
    NotConnected,
    /// JSON-RPC transport or node error.
    #[error("rpc error: {0}")]
    Rpc(String),
    /// The node accepted the transaction but no receipt appeared in time.
    #[error("timed out waiting for receipt of {0}")]
    Timeout(String),
    /// Unexpected response shape from the node.
    #[error("decoding error: {0}")]
    Decoding(String),
}

/// Wallet connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletStatus {
    Disconnected,
    Connected(Address),
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected(_))
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            WalletStatus::Connected(addr) => Some(*addr),
            WalletStatus::Disconnected => None,
        }
    }
}

/// Handle to a submitted but not yet confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTx {
    pub tx_hash: String,
}

/// Transaction signing and submission boundary.
///
/// Submission returns a [`PendingTx`] handle as soon as the node accepts the
/// transaction; [`Signer::confirm`] awaits its inclusion and reports the
/// execution status.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Address of the connected account, if any.
    fn address(&self) -> Option<Address>;

    /// Submit an ERC-20 approval for `spender`.
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<PendingTx, WalletError>;

    /// Submit a raw transaction.
    async fn send_transaction(
        &self,
        to: Address,
        data: &str,
        gas: Option<u64>,
    ) -> Result<PendingTx, WalletError>;

    /// Await confirmation of a previously submitted transaction.
    async fn confirm(&self, pending: PendingTx) -> Result<TxReceipt, WalletError>;
}

/// Signer backed by a JSON-RPC node with a managed account.
pub struct RpcWallet {
    http: Client,
    rpc_url: String,
    account: Option<Address>,
}

impl RpcWallet {
    /// Create a wallet service against an RPC endpoint, initially disconnected.
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            account: None,
        })
    }

    /// Connect an account managed by the node.
    pub fn connect(&mut self, account: Address) {
        self.account = Some(account);
    }

    pub fn disconnect(&mut self) {
        self.account = None;
    }

    pub fn status(&self) -> WalletStatus {
        match self.account {
            Some(addr) => WalletStatus::Connected(addr),
            None => WalletStatus::Disconnected,
        }
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: Value = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::Rpc(format!("{method} request failed: {e}")))?
            .json()
            .await
            .map_err(|e| WalletError::Decoding(format!("{method} response: {e}")))?;

        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown node error");
            return Err(WalletError::Rpc(message.to_string()));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| WalletError::Decoding(format!("{method}: missing result")))
    }

    async fn submit(
        &self,
        to: Address,
        data: &str,
        gas: Option<u64>,
    ) -> Result<PendingTx, WalletError> {
        let from = self.account.ok_or(WalletError::NotConnected)?;

        let mut tx = json!({
            "from": format!("{from:#x}"),
            "to": format!("{to:#x}"),
            "data": data,
        });
        if let Some(gas) = gas {
            tx["gas"] = json!(format!("{gas:#x}"));
        }

        let result = self.rpc_call("eth_sendTransaction", json!([tx])).await?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| WalletError::Decoding("non-string transaction hash".to_string()))?
            .to_string();

        debug!("transaction submitted: {}", tx_hash);
        Ok(PendingTx { tx_hash })
    }
}

#[async_trait]
impl Signer for RpcWallet {
    fn address(&self) -> Option<Address> {
        self.account
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<PendingTx, WalletError> {
        let data = approve_calldata(spender, amount);
        debug!("approving {} to spend via {}", token, spender);
        self.submit(token, &data, None).await
    }

    async fn send_transaction(
        &self,
        to: Address,
        data: &str,
        gas: Option<u64>,
    ) -> Result<PendingTx, WalletError> {
        self.submit(to, data, gas).await
    }

    async fn confirm(&self, pending: PendingTx) -> Result<TxReceipt, WalletError> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            let receipt = self
                .rpc_call("eth_getTransactionReceipt", json!([pending.tx_hash]))
                .await?;

            if !receipt.is_null() {
                let status = receipt
                    .get("status")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        WalletError::Decoding("receipt without status field".to_string())
                    })?;

                return Ok(TxReceipt {
                    tx_hash: pending.tx_hash,
                    success: status == "0x1",
                });
            }

            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }

        warn!(
            "no receipt for {} after {} polls",
            pending.tx_hash, RECEIPT_POLL_ATTEMPTS
        );
        Err(WalletError::Timeout(pending.tx_hash))
    }
}

/// ABI-encode an ERC-20 `approve(spender, amount)` call.
fn approve_calldata(spender: Address, amount: U256) -> String {
    let mut data = Vec::with_capacity(4 + 32 + 32);
    data.extend_from_slice(&APPROVE_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(spender.as_slice());
    data.extend_from_slice(&amount.to_be_bytes::<32>());
    format!("0x{}", hex::encode(data))
}
