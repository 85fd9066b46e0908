//! # Transaction Submitter
//!
//! Drives the two-phase on-chain sequence for one execution attempt:
//! token-spend approval first, then the swap transaction, each awaited to
//! confirmation before the next step. A failure at either phase aborts the
//! remainder - there is no partial-success fallback and no automatic retry.

use crate::types::{TradeQuote, TxReceipt};
use crate::wallet::Signer;
use alloy_primitives::U256;
use lib_core::error::{Result, SwapError};
use tracing::{info, warn};

/// Milestones reported while an attempt is executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitterEvent {
    /// The approval transaction is confirmed on-chain.
    ApprovalConfirmed(TxReceipt),
    /// The swap transaction was accepted by the node and is awaiting
    /// confirmation.
    SwapSubmitted { tx_hash: String },
    /// The swap transaction is confirmed on-chain.
    SwapConfirmed(TxReceipt),
}

/// Executes one trade quote against a signer.
pub struct TransactionSubmitter<'a> {
    signer: &'a dyn Signer,
}

impl<'a> TransactionSubmitter<'a> {
    pub fn new(signer: &'a dyn Signer) -> Self {
        Self { signer }
    }

    /// Run approval-then-swap for `quote`.
    ///
    /// Progress milestones are reported through `on_event`; the final receipt
    /// of the swap transaction is returned. Errors map to
    /// [`SwapError::ApprovalFailed`] or [`SwapError::SwapFailed`] depending on
    /// the phase that failed.
    pub async fn execute<F>(&self, quote: &TradeQuote, mut on_event: F) -> Result<TxReceipt>
    where
        F: FnMut(SubmitterEvent) + Send,
    {
        let sell_amount = U256::from_str_radix(&quote.sell_amount, 10)
            .map_err(|e| SwapError::QuoteFailed(format!("malformed sellAmount: {e}")))?;

        // Phase 1: authorize the allowance target to pull the sell token.
        let pending = self
            .signer
            .approve(quote.sell_token, quote.allowance_target, sell_amount)
            .await
            .map_err(|e| SwapError::ApprovalFailed(e.to_string()))?;

        let approval = self
            .signer
            .confirm(pending)
            .await
            .map_err(|e| SwapError::ApprovalFailed(e.to_string()))?;

        if !approval.success {
            return Err(SwapError::ApprovalFailed(format!(
                "approval transaction reverted ({})",
                approval.tx_hash
            )));
        }

        info!("token approved: {}", approval.tx_hash);
        on_event(SubmitterEvent::ApprovalConfirmed(approval));

        // Phase 2: the swap itself. Must not start before the approval
        // receipt is confirmed, which the awaits above guarantee.
        let gas = match quote.gas.as_deref() {
            Some(text) => match text.parse::<u64>() {
                Ok(gas) => Some(gas),
                Err(e) => {
                    warn!("unparseable gas estimate '{}': {}; letting the node estimate", text, e);
                    None
                }
            },
            None => None,
        };

        let pending = self
            .signer
            .send_transaction(quote.to, &quote.data, gas)
            .await
            .map_err(|e| SwapError::SwapFailed(e.to_string()))?;

        info!("swap transaction sent: {}", pending.tx_hash);
        on_event(SubmitterEvent::SwapSubmitted {
            tx_hash: pending.tx_hash.clone(),
        });

        let receipt = self
            .signer
            .confirm(pending)
            .await
            .map_err(|e| SwapError::SwapFailed(e.to_string()))?;

        if !receipt.success {
            return Err(SwapError::SwapFailed(format!(
                "swap transaction reverted ({})",
                receipt.tx_hash
            )));
        }

        info!("swap confirmed: {}", receipt.tx_hash);
        on_event(SubmitterEvent::SwapConfirmed(receipt.clone()));

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{PendingTx, WalletError};
    use alloy_primitives::Address;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Signer double with scripted outcomes and call counters.
    struct ScriptedSigner {
        approve_result: std::result::Result<PendingTx, WalletError>,
        send_result: std::result::Result<PendingTx, WalletError>,
        /// Confirmation outcome per transaction hash.
        receipts: HashMap<String, std::result::Result<TxReceipt, WalletError>>,
        approvals: AtomicUsize,
        sends: AtomicUsize,
    }

    impl ScriptedSigner {
        fn new(
            approve_result: std::result::Result<PendingTx, WalletError>,
            send_result: std::result::Result<PendingTx, WalletError>,
        ) -> Self {
            Self {
                approve_result,
                send_result,
                receipts: HashMap::new(),
                approvals: AtomicUsize::new(0),
                sends: AtomicUsize::new(0),
            }
        }

        fn with_receipt(mut self, hash: &str, success: bool) -> Self {
            self.receipts
                .insert(hash.to_string(), Ok(receipt(hash, success)));
            self
        }
    }

    #[async_trait]
    impl Signer for ScriptedSigner {
        fn address(&self) -> Option<Address> {
            Some(Address::from_str("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap())
        }

        async fn approve(
            &self,
            _token: Address,
            _spender: Address,
            _amount: U256,
        ) -> std::result::Result<PendingTx, WalletError> {
            self.approvals.fetch_add(1, Ordering::SeqCst);
            self.approve_result.clone()
        }

        async fn send_transaction(
            &self,
            _to: Address,
            _data: &str,
            _gas: Option<u64>,
        ) -> std::result::Result<PendingTx, WalletError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            self.send_result.clone()
        }

        async fn confirm(
            &self,
            pending: PendingTx,
        ) -> std::result::Result<TxReceipt, WalletError> {
            self.receipts
                .get(&pending.tx_hash)
                .cloned()
                .unwrap_or(Err(WalletError::Timeout(pending.tx_hash)))
        }
    }

    fn pending(hash: &str) -> PendingTx {
        PendingTx {
            tx_hash: hash.to_string(),
        }
    }

    fn receipt(hash: &str, success: bool) -> TxReceipt {
        TxReceipt {
            tx_hash: hash.to_string(),
            success,
        }
    }

    fn quote() -> TradeQuote {
        TradeQuote {
            sell_token: Address::from_str("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap(),
            buy_token: Address::from_str("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap(),
            sell_amount: "1000000000000000000".to_string(),
            buy_amount: "3000000000".to_string(),
            allowance_target: Address::from_str("0xDef1C0ded9bec7F1a1670819833240f027b25EfF")
                .unwrap(),
            to: Address::from_str("0xDef1C0ded9bec7F1a1670819833240f027b25EfF").unwrap(),
            data: "0xd9627aa4".to_string(),
            gas: Some("111000".to_string()),
        }
    }

    #[tokio::test]
    async fn happy_path_reports_milestones_in_order() {
        let signer = ScriptedSigner::new(Ok(pending("0xaaa")), Ok(pending("0xbbb")))
            .with_receipt("0xaaa", true)
            .with_receipt("0xbbb", true);
        let submitter = TransactionSubmitter::new(&signer);

        let mut events = Vec::new();
        let final_receipt = submitter
            .execute(&quote(), |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(final_receipt.tx_hash, "0xbbb");
        assert_eq!(
            events,
            vec![
                SubmitterEvent::ApprovalConfirmed(receipt("0xaaa", true)),
                SubmitterEvent::SwapSubmitted {
                    tx_hash: "0xbbb".to_string()
                },
                SubmitterEvent::SwapConfirmed(receipt("0xbbb", true)),
            ]
        );
        assert_eq!(signer.approvals.load(Ordering::SeqCst), 1);
        assert_eq!(signer.sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn approval_failure_never_reaches_the_swap() {
        let signer = ScriptedSigner::new(
            Err(WalletError::Rpc("user rejected".to_string())),
            Ok(pending("0xbbb")),
        )
        .with_receipt("0xbbb", true);
        let submitter = TransactionSubmitter::new(&signer);

        let err = submitter.execute(&quote(), |_| {}).await.unwrap_err();
        assert!(matches!(err, SwapError::ApprovalFailed(_)));
        assert_eq!(signer.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reverted_approval_counts_as_approval_failure() {
        let signer = ScriptedSigner::new(Ok(pending("0xaaa")), Ok(pending("0xbbb")))
            .with_receipt("0xaaa", false)
            .with_receipt("0xbbb", true);
        let submitter = TransactionSubmitter::new(&signer);

        let err = submitter.execute(&quote(), |_| {}).await.unwrap_err();
        assert!(matches!(err, SwapError::ApprovalFailed(_)));
        assert_eq!(signer.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reverted_swap_after_confirmed_approval_is_swap_failure() {
        let signer = ScriptedSigner::new(Ok(pending("0xaaa")), Ok(pending("0xbbb")))
            .with_receipt("0xaaa", true)
            .with_receipt("0xbbb", false);
        let submitter = TransactionSubmitter::new(&signer);

        let mut events = Vec::new();
        let err = submitter
            .execute(&quote(), |e| events.push(e))
            .await
            .unwrap_err();

        assert!(matches!(err, SwapError::SwapFailed(_)));
        // The earlier milestones were still reported before the failure.
        assert_eq!(
            events,
            vec![
                SubmitterEvent::ApprovalConfirmed(receipt("0xaaa", true)),
                SubmitterEvent::SwapSubmitted {
                    tx_hash: "0xbbb".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn unconfirmed_approval_is_approval_failure() {
        // Receipt never appears: confirm times out.
        let signer = ScriptedSigner::new(Ok(pending("0xaaa")), Ok(pending("0xbbb")));
        let submitter = TransactionSubmitter::new(&signer);

        let err = submitter.execute(&quote(), |_| {}).await.unwrap_err();
        assert!(matches!(err, SwapError::ApprovalFailed(_)));
        assert_eq!(signer.sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_quote_amount_aborts_before_any_transaction() {
        let mut bad_quote = quote();
        bad_quote.sell_amount = "not-a-number".to_string();

        let signer = ScriptedSigner::new(Ok(pending("0xaaa")), Ok(pending("0xbbb")))
            .with_receipt("0xaaa", true)
            .with_receipt("0xbbb", true);
        let submitter = TransactionSubmitter::new(&signer);

        let err = submitter.execute(&bad_quote, |_| {}).await.unwrap_err();
        assert!(matches!(err, SwapError::QuoteFailed(_)));
        assert_eq!(signer.approvals.load(Ordering::SeqCst), 0);
    }
}
