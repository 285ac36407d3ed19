//! Spark wallet wrapper over the Breez SDK.
//!
//! One thin method per SDK operation the console wallet uses. Each method
//! builds a request value, awaits a single SDK call, and maps the failure
//! into a [`WalletError`] variant; no retries, caching, or coordination.

use std::sync::Arc;

use breez_sdk_spark::{
    connect, default_config, BreezSdk, ConnectRequest, GetInfoRequest, GetInfoResponse,
    GetPaymentRequest, InputType, ListPaymentsRequest, Payment, PrepareSendPaymentRequest,
    PrepareSendPaymentResponse, ReceivePaymentMethod, ReceivePaymentRequest,
    ReceivePaymentResponse, Seed, SendPaymentRequest, SendPaymentResponse, SyncWalletRequest,
};
use tracing::debug;

use crate::config::WalletConfig;
use crate::error::WalletError;

/// Parse a payment input (BOLT11 invoice, address, LNURL) without a
/// connected wallet. Recognition and validation happen inside the SDK.
pub async fn parse_input(input: &str) -> Result<InputType, WalletError> {
    breez_sdk_spark::parse(input, None)
        .await
        .map_err(|e| WalletError::ParseFailed(e.to_string()))
}

/// An authenticated session with the Spark network.
///
/// Wraps the Breez SDK connection handle. The handle owns all wallet
/// state; dropping the wallet after [`SparkWallet::disconnect`] closes
/// the session cleanly.
pub struct SparkWallet {
    config: WalletConfig,
    sdk: Arc<BreezSdk>,
}

impl SparkWallet {
    /// Connect to the Spark network and open the local storage.
    pub async fn connect(seed: Seed, config: WalletConfig) -> Result<Self, WalletError> {
        config.validate()?;

        let mut sdk_config = default_config(config.network.to_sdk_network());
        if config.api_key.is_some() {
            sdk_config.api_key = config.api_key.clone();
        } else {
            // Without an API key the real-time sync server rejects the
            // auth header; disable it so regtest connects cleanly.
            sdk_config.real_time_sync_server_url = None;
        }

        let request = ConnectRequest {
            config: sdk_config,
            seed,
            storage_dir: config.storage_dir.to_string_lossy().to_string(),
        };

        let sdk = connect(request)
            .await
            .map_err(|e| WalletError::InitializationFailed(e.to_string()))?;
        debug!(network = config.network.as_str(), "wallet connected");

        Ok(Self {
            config,
            sdk: Arc::new(sdk),
        })
    }

    /// The configuration this wallet was connected with.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Close the SDK connection.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.sdk
            .disconnect()
            .await
            .map_err(|e| WalletError::Wallet(e.to_string()))?;
        debug!("wallet disconnected");
        Ok(())
    }

    /// Wallet info including the current balance in sats.
    pub async fn get_info(&self, ensure_synced: bool) -> Result<GetInfoResponse, WalletError> {
        self.sdk
            .get_info(GetInfoRequest {
                ensure_synced: Some(ensure_synced),
            })
            .await
            .map_err(|e| WalletError::InfoQueryFailed(e.to_string()))
    }

    /// Force a sync with the Spark operators.
    pub async fn sync(&self) -> Result<(), WalletError> {
        self.sdk
            .sync_wallet(SyncWalletRequest {})
            .await
            .map(|_| ())
            .map_err(|e| WalletError::SyncFailed(e.to_string()))
    }

    /// Parse a payment input. See the module-level [`parse_input`].
    pub async fn parse(&self, input: &str) -> Result<InputType, WalletError> {
        parse_input(input).await
    }

    /// Create a BOLT11 Lightning invoice.
    ///
    /// `amount_sats` of `None` produces a zero-amount invoice the payer
    /// fills in; `expiry_secs` of `None` uses the SDK default.
    pub async fn create_bolt11_invoice(
        &self,
        amount_sats: Option<u64>,
        description: String,
        expiry_secs: Option<u32>,
    ) -> Result<ReceivePaymentResponse, WalletError> {
        self.sdk
            .receive_payment(build_bolt11_request(amount_sats, description, expiry_secs))
            .await
            .map_err(|e| WalletError::ReceiveFailed(e.to_string()))
    }

    /// The wallet's reusable Spark address for receiving any amount.
    pub async fn spark_address(&self) -> Result<String, WalletError> {
        let response = self
            .sdk
            .receive_payment(ReceivePaymentRequest {
                payment_method: ReceivePaymentMethod::SparkAddress,
            })
            .await
            .map_err(|e| WalletError::ReceiveFailed(e.to_string()))?;
        Ok(response.payment_request)
    }

    /// An on-chain Bitcoin deposit address for funding the wallet.
    pub async fn bitcoin_address(&self) -> Result<String, WalletError> {
        let response = self
            .sdk
            .receive_payment(ReceivePaymentRequest {
                payment_method: ReceivePaymentMethod::BitcoinAddress,
            })
            .await
            .map_err(|e| WalletError::ReceiveFailed(e.to_string()))?;
        Ok(response.payment_request)
    }

    /// Validate a payment request and quote fees before sending.
    ///
    /// `amount_sats` is required for zero-amount invoices and bare
    /// addresses; invoices with an encoded amount ignore it.
    pub async fn prepare_send_payment(
        &self,
        payment_request: &str,
        amount_sats: Option<u64>,
    ) -> Result<PrepareSendPaymentResponse, WalletError> {
        self.sdk
            .prepare_send_payment(PrepareSendPaymentRequest {
                payment_request: payment_request.to_string(),
                amount: amount_sats.map(u128::from),
                token_identifier: None,
            })
            .await
            .map_err(|e| WalletError::PaymentFailed(e.to_string()))
    }

    /// Execute a payment prepared with [`SparkWallet::prepare_send_payment`].
    ///
    /// The SDK routes through Lightning, Spark, or on-chain based on what
    /// was prepared.
    pub async fn send_payment(
        &self,
        prepare_response: PrepareSendPaymentResponse,
        idempotency_key: Option<String>,
    ) -> Result<SendPaymentResponse, WalletError> {
        self.sdk
            .send_payment(SendPaymentRequest {
                prepare_response,
                options: None,
                idempotency_key,
            })
            .await
            .map_err(|e| WalletError::PaymentFailed(e.to_string()))
    }

    /// Prepare and send in one step.
    pub async fn send_payment_simple(
        &self,
        payment_request: &str,
        amount_sats: Option<u64>,
    ) -> Result<SendPaymentResponse, WalletError> {
        let prepare_response = self.prepare_send_payment(payment_request, amount_sats).await?;
        self.send_payment(prepare_response, None).await
    }

    /// Payment history, newest first.
    pub async fn list_payments(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Payment>, WalletError> {
        let request = ListPaymentsRequest {
            limit,
            offset,
            sort_ascending: Some(false),
            ..Default::default()
        };

        let response = self
            .sdk
            .list_payments(request)
            .await
            .map_err(|e| WalletError::Wallet(format!("Failed to list payments: {e}")))?;
        Ok(response.payments)
    }

    /// Look up a single payment by id.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment, WalletError> {
        let response = self
            .sdk
            .get_payment(GetPaymentRequest {
                payment_id: payment_id.to_string(),
            })
            .await
            .map_err(|e| WalletError::PaymentLookupFailed(e.to_string()))?;
        Ok(response.payment)
    }
}

fn build_bolt11_request(
    amount_sats: Option<u64>,
    description: String,
    expiry_secs: Option<u32>,
) -> ReceivePaymentRequest {
    ReceivePaymentRequest {
        payment_method: ReceivePaymentMethod::Bolt11Invoice {
            description,
            amount_sats,
            expiry_secs,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_bolt11_request_with_amount() {
        let request = build_bolt11_request(Some(4_200), "Coffee".to_string(), Some(3_600));
        match request.payment_method {
            ReceivePaymentMethod::Bolt11Invoice {
                description,
                amount_sats,
                expiry_secs,
            } => {
                assert_eq!(description, "Coffee");
                assert_eq!(amount_sats, Some(4_200));
                assert_eq!(expiry_secs, Some(3_600));
            }
            _ => panic!("expected Bolt11Invoice request"),
        }
    }

    #[test]
    fn test_build_bolt11_request_zero_amount() {
        let request = build_bolt11_request(None, String::new(), None);
        match request.payment_method {
            ReceivePaymentMethod::Bolt11Invoice {
                description,
                amount_sats,
                expiry_secs,
            } => {
                assert!(description.is_empty());
                assert!(amount_sats.is_none());
                assert!(expiry_secs.is_none());
            }
            _ => panic!("expected Bolt11Invoice request"),
        }
    }
}
