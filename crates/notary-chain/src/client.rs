//! `EvmNotarizationClient`: ancla un fingerprint llamando a
//! `notarizeData(string)` y espera la confirmación.
//!
//! Flujo de `notarize`:
//! 1. `ChainConfig::validate()` (sin red).
//! 2. nonce `pending` del emisor.
//! 3. transacción legacy EIP-155 firmada localmente.
//! 4. `eth_sendRawTransaction`.
//! 5. polling de `eth_getTransactionReceipt` hasta `confirmation_timeout`.
//!
//! El cliente nunca reintenta; eso queda para la capa de retry del core.

use log::{debug, info, warn};
use notary_core::{Fingerprint, NotarizationClient, NotarizationError, NotarizationReceipt};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use alloy_consensus::TxLegacy;

use crate::abi::notarize_call;
use crate::config::{ChainConfig, Credentials};
use crate::error::ConfigError;
use crate::rpc::{parse_quantity, JsonRpcClient, RpcTransport, UreqTransport};
use crate::signer::address_hex;
use crate::tx::{legacy_call, sign_legacy};

pub struct EvmNotarizationClient<T: RpcTransport> {
    config: ChainConfig,
    rpc: JsonRpcClient<T>,
}

impl EvmNotarizationClient<UreqTransport> {
    /// Cliente HTTP real con el timeout de `config.http_timeout`.
    pub fn from_config(config: ChainConfig) -> Self {
        let transport = UreqTransport::new(config.http_timeout);
        Self::with_transport(config, transport)
    }
}

/// Estado de una transacción enviada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    Pending,
    Included { block_number: Option<u64> },
    Reverted { block_number: Option<u64> },
}

impl<T: RpcTransport> EvmNotarizationClient<T> {
    pub fn with_transport(config: ChainConfig, transport: T) -> Self {
        let rpc = JsonRpcClient::new(config.rpc_url.clone(), transport);
        Self { config, rpc }
    }

    pub fn config(&self) -> &ChainConfig { &self.config }

    pub fn rpc(&self) -> &JsonRpcClient<T> { &self.rpc }

    /// Consulta `eth_chainId` y lo compara con el configurado.
    pub fn check_connection(&self) -> Result<u64, NotarizationError> {
        let reported = self.rpc
                           .call("eth_chainId", json!([]))
                           .and_then(|v| parse_quantity(&v))
                           .map_err(|e| e.into_connection_failure())?;
        if reported != self.config.chain_id {
            return Err(ConfigError::ChainIdMismatch { configured: self.config.chain_id,
                                                      reported }.into());
        }
        debug!("chain: connected to {} (chain id {reported})", self.rpc.url());
        Ok(reported)
    }

    fn pending_nonce(&self, creds: &Credentials) -> Result<u64, NotarizationError> {
        self.rpc
            .call("eth_getTransactionCount", json!([address_hex(&creds.sender()), "pending"]))
            .and_then(|v| parse_quantity(&v))
            .map_err(|e| e.into_connection_failure())
    }

    fn submit(&self, raw_hex: String) -> Result<String, NotarizationError> {
        let result = self.rpc
                         .call("eth_sendRawTransaction", json!([raw_hex]))
                         .map_err(|e| e.into_submission_error())?;
        result.as_str()
              .map(str::to_string)
              .ok_or_else(|| NotarizationError::ConnectionFailure(format!("unexpected transaction hash: {result}")))
    }

    /// Una consulta de receipt. `null` significa que aún no se incluyó.
    pub fn receipt_status(&self, transaction_id: &str) -> Result<ReceiptStatus, NotarizationError> {
        let receipt = self.rpc
                          .call("eth_getTransactionReceipt", json!([transaction_id]))
                          .map_err(|e| e.into_connection_failure())?;
        if receipt.is_null() {
            return Ok(ReceiptStatus::Pending);
        }
        let block_number = receipt.get("blockNumber")
                                  .filter(|v| !v.is_null())
                                  .map(parse_quantity)
                                  .transpose()
                                  .map_err(|e| e.into_connection_failure())?;
        match receipt.get("status").and_then(Value::as_str) {
            Some("0x0") => Ok(ReceiptStatus::Reverted { block_number }),
            _ => Ok(ReceiptStatus::Included { block_number }),
        }
    }

    fn wait_for_receipt(&self, transaction_id: &str) -> Result<Option<u64>, NotarizationError> {
        let started = Instant::now();
        let deadline = started + self.config.confirmation_timeout;
        loop {
            match self.receipt_status(transaction_id)? {
                ReceiptStatus::Included { block_number } => return Ok(block_number),
                ReceiptStatus::Reverted { .. } => {
                    return Err(NotarizationError::SubmissionRejected(format!("transaction {transaction_id} reverted")))
                }
                ReceiptStatus::Pending => {}
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(NotarizationError::ConfirmationTimeout { transaction_id: transaction_id.to_string(),
                                                                    waited_secs: started.elapsed().as_secs() });
            }
            std::thread::sleep(self.config.poll_interval.min(deadline - now).max(Duration::from_millis(1)));
        }
    }

    /// Transacción sin firmar que anclaría `fp` con el nonce dado.
    pub fn build_transaction(&self, creds: &Credentials, fp: &Fingerprint, nonce: u64) -> TxLegacy {
        legacy_call(self.config.chain_id,
                    nonce,
                    self.config.gas_price_wei(),
                    self.config.gas_limit,
                    creds.contract,
                    notarize_call(fp.as_str()))
    }
}

impl<T: RpcTransport> NotarizationClient for EvmNotarizationClient<T> {
    fn notarize(&self, fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
        let creds = self.config.validate()?;
        let nonce = self.pending_nonce(&creds)?;
        let tx = self.build_transaction(&creds, fp, nonce);
        let signed = sign_legacy(tx, &creds.signer)
                       .map_err(|reason| NotarizationError::ConfigurationError(format!("signing failed: {reason}")))?;

        let transaction_id = self.submit(signed.raw_hex())?;
        if !transaction_id.eq_ignore_ascii_case(&signed.hash_hex()) {
            warn!("chain: node reported hash {transaction_id}, local hash {}", signed.hash_hex());
        }
        info!("chain: transaction sent {transaction_id} (nonce {nonce})");

        let block_number = self.wait_for_receipt(&transaction_id)?;
        let explorer_url = self.config.explorer_url(&transaction_id);
        Ok(NotarizationReceipt::new(fp.clone(), transaction_id, block_number).with_explorer_url(explorer_url))
    }
}
