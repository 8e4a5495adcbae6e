//! Transacciones legacy con protección de replay EIP-155.
//!
//! El ensamblado, la codificación RLP y el hash los hace `alloy-consensus`;
//! aquí sólo se firma el hash de firma y se serializa el sobre.

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// Transacción firmada lista para `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: B256,
}

impl SignedTransaction {
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash.as_slice()))
    }
}

/// Llamada sin valor a `to` con `gas_price` en wei.
pub fn legacy_call(chain_id: u64, nonce: u64, gas_price: u128, gas_limit: u64, to: Address, input: Vec<u8>) -> TxLegacy {
    TxLegacy { chain_id: Some(chain_id),
               nonce,
               gas_price,
               gas_limit,
               to: TxKind::Call(to),
               value: U256::ZERO,
               input: Bytes::from(input) }
}

/// Firma el hash EIP-155 (`v = recid + chainId * 2 + 35`) y serializa.
pub fn sign_legacy(tx: TxLegacy, signer: &PrivateKeySigner) -> Result<SignedTransaction, String> {
    let signature = signer.sign_hash_sync(&tx.signature_hash()).map_err(|e| e.to_string())?;
    let envelope = TxEnvelope::from(tx.into_signed(signature));
    Ok(SignedTransaction { raw: envelope.encoded_2718(),
                           hash: *envelope.tx_hash() })
}
