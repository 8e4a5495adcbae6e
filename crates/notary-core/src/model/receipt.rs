use serde::{Deserialize, Serialize};

use crate::hashing::Fingerprint;

/// Comprobante de notarización. Sólo existe si el veredicto fue válido y la
/// transacción quedó incluida en un bloque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarizationReceipt {
    pub fingerprint: Fingerprint,
    /// Hash de la transacción (`0x…`).
    pub transaction_id: String,
    pub block_number: Option<u64>,
    /// URL del explorador para la transacción, si el cliente la conoce.
    pub explorer_url: Option<String>,
}

impl NotarizationReceipt {
    pub fn new(fingerprint: Fingerprint, transaction_id: impl Into<String>, block_number: Option<u64>) -> Self {
        Self { fingerprint,
               transaction_id: transaction_id.into(),
               block_number,
               explorer_url: None }
    }

    pub fn with_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = Some(url.into());
        self
    }
}
