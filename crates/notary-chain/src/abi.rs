//! Interfaz del contrato de notarización.
//!
//! El contrato expone un único método `notarizeData(string)`; el selector y
//! la codificación ABI los genera `sol!`.

use alloy_sol_types::{sol, SolCall};

sol! {
    function notarizeData(string _dataHash);
}

/// Firma canónica del método, `notarizeData(string)`.
pub const NOTARIZE_SIGNATURE: &str = notarizeDataCall::SIGNATURE;

/// Selector de 4 bytes de `notarizeData(string)`.
pub const NOTARIZE_SELECTOR: [u8; 4] = notarizeDataCall::SELECTOR;

/// Call data de `notarizeData(fingerprint)`.
pub fn notarize_call(fingerprint_hex: &str) -> Vec<u8> {
    notarizeDataCall { _dataHash: fingerprint_hex.to_string() }.abi_encode()
}
