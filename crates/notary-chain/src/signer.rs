//! Direcciones y clave de firma.
//!
//! La clave se carga en un `PrivateKeySigner`; los errores de carga nunca
//! repiten el material secreto.

use alloy_primitives::{Address, B256};
use alloy_signer_local::PrivateKeySigner;

/// `0x` + 40 dígitos hex en minúsculas, la forma que usan los params JSON-RPC.
pub fn address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Acepta `0x` + 40 dígitos hex, en cualquier capitalización (sin checksum).
pub fn parse_address(raw: &str) -> Result<Address, String> {
    let raw = raw.trim();
    let body = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).ok_or("missing 0x prefix")?;
    if body.len() != 40 {
        return Err(format!("expected 40 hex digits, got {}", body.len()));
    }
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(body, &mut bytes).map_err(|e| e.to_string())?;
    Ok(Address::from(bytes))
}

/// `0x` opcional + 64 dígitos hex.
pub fn signer_from_hex(secret: &str) -> Result<PrivateKeySigner, String> {
    let body = secret.trim();
    let body = body.strip_prefix("0x").unwrap_or(body);
    if body.len() != 64 {
        return Err(format!("expected 64 hex digits, got {}", body.len()));
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(body, &mut bytes).map_err(|_| "not valid hex".to_string())?;
    PrivateKeySigner::from_bytes(&B256::from(bytes)).map_err(|_| "not a valid secp256k1 scalar".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn derives_known_address() {
        let s = signer_from_hex(KEY).unwrap();
        assert_eq!(address_hex(&s.address()), "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
    }

    #[test]
    fn parse_address_accepts_mixed_case() {
        let a = parse_address("0x2C7536E3605D9C16a7a3D7b1898e529396a65c23").unwrap();
        assert_eq!(address_hex(&a), "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23");
        assert!(parse_address("2c7536e3605d9c16a7a3d7b1898e529396a65c23").is_err());
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0xzz7536e3605d9c16a7a3d7b1898e529396a65c23").is_err());
    }

    #[test]
    fn rejects_bad_keys_without_echoing_them() {
        assert!(signer_from_hex("0x1234").is_err());
        assert!(signer_from_hex(&"0".repeat(64)).is_err());
        let err = signer_from_hex(&"g".repeat(64)).unwrap_err();
        assert!(!err.contains("ggg"));
    }
}
