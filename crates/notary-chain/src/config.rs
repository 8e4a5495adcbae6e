//! Configuración de la cadena.
//!
//! Todo lo que el cliente necesita llega por variables de entorno (con
//! `.env` cargado una sola vez). `validate()` corre antes de cualquier
//! llamada de red y rechaza valores de plantilla.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::signer::{address_hex, parse_address as parse_hex_address, signer_from_hex};

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_RPC_URL: &str = "https://sepolia.base.org";
pub const DEFAULT_CHAIN_ID: u64 = 84532;
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 1;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://sepolia.basescan.org/tx/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const GWEI: u128 = 1_000_000_000;

// Direcciones de plantilla que nunca corresponden a un despliegue real.
const TEMPLATE_ADDRESSES: &[&str] = &["0xcafebabe45678901234567890123456789012345",
                                      "0xdea0babe12345678901234567890123456789012"];

/// Clave de firma. Nunca aparece en `Debug` ni en logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(secret: impl Into<String>) -> Self { PrivateKey(secret.into()) }

    pub fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub contract_address: String,
    /// Si se configura, debe coincidir con la dirección derivada de la clave.
    pub sender_address: Option<String>,
    pub private_key: Option<PrivateKey>,
    pub chain_id: u64,
    pub gas_limit: u64,
    pub gas_price_gwei: u64,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
    pub explorer_tx_url: String,
    pub http_timeout: Duration,
    /// Variables numéricas ilegibles encontradas por `from_env`; `validate()`
    /// devuelve la primera.
    pub env_errors: Vec<ConfigError>,
}

/// Resultado de `validate()`: todo lo necesario para firmar y enviar.
#[derive(Clone)]
pub struct Credentials {
    pub signer: PrivateKeySigner,
    pub contract: Address,
}

impl Credentials {
    pub fn sender(&self) -> Address { self.signer.address() }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
         .field("sender", &address_hex(&self.sender()))
         .field("contract", &address_hex(&self.contract))
         .finish()
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { rpc_url: DEFAULT_RPC_URL.to_string(),
               contract_address: String::new(),
               sender_address: None,
               private_key: None,
               chain_id: DEFAULT_CHAIN_ID,
               gas_limit: DEFAULT_GAS_LIMIT,
               gas_price_gwei: DEFAULT_GAS_PRICE_GWEI,
               confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
               poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
               explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
               http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
               env_errors: Vec::new() }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Valor numérico de `key`; si está presente pero no se puede leer, usa el
/// default y anota el error para `validate()`.
fn env_u64(key: &'static str, default: u64, errors: &mut Vec<ConfigError>) -> u64 {
    let Some(raw) = env_string(key) else {
        return default;
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            warn!("config: {key}={raw:?} is not a valid integer ({e}); refusing to notarize");
            errors.push(ConfigError::Malformed { field: key,
                                                 reason: format!("{raw:?} is not a valid integer") });
            default
        }
    }
}

impl ChainConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let mut errors = Vec::new();
        let chain_id = env_u64("NOTARY_CHAIN_ID", DEFAULT_CHAIN_ID, &mut errors);
        let gas_limit = env_u64("NOTARY_GAS_LIMIT", DEFAULT_GAS_LIMIT, &mut errors);
        let gas_price_gwei = env_u64("NOTARY_GAS_PRICE_GWEI", DEFAULT_GAS_PRICE_GWEI, &mut errors);
        let confirmation_timeout =
            env_u64("NOTARY_CONFIRMATION_TIMEOUT_SECS", DEFAULT_CONFIRMATION_TIMEOUT_SECS, &mut errors);
        let poll_interval = env_u64("NOTARY_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS, &mut errors);
        let http_timeout = env_u64("NOTARY_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS, &mut errors);
        Self { rpc_url: env_string("NOTARY_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
               contract_address: env_string("NOTARY_CONTRACT_ADDRESS").unwrap_or_default(),
               sender_address: env_string("NOTARY_SENDER_ADDRESS"),
               private_key: env_string("PRIVATE_KEY").map(PrivateKey::new),
               chain_id,
               gas_limit,
               gas_price_gwei,
               confirmation_timeout: Duration::from_secs(confirmation_timeout),
               poll_interval: Duration::from_millis(poll_interval),
               explorer_tx_url: env_string("NOTARY_EXPLORER_TX_URL").unwrap_or_else(|| DEFAULT_EXPLORER_TX_URL.to_string()),
               http_timeout: Duration::from_secs(http_timeout),
               env_errors: errors }
    }

    pub fn gas_price_wei(&self) -> u128 {
        self.gas_price_gwei as u128 * GWEI
    }

    pub fn explorer_url(&self, transaction_id: &str) -> String {
        format!("{}{}", self.explorer_tx_url, transaction_id)
    }

    /// Comprueba dirección del contrato, clave y emisor. No toca la red.
    pub fn validate(&self) -> Result<Credentials, ConfigError> {
        if let Some(e) = self.env_errors.first() {
            return Err(e.clone());
        }
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::Missing("NOTARY_RPC_URL"));
        }
        let contract = parse_address("NOTARY_CONTRACT_ADDRESS", &self.contract_address)?;

        let secret = self.private_key.as_ref().map(PrivateKey::expose).filter(|s| !s.trim().is_empty())
                                     .ok_or(ConfigError::Missing("PRIVATE_KEY"))?;
        if is_placeholder_text(secret) {
            return Err(ConfigError::Placeholder { field: "PRIVATE_KEY",
                                                  value: "<redacted>".into() });
        }
        let signer = signer_from_hex(secret).map_err(|reason| ConfigError::Malformed { field: "PRIVATE_KEY",
                                                                                          reason })?;

        if let Some(configured) = &self.sender_address {
            let sender = parse_address("NOTARY_SENDER_ADDRESS", configured)?;
            if sender != signer.address() {
                return Err(ConfigError::SenderMismatch { configured: address_hex(&sender),
                                                         derived: address_hex(&signer.address()) });
            }
        }
        if self.chain_id == 0 {
            return Err(ConfigError::Malformed { field: "NOTARY_CHAIN_ID",
                                                reason: "must be positive".into() });
        }
        if self.gas_limit == 0 {
            return Err(ConfigError::Malformed { field: "NOTARY_GAS_LIMIT",
                                                reason: "must be positive".into() });
        }
        Ok(Credentials { signer, contract })
    }
}

fn is_placeholder_text(value: &str) -> bool {
    value.to_ascii_uppercase().contains("YOUR")
}

fn parse_address(field: &'static str, raw: &str) -> Result<Address, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    if is_placeholder_text(raw) || TEMPLATE_ADDRESSES.contains(&raw.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Placeholder { field,
                                              value: raw.to_string() });
    }
    let address = parse_hex_address(raw).map_err(|reason| ConfigError::Malformed { field, reason })?;
    if address.is_zero() {
        return Err(ConfigError::Placeholder { field,
                                              value: raw.to_string() });
    }
    Ok(address)
}
