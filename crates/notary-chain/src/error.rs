//! Errores de la frontera con la cadena.
//!
//! `ConfigError` y `RpcError` conservan el detalle; el cliente los traduce al
//! conjunto cerrado `NotarizationError` que ve el engine.
use notary_core::NotarizationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),
    #[error("{field} looks like a placeholder ({value}); set the deployed value")]
    Placeholder { field: &'static str, value: String },
    #[error("malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("sender address {configured} does not match the signing key ({derived})")]
    SenderMismatch { configured: String, derived: String },
    #[error("chain id mismatch: configured {configured}, node reports {reported}")]
    ChainIdMismatch { configured: u64, reported: u64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed rpc response: {0}")]
    Malformed(String),
    #[error("rpc error {code}: {message}")]
    Remote { code: i64, message: String },
}

impl From<ConfigError> for NotarizationError {
    fn from(e: ConfigError) -> Self {
        NotarizationError::ConfigurationError(e.to_string())
    }
}

impl RpcError {
    /// Traducción para llamadas de lectura (chainId, nonce, receipts): un
    /// error remoto ahí no es un rechazo de la transacción.
    pub fn into_connection_failure(self) -> NotarizationError {
        NotarizationError::ConnectionFailure(self.to_string())
    }

    /// Traducción para `eth_sendRawTransaction`: el nodo rechazó la
    /// transacción (fondos, nonce, gas price...).
    pub fn into_submission_error(self) -> NotarizationError {
        match self {
            RpcError::Remote { message, .. } => NotarizationError::SubmissionRejected(message),
            other => NotarizationError::ConnectionFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_on_submission_are_rejections() {
        let e = RpcError::Remote { code: -32000,
                                   message: "insufficient funds for gas * price + value".into() };
        assert_eq!(e.into_submission_error(),
                   NotarizationError::SubmissionRejected("insufficient funds for gas * price + value".into()));
        let e = RpcError::Transport("connection refused".into());
        assert!(matches!(e.into_submission_error(), NotarizationError::ConnectionFailure(_)));
    }

    #[test]
    fn config_errors_become_configuration_errors() {
        let e: NotarizationError = ConfigError::Missing("PRIVATE_KEY").into();
        assert_eq!(e, NotarizationError::ConfigurationError("missing configuration value: PRIVATE_KEY".into()));
    }
}
