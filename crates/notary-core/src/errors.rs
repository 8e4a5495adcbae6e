//! Taxonomía de errores del core.
//!
//! - `EncodingError`: el record no se puede canonicalizar (local, no
//!   reintentable).
//! - `ClassifierUnavailable`: fallo de infraestructura del clasificador. Nunca
//!   se confunde con un veredicto negativo.
//! - `NotarizationError`: conjunto cerrado de fallos en la frontera con la
//!   cadena. El orquestador los convierte en `RunOutcome` fallido.
//! - `PipelineError`: lo que `NotaryEngine::run` propaga al caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EncodingError {
    #[error("numeric record has no readings")] EmptyNumeric,
    #[error("non-finite reading at position {index}")] NonFinite { index: usize },
    #[error("image payload is empty")] EmptyImage,
    #[error("text record is empty")] EmptyText,
}

/// El clasificador no pudo emitir un veredicto (modelo ausente, shape
/// incompatible, tipo de record sin clasificador).
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[error("classifier unavailable: {reason}")]
pub struct ClassifierUnavailable {
    pub reason: String,
}

impl ClassifierUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Fallos de la frontera de notarización.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum NotarizationError {
    #[error("connection failure: {0}")] ConnectionFailure(String),
    #[error("configuration error: {0}")] ConfigurationError(String),
    #[error("submission rejected: {0}")] SubmissionRejected(String),
    #[error("transaction {transaction_id} not confirmed after {waited_secs}s")]
    ConfirmationTimeout { transaction_id: String, waited_secs: u64 },
}

/// Etiqueta serializable del tipo de fallo (sin el payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotarizationFailureKind {
    ConnectionFailure,
    ConfigurationError,
    SubmissionRejected,
    ConfirmationTimeout,
}

impl NotarizationFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionFailure => "connection_failure",
            Self::ConfigurationError => "configuration_error",
            Self::SubmissionRejected => "submission_rejected",
            Self::ConfirmationTimeout => "confirmation_timeout",
        }
    }
}

impl NotarizationError {
    pub fn kind(&self) -> NotarizationFailureKind {
        match self {
            Self::ConnectionFailure(_) => NotarizationFailureKind::ConnectionFailure,
            Self::ConfigurationError(_) => NotarizationFailureKind::ConfigurationError,
            Self::SubmissionRejected(_) => NotarizationFailureKind::SubmissionRejected,
            Self::ConfirmationTimeout { .. } => NotarizationFailureKind::ConfirmationTimeout,
        }
    }

    /// Sólo los fallos transitorios tienen sentido para la capa de retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(),
                 NotarizationFailureKind::ConnectionFailure | NotarizationFailureKind::ConfirmationTimeout)
    }
}

/// Errores que el orquestador NO captura: indican input malformado o
/// infraestructura rota y requieren atención del operador.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PipelineError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    ClassifierUnavailable(#[from] ClassifierUnavailable),
}
