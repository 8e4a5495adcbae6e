use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RunStatus;
use crate::errors::NotarizationFailureKind;
use crate::hashing::Fingerprint;
use crate::model::{NotarizationReceipt, RecordKind, Verdict};

/// Fallo de notarización capturado por el orquestador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarizationFailure {
    pub kind: NotarizationFailureKind,
    pub message: String,
}

/// Resultado estructurado de una ejecución.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub record_kind: RecordKind,
    /// Siempre terminal: `Rejected`, `Confirmed` o `Failed`.
    pub status: RunStatus,
    pub verdict: Verdict,
    /// `None` cuando el record fue rechazado.
    pub fingerprint: Option<Fingerprint>,
    pub receipt: Option<NotarizationReceipt>,
    pub failure: Option<NotarizationFailure>,
    /// Mensaje legible para el operador (rechazo o fallo).
    pub diagnostic: Option<String>,
    /// Digest BLAKE3 de los hechos deterministas de la ejecución.
    pub run_fingerprint: String,
}

impl RunOutcome {
    /// Resultado booleano: `true` sólo si hay receipt.
    pub fn notarized(&self) -> bool {
        self.status == RunStatus::Confirmed && self.receipt.is_some()
    }

    pub fn is_rejected(&self) -> bool { self.status == RunStatus::Rejected }

    pub fn failure_kind(&self) -> Option<NotarizationFailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }
}
