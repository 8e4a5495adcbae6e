//! Tipos de evento de una ejecución y estructura `RunEvent`.
//!
//! Rol en el pipeline:
//! - Cada `NotaryEngine::run` emite eventos a un `EventStore` append-only.
//! - Los eventos son la traza auditable de la ejecución; el `RunOutcome` se
//!   deriva de los mismos hechos.
//! - `RunEventKind` es el contrato observable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::RunStatus;
use crate::errors::NotarizationFailureKind;
use crate::model::RecordKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de un `run_id`.
    RunStarted { record_kind: RecordKind, classifier: String },
    /// El clasificador emitió veredicto.
    Classified { is_valid: bool, score: f64, reason: Option<String> },
    /// Veredicto negativo: la ejecución termina sin notarizar.
    Rejected,
    /// Fingerprint calculado (sólo para records válidos).
    Fingerprinted { fingerprint: String },
    /// La transacción quedó incluida.
    NotarizationConfirmed { transaction_id: String, block_number: Option<u64> },
    /// El cliente de notarización falló; el mensaje es diagnóstico.
    NotarizationFailed { kind: NotarizationFailureKind, message: String },
    /// Cierre con el digest agregado de la ejecución.
    RunCompleted { status: RunStatus, run_fingerprint: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en ningún digest)
}

impl RunEventKind {
    /// Letra compacta para comparar secuencias en tests.
    pub fn variant_code(&self) -> &'static str {
        match self {
            RunEventKind::RunStarted { .. } => "I",
            RunEventKind::Classified { .. } => "K",
            RunEventKind::Rejected => "R",
            RunEventKind::Fingerprinted { .. } => "F",
            RunEventKind::NotarizationConfirmed { .. } => "N",
            RunEventKind::NotarizationFailed { .. } => "X",
            RunEventKind::RunCompleted { .. } => "C",
        }
    }
}
