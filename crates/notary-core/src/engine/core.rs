//! Core NotaryEngine implementation

use log::{debug, info, warn};
use rayon::prelude::*;
use serde_json::json;
use uuid::Uuid;

use super::outcome::{NotarizationFailure, RunOutcome};
use super::RunStatus;
use crate::capability::{AnomalyClassifier, NotarizationClient};
use crate::errors::{NotarizationError, PipelineError};
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::hashing::{fingerprint, hash_value, Fingerprint};
use crate::model::{NotarizationReceipt, Record, RecordKind, Verdict};

/// Orquestador verify-then-notarize.
///
/// Ejecuta, por record y en este orden: clasificación → fingerprint →
/// notarización condicional. Los fallos del cliente de notarización se
/// capturan y se reportan en el `RunOutcome`; los del clasificador y del
/// fingerprinter se propagan.
#[derive(Debug)]
pub struct NotaryEngine<C, N, E = InMemoryEventStore> {
    classifier: C,
    notary: N,
    event_store: E,
}

/// Resultado de las etapas puras (clasificación + fingerprint). Se calcula
/// antes de tocar el store para poder paralelizarlo en `run_batch`.
struct Assessment {
    record_kind: RecordKind,
    verdict: Verdict,
    fingerprint: Option<Fingerprint>,
}

/// Estado en curso de una ejecución; valida cada transición.
struct RunTracker {
    run_id: Uuid,
    status: RunStatus,
}

impl RunTracker {
    fn new(run_id: Uuid) -> Self {
        Self { run_id,
               status: RunStatus::Idle }
    }

    fn advance(&mut self, next: RunStatus) {
        debug_assert!(self.status.can_transition_to(next),
                      "invalid run transition {:?} -> {:?}",
                      self.status,
                      next);
        debug!("run {}: {} -> {}", self.run_id, self.status.as_str(), next.as_str());
        self.status = next;
    }
}

fn assess<C: AnomalyClassifier + ?Sized>(classifier: &C, record: &Record) -> Result<Assessment, PipelineError> {
    let verdict = classifier.classify(record)?;
    // El fingerprint sólo se calcula para records ya juzgados válidos.
    let fingerprint = if verdict.is_valid { Some(fingerprint(record)?) } else { None };
    Ok(Assessment { record_kind: record.kind(),
                    verdict,
                    fingerprint })
}

impl<C, N> NotaryEngine<C, N, InMemoryEventStore>
    where C: AnomalyClassifier,
          N: NotarizationClient
{
    /// Engine con store de eventos en memoria.
    pub fn new(classifier: C, notary: N) -> Self {
        Self::new_with_store(classifier, notary, InMemoryEventStore::default())
    }
}

impl<C, N, E> NotaryEngine<C, N, E>
    where C: AnomalyClassifier,
          N: NotarizationClient,
          E: EventStore
{
    pub fn new_with_store(classifier: C, notary: N, event_store: E) -> Self {
        Self { classifier,
               notary,
               event_store }
    }

    pub fn classifier(&self) -> &C { &self.classifier }

    pub fn notary(&self) -> &N { &self.notary }

    pub fn event_store(&self) -> &E { &self.event_store }

    /// Ejecuta el pipeline completo para un record.
    pub fn run(&mut self, record: &Record) -> Result<RunOutcome, PipelineError> {
        let assessment = assess(&self.classifier, record)?;
        Ok(self.settle(assessment))
    }

    /// Procesa varios records. Clasificación y fingerprint corren en el pool
    /// de rayon; la notarización es secuencial y en orden de entrada (un
    /// único emisor implica una única secuencia de nonces).
    pub fn run_batch(&mut self, records: &[Record]) -> Vec<Result<RunOutcome, PipelineError>> {
        let classifier = &self.classifier;
        let assessments: Vec<Result<Assessment, PipelineError>> =
            records.par_iter().map(|r| assess(classifier, r)).collect();
        assessments.into_iter().map(|a| a.map(|a| self.settle(a))).collect()
    }

    /// Eventos de una ejecución concreta.
    pub fn events_for(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.event_store.list(run_id)
    }

    /// Ejecuciones registradas, en el orden en que el engine las cerró.
    pub fn run_ids(&self) -> Vec<Uuid> {
        self.event_store.run_ids()
    }

    /// Variante compacta de eventos (ver `RunEventKind::variant_code`).
    pub fn event_variants(&self, run_id: Uuid) -> Vec<&'static str> {
        self.events_for(run_id).iter().map(|e| e.kind.variant_code()).collect()
    }

    fn settle(&mut self, assessment: Assessment) -> RunOutcome {
        let Assessment { record_kind,
                         verdict,
                         fingerprint } = assessment;
        let mut tracker = RunTracker::new(Uuid::new_v4());
        let run_id = tracker.run_id;

        self.event_store.append_kind(run_id,
                                     RunEventKind::RunStarted { record_kind,
                                                                classifier: self.classifier.name().to_string() });
        tracker.advance(RunStatus::Classifying);
        self.event_store.append_kind(run_id,
                                     RunEventKind::Classified { is_valid: verdict.is_valid,
                                                                score: verdict.score,
                                                                reason: verdict.reason.clone() });

        let fp = match fingerprint {
            Some(fp) if verdict.is_valid => fp,
            _ => {
                tracker.advance(RunStatus::Rejected);
                self.event_store.append_kind(run_id, RunEventKind::Rejected);
                let diagnostic = verdict.reason.clone().unwrap_or_else(|| "anomaly detected".to_string());
                warn!("run {run_id}: {record_kind} record rejected (score={}): {diagnostic}", verdict.score);
                return self.complete(tracker, record_kind, verdict, None, None, None, Some(diagnostic));
            }
        };

        tracker.advance(RunStatus::Fingerprinting);
        self.event_store.append_kind(run_id,
                                     RunEventKind::Fingerprinted { fingerprint: fp.to_string() });
        info!("run {run_id}: {record_kind} record verified (score={}), fingerprint {fp}", verdict.score);

        tracker.advance(RunStatus::Notarizing);
        match self.notary.notarize(&fp).and_then(|r| check_receipt(&fp, r)) {
            Ok(receipt) => {
                tracker.advance(RunStatus::Confirmed);
                self.event_store.append_kind(run_id,
                                             RunEventKind::NotarizationConfirmed { transaction_id:
                                                                                       receipt.transaction_id.clone(),
                                                                                   block_number: receipt.block_number });
                info!("run {run_id}: notarized in tx {}", receipt.transaction_id);
                self.complete(tracker, record_kind, verdict, Some(fp), Some(receipt), None, None)
            }
            Err(err) => {
                tracker.advance(RunStatus::Failed);
                let failure = NotarizationFailure { kind: err.kind(),
                                                    message: err.to_string() };
                self.event_store.append_kind(run_id,
                                             RunEventKind::NotarizationFailed { kind: failure.kind,
                                                                                message: failure.message.clone() });
                warn!("run {run_id}: notarization failed: {err}");
                let diagnostic = Some(failure.message.clone());
                self.complete(tracker, record_kind, verdict, Some(fp), None, Some(failure), diagnostic)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn complete(&mut self,
                tracker: RunTracker,
                record_kind: RecordKind,
                verdict: Verdict,
                fingerprint: Option<Fingerprint>,
                receipt: Option<NotarizationReceipt>,
                failure: Option<NotarizationFailure>,
                diagnostic: Option<String>)
                -> RunOutcome {
        let run_fingerprint = hash_value(&json!({
            "engine_version": crate::constants::ENGINE_VERSION,
            "record_kind": record_kind,
            "verdict": verdict,
            "fingerprint": fingerprint,
            "transaction_id": receipt.as_ref().map(|r| r.transaction_id.clone()),
            "block_number": receipt.as_ref().and_then(|r| r.block_number),
            "failure_kind": failure.as_ref().map(|f| f.kind),
            "status": tracker.status,
        }));
        self.event_store.append_kind(tracker.run_id,
                                     RunEventKind::RunCompleted { status: tracker.status,
                                                                  run_fingerprint: run_fingerprint.clone() });
        RunOutcome { run_id: tracker.run_id,
                     record_kind,
                     status: tracker.status,
                     verdict,
                     fingerprint,
                     receipt,
                     failure,
                     diagnostic,
                     run_fingerprint }
    }
}

/// Un receipt que no ancla nuestro fingerprint no cuenta como notarización.
fn check_receipt(expected: &Fingerprint, receipt: NotarizationReceipt) -> Result<NotarizationReceipt, NotarizationError> {
    if &receipt.fingerprint == expected {
        Ok(receipt)
    } else {
        Err(NotarizationError::SubmissionRejected(format!("receipt anchors {} instead of {}",
                                                          receipt.fingerprint, expected)))
    }
}
