//! Propiedades observables del orquestador con capacidades sustitutas.

use notary_core::engine::builder;
use notary_core::{fingerprint, AnomalyClassifier, ClassifierUnavailable, Fingerprint, NotarizationClient,
                  NotarizationError, NotarizationFailureKind, NotarizationReceipt, NotaryEngine, Record, RunStatus,
                  Verdict};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct FixedClassifier(Verdict);

impl AnomalyClassifier for FixedClassifier {
    fn name(&self) -> &str { "fixed" }
    fn classify(&self, _record: &Record) -> Result<Verdict, ClassifierUnavailable> { Ok(self.0.clone()) }
}

/// Marca inválido cualquier texto que contenga "ERROR".
struct ErrorMarkerClassifier;

impl AnomalyClassifier for ErrorMarkerClassifier {
    fn name(&self) -> &str { "error-marker" }
    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        match record {
            Record::Text(s) if s.contains("ERROR") => Ok(Verdict::anomalous(1.0, "log contains ERROR")),
            _ => Ok(Verdict::valid(0.0)),
        }
    }
}

/// Registra si fue invocado; responde según `fail`.
#[derive(Default)]
struct SpyNotary {
    invocations: AtomicUsize,
    fail: Option<NotarizationError>,
}

impl NotarizationClient for SpyNotary {
    fn notarize(&self, fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(NotarizationReceipt::new(fp.clone(), "0xabc123", Some(42))),
        }
    }
}

#[test]
fn invalid_verdict_never_invokes_the_client() {
    let spy = Arc::new(SpyNotary::default());
    let mut engine = NotaryEngine::new(FixedClassifier(Verdict::anomalous(0.9, "reconstruction error too high")),
                                       spy.clone());
    for record in [Record::Numeric(vec![1.0, 2.0]), Record::Image(vec![1, 2, 3]), Record::Text("x".into())] {
        let outcome = engine.run(&record).unwrap();
        assert!(!outcome.notarized());
        assert_eq!(outcome.status, RunStatus::Rejected);
    }
    assert_eq!(spy.invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn valid_verdict_with_successful_client_returns_true_and_matching_receipt() {
    let record = Record::Numeric(vec![12.0, 0.5, 99.25]);
    let mut engine = builder().classifier(FixedClassifier(Verdict::valid(0.1)))
                              .notary(SpyNotary::default())
                              .build();
    let outcome = engine.run(&record).unwrap();
    assert!(outcome.notarized());
    let receipt = outcome.receipt.expect("receipt");
    assert_eq!(receipt.fingerprint, fingerprint(&record).unwrap());
    assert_eq!(receipt.block_number, Some(42));
}

#[test]
fn submission_rejected_turns_into_false_outcome() {
    let spy = SpyNotary { fail: Some(NotarizationError::SubmissionRejected("insufficient funds for gas".into())),
                          ..Default::default() };
    let mut engine = NotaryEngine::new(FixedClassifier(Verdict::valid(0.1)), spy);
    let outcome = engine.run(&Record::Text("STATUS=OK".into())).expect("failure must not propagate");
    assert!(!outcome.notarized());
    assert_eq!(outcome.failure_kind(), Some(NotarizationFailureKind::SubmissionRejected));
    assert!(outcome.diagnostic.unwrap().contains("insufficient funds"));
}

#[test]
fn end_to_end_numeric_reference_record() {
    let record = Record::Numeric(vec![70.5, 3000.0, 0.02]);
    let mut engine = NotaryEngine::new(FixedClassifier(Verdict::valid(0.1)), SpyNotary::default());
    let outcome = engine.run(&record).unwrap();

    let expected = hex::encode(Sha256::digest("70.5,3000.0,0.02".as_bytes()));
    assert!(outcome.notarized());
    assert_eq!(outcome.fingerprint.as_ref().map(|f| f.as_str()), Some(expected.as_str()));
    assert_eq!(outcome.verdict.score, 0.1);
}

#[test]
fn end_to_end_error_log_is_rejected() {
    let spy = Arc::new(SpyNotary::default());
    let mut engine = NotaryEngine::new(ErrorMarkerClassifier, spy.clone());
    let outcome = engine.run(&Record::Text("CNC_Machine_01: RPM=0, TEMP=140C, STATUS=ERROR".into())).unwrap();
    assert!(!outcome.notarized());
    assert_eq!(spy.invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn outcome_serializes_for_machine_consumers() {
    let mut engine = NotaryEngine::new(FixedClassifier(Verdict::valid(0.2)), SpyNotary::default());
    let outcome = engine.run(&Record::Text("ok".into())).unwrap();
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v["status"], "confirmed");
    assert_eq!(v["record_kind"], "text");
    assert_eq!(v["receipt"]["transaction_id"], "0xabc123");
}

/// Anota los fingerprints en el orden en que llegan.
#[derive(Default)]
struct OrderedNotary {
    seen: Mutex<Vec<Fingerprint>>,
}

impl NotarizationClient for OrderedNotary {
    fn notarize(&self, fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
        let mut seen = self.seen.lock().unwrap();
        seen.push(fp.clone());
        Ok(NotarizationReceipt::new(fp.clone(), format!("0x{:02x}", seen.len()), Some(seen.len() as u64)))
    }
}

#[test]
fn batch_notarizes_sequentially_in_input_order() {
    let records: Vec<Record> = ["line-1", "line-2 ERROR", "", "line-4", "line-5"].iter()
                                                                                  .map(|s| Record::Text(s.to_string()))
                                                                                  .collect();
    let notary = Arc::new(OrderedNotary::default());
    let mut engine = NotaryEngine::new(ErrorMarkerClassifier, notary.clone());
    let results = engine.run_batch(&records);

    assert_eq!(results.len(), 5);
    assert_eq!(results[1].as_ref().unwrap().status, RunStatus::Rejected);
    assert!(results[2].is_err());
    let expected: Vec<Fingerprint> = [0, 3, 4].iter().map(|&i| fingerprint(&records[i]).unwrap()).collect();
    assert_eq!(*notary.seen.lock().unwrap(), expected);
    assert_eq!(results[4].as_ref().unwrap().receipt.as_ref().unwrap().block_number, Some(3));

    // Cada ejecución conserva su secuencia y el diario respeta el orden de entrada.
    let run_ids: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).map(|o| o.run_id).collect();
    assert_eq!(engine.run_ids(), run_ids);
    assert_eq!(engine.event_variants(run_ids[0]), vec!["I", "K", "F", "N", "C"]);
    assert_eq!(engine.event_variants(run_ids[1]), vec!["I", "K", "R", "C"]);
}
