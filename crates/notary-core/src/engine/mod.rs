//! Engine module for NotaryEngine implementation
//!
//! Provides the orchestrator, its typestate builder, the run state machine
//! and the structured outcome.

pub mod builder;
pub mod core;
pub mod outcome;
pub mod status;

pub use builder::{builder, EngineBuilder, EngineBuilderInit, EngineBuilderWithClassifier};
pub use self::core::NotaryEngine;
pub use outcome::{NotarizationFailure, RunOutcome};
pub use status::RunStatus;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{AnomalyClassifier, NotarizationClient};
    use crate::errors::{ClassifierUnavailable, EncodingError, NotarizationError, NotarizationFailureKind, PipelineError};
    use crate::hashing::{fingerprint, Fingerprint};
    use crate::model::{NotarizationReceipt, Record, Verdict};
    use std::sync::Mutex;

    // Clasificador que marca inválido todo lo que contenga "ERROR".
    struct MarkerClassifier;

    impl AnomalyClassifier for MarkerClassifier {
        fn name(&self) -> &str { "marker" }
        fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
            match record {
                Record::Text(s) if s.contains("ERROR") => Ok(Verdict::anomalous(1.0, "ERROR marker")),
                Record::Text(_) | Record::Numeric(_) => Ok(Verdict::valid(0.1)),
                Record::Image(_) => Err(ClassifierUnavailable::new("no image model")),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotary {
        calls: Mutex<Vec<Fingerprint>>,
        fail_with: Option<NotarizationError>,
    }

    impl NotarizationClient for RecordingNotary {
        fn notarize(&self, fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(fp.clone());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(NotarizationReceipt::new(fp.clone(), format!("0x{:064x}", calls.len()), Some(7))),
            }
        }
    }

    #[test]
    fn confirmed_run_emits_full_event_sequence() {
        let mut engine = builder().classifier(MarkerClassifier).notary(RecordingNotary::default()).build();
        let record = Record::Numeric(vec![1.5, 2.0]);
        let outcome = engine.run(&record).expect("run ok");

        assert!(outcome.notarized());
        assert_eq!(outcome.status, RunStatus::Confirmed);
        assert_eq!(outcome.receipt.as_ref().unwrap().fingerprint, fingerprint(&record).unwrap());
        assert_eq!(engine.event_variants(outcome.run_id), vec!["I", "K", "F", "N", "C"]);
    }

    #[test]
    fn rejected_run_never_reaches_the_client() {
        let mut engine = NotaryEngine::new(MarkerClassifier, RecordingNotary::default());
        let outcome = engine.run(&Record::Text("spindle ERROR 42".into())).unwrap();

        assert!(!outcome.notarized());
        assert!(outcome.is_rejected());
        assert!(outcome.fingerprint.is_none());
        assert_eq!(outcome.diagnostic.as_deref(), Some("ERROR marker"));
        assert!(engine.notary().calls.lock().unwrap().is_empty());
        assert_eq!(engine.event_variants(outcome.run_id), vec!["I", "K", "R", "C"]);
    }

    #[test]
    fn notarization_failure_is_captured_not_propagated() {
        let notary = RecordingNotary { fail_with: Some(NotarizationError::ConfirmationTimeout { transaction_id: "0xabc".into(),
                                                                                               waited_secs: 3 }),
                                       ..Default::default() };
        let mut engine = NotaryEngine::new(MarkerClassifier, notary);
        let outcome = engine.run(&Record::Text("STATUS=OK".into())).unwrap();

        assert!(!outcome.notarized());
        assert_eq!(outcome.status, RunStatus::Failed);
        assert_eq!(outcome.failure_kind(), Some(NotarizationFailureKind::ConfirmationTimeout));
        assert!(outcome.diagnostic.unwrap().contains("0xabc"));
        assert_eq!(engine.event_variants(outcome.run_id), vec!["I", "K", "F", "X", "C"]);
    }

    #[test]
    fn classifier_and_encoding_errors_propagate() {
        let mut engine = NotaryEngine::new(MarkerClassifier, RecordingNotary::default());
        let err = engine.run(&Record::Image(vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, PipelineError::ClassifierUnavailable(_)));

        let err = engine.run(&Record::Numeric(vec![f64::NAN])).unwrap_err();
        assert_eq!(err, PipelineError::Encoding(EncodingError::NonFinite { index: 0 }));
        assert!(engine.notary().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn mismatched_receipt_counts_as_failure() {
        struct LyingNotary;
        impl NotarizationClient for LyingNotary {
            fn notarize(&self, _fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
                let other = fingerprint(&Record::Text("something else".into())).unwrap();
                Ok(NotarizationReceipt::new(other, "0x01", None))
            }
        }
        let mut engine = NotaryEngine::new(MarkerClassifier, LyingNotary);
        let outcome = engine.run(&Record::Text("OK".into())).unwrap();
        assert_eq!(outcome.failure_kind(), Some(NotarizationFailureKind::SubmissionRejected));
    }

    #[test]
    fn run_fingerprint_is_reproducible_across_engines() {
        let record = Record::Numeric(vec![70.5, 3000.0, 0.02]);
        let mut a = NotaryEngine::new(MarkerClassifier, RecordingNotary::default());
        let mut b = NotaryEngine::new(MarkerClassifier, RecordingNotary::default());
        let oa = a.run(&record).unwrap();
        let ob = b.run(&record).unwrap();
        assert_ne!(oa.run_id, ob.run_id);
        assert_eq!(oa.run_fingerprint, ob.run_fingerprint);
    }

    #[test]
    fn batch_notarizes_in_input_order() {
        let mut engine = NotaryEngine::new(MarkerClassifier, RecordingNotary::default());
        let records = vec![Record::Text("a OK".into()),
                           Record::Text("b ERROR".into()),
                           Record::Image(vec![9]),
                           Record::Text("c OK".into())];
        let results = engine.run_batch(&records);

        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap().notarized());
        assert!(results[1].as_ref().unwrap().is_rejected());
        assert!(results[2].is_err());
        assert!(results[3].as_ref().unwrap().notarized());

        let calls = engine.notary().calls.lock().unwrap().clone();
        assert_eq!(calls,
                   vec![fingerprint(&records[0]).unwrap(), fingerprint(&records[3]).unwrap()]);
    }
}
