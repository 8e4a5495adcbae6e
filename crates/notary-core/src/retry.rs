//! Capa opcional de reintentos por encima del orquestador.
//!
//! El engine y el cliente de notarización nunca reintentan. Esta capa vuelve
//! a ejecutar el pipeline completo cuando el fallo anterior es transitorio
//! (`ConnectionFailure`, `ConfirmationTimeout`).
//!
//! Costo de reintentar: un `ConfirmationTimeout` (o una caída de la conexión
//! mientras se esperaba el receipt) significa que la transacción ya se
//! difundió. El reintento envía una transacción nueva, así que el mismo
//! fingerprint puede quedar anclado dos veces y el gas se paga dos veces.
//! Quien consuma los anclajes debe deduplicar por valor de fingerprint; quien
//! no acepte ese costo debe dejar `max_attempts` en 1 y consultar el
//! `transaction_id` del diagnóstico antes de volver a intentar.

use log::{info, warn};
use std::time::Duration;

use crate::capability::{AnomalyClassifier, NotarizationClient};
use crate::engine::{NotaryEngine, RunOutcome};
use crate::errors::{NotarizationFailureKind, PipelineError};
use crate::event::EventStore;
use crate::model::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Intentos totales (>= 1).
    pub max_attempts: u32,
    /// Espera fija entre intentos.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 1,
               backoff: Duration::from_secs(2) }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1),
               backoff }
    }
}

/// Resultado de la capa de retry: el último outcome y cuántos intentos hubo.
#[derive(Debug, Clone)]
pub struct RetryReport {
    pub outcome: RunOutcome,
    pub attempts: u32,
}

fn is_transient(outcome: &RunOutcome) -> bool {
    matches!(outcome.failure_kind(),
             Some(NotarizationFailureKind::ConnectionFailure) | Some(NotarizationFailureKind::ConfirmationTimeout))
}

/// Ejecuta `record` hasta `policy.max_attempts` veces. Los errores de
/// pipeline (clasificador, encoding) se propagan en el primer intento.
pub fn run_with_retry<C, N, E>(engine: &mut NotaryEngine<C, N, E>,
                               record: &Record,
                               policy: &RetryPolicy)
                               -> Result<RetryReport, PipelineError>
    where C: AnomalyClassifier,
          N: NotarizationClient,
          E: EventStore
{
    let max = policy.max_attempts.max(1);
    let mut attempts = 0;
    loop {
        attempts += 1;
        let outcome = engine.run(record)?;
        if !is_transient(&outcome) || attempts >= max {
            if attempts > 1 {
                info!("retry: finished after {attempts} attempts with status {}", outcome.status.as_str());
            }
            return Ok(RetryReport { outcome, attempts });
        }
        warn!("retry: attempt {attempts}/{max} failed ({}); retrying in {:?}",
              outcome.diagnostic.as_deref().unwrap_or("unknown"),
              policy.backoff);
        if !policy.backoff.is_zero() {
            std::thread::sleep(policy.backoff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ClassifierUnavailable, NotarizationError};
    use crate::hashing::Fingerprint;
    use crate::model::{NotarizationReceipt, Verdict};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct AlwaysValid;
    impl AnomalyClassifier for AlwaysValid {
        fn name(&self) -> &str { "always-valid" }
        fn classify(&self, _r: &Record) -> Result<Verdict, ClassifierUnavailable> { Ok(Verdict::valid(0.0)) }
    }

    // Falla `failures` veces con el error dado y luego confirma.
    struct Flaky {
        failures: u32,
        error: NotarizationError,
        calls: AtomicU32,
    }

    impl NotarizationClient for Flaky {
        fn notarize(&self, fp: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(self.error.clone())
            } else {
                Ok(NotarizationReceipt::new(fp.clone(), "0xfeed", Some(1)))
            }
        }
    }

    fn flaky(failures: u32, error: NotarizationError) -> Flaky {
        Flaky { failures,
                error,
                calls: AtomicU32::new(0) }
    }

    #[test]
    fn transient_failures_are_retried_until_success() {
        let mut engine = NotaryEngine::new(AlwaysValid, flaky(2, NotarizationError::ConnectionFailure("reset".into())));
        let report = run_with_retry(&mut engine,
                                    &Record::Text("ok".into()),
                                    &RetryPolicy::new(3, Duration::ZERO)).unwrap();
        assert!(report.outcome.notarized());
        assert_eq!(report.attempts, 3);
    }

    #[test]
    fn permanent_failures_are_not_retried() {
        let mut engine = NotaryEngine::new(AlwaysValid,
                                           flaky(5, NotarizationError::SubmissionRejected("nonce too low".into())));
        let report = run_with_retry(&mut engine,
                                    &Record::Text("ok".into()),
                                    &RetryPolicy::new(4, Duration::ZERO)).unwrap();
        assert!(!report.outcome.notarized());
        assert_eq!(report.attempts, 1);
        assert_eq!(engine.notary().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn attempts_are_bounded() {
        let mut engine = NotaryEngine::new(AlwaysValid,
                                           flaky(10,
                                                 NotarizationError::ConfirmationTimeout { transaction_id: "0x1".into(),
                                                                                          waited_secs: 0 }));
        let report = run_with_retry(&mut engine,
                                    &Record::Text("ok".into()),
                                    &RetryPolicy::new(2, Duration::ZERO)).unwrap();
        assert_eq!(report.attempts, 2);
        assert_eq!(report.outcome.failure_kind(), Some(NotarizationFailureKind::ConfirmationTimeout));
        // cada intento es una transacción nueva para el mismo fingerprint
        assert_eq!(engine.notary().calls.load(Ordering::SeqCst), 2);
    }
}
