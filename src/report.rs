//! Líneas de estado para el operador y códigos de salida.

use notary_core::{NotarizationFailureKind, PipelineError, RunOutcome, RunStatus};
use std::fmt::Display;

use crate::errors::AppError;

pub const EXIT_OK: i32 = 0;
pub const EXIT_REJECTED: i32 = 2;
pub const EXIT_NOTARIZATION_FAILED: i32 = 3;
pub const EXIT_INPUT_ERROR: i32 = 4;
pub const EXIT_CLASSIFIER_UNAVAILABLE: i32 = 5;

pub fn outcome_exit_code(outcome: &RunOutcome) -> i32 {
    match outcome.status {
        RunStatus::Confirmed => EXIT_OK,
        RunStatus::Rejected => EXIT_REJECTED,
        _ => EXIT_NOTARIZATION_FAILED,
    }
}

pub fn pipeline_error_exit_code(err: &PipelineError) -> i32 {
    match err {
        PipelineError::Encoding(_) => EXIT_INPUT_ERROR,
        PipelineError::ClassifierUnavailable(_) => EXIT_CLASSIFIER_UNAVAILABLE,
    }
}

pub fn exit_code_for(result: &Result<RunOutcome, PipelineError>) -> i32 {
    match result {
        Ok(outcome) => outcome_exit_code(outcome),
        Err(e) => pipeline_error_exit_code(e),
    }
}

pub fn app_error_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::Source(_) => EXIT_INPUT_ERROR,
        AppError::Pipeline(e) => pipeline_error_exit_code(e),
        AppError::Chain(_) => EXIT_NOTARIZATION_FAILED,
    }
}

pub fn connection_line<E: Display>(result: &Result<u64, E>) -> String {
    match result {
        Ok(chain_id) => format!("Conectado a la cadena (chain id {chain_id})"),
        Err(e) => format!("Conexión fallida: {e}"),
    }
}

/// Veredicto, fingerprint y resultado de la notarización, en ese orden.
pub fn status_lines(label: &str, outcome: &RunOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    if outcome.verdict.is_valid {
        lines.push(format!("[{label}] Verificado por IA (score {:.4})", outcome.verdict.score));
    } else {
        let reason = outcome.diagnostic.as_deref().unwrap_or("sin motivo");
        lines.push(format!("[{label}] Alerta: anomalía detectada ({reason}). Acción: RECHAZADO."));
    }
    if let Some(fp) = &outcome.fingerprint {
        lines.push(format!("[{label}] Fingerprint: {fp}"));
    }
    if let Some(receipt) = &outcome.receipt {
        let link = receipt.explorer_url.as_deref().unwrap_or(&receipt.transaction_id);
        match receipt.block_number {
            Some(block) => lines.push(format!("[{label}] Notarizado en el bloque {block}: {link}")),
            None => lines.push(format!("[{label}] Notarizado: {link}")),
        }
    }
    if let Some(failure) = &outcome.failure {
        lines.push(format!("[{label}] Error de notarización ({}): {}", failure.kind.as_str(), failure.message));
        if failure.kind == NotarizationFailureKind::ConfigurationError {
            lines.push(format!("[{label}] Sugerencia: ¿desplegaste el contrato y configuraste NOTARY_CONTRACT_ADDRESS y PRIVATE_KEY?"));
        }
    }
    lines
}
