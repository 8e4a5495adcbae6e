use notary_adapters::SourceError;
use notary_core::{NotarizationError, PipelineError};
use thiserror::Error;

/// Errores del cableado de la aplicación (fuentes, pipeline, chequeos).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error leyendo la fuente: {0}")]
    Source(#[from] SourceError),
    #[error("Error en el pipeline: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Error de la cadena: {0}")]
    Chain(#[from] NotarizationError),
}
