//! `IndustrialAgent`: cablea el clasificador compuesto y el cliente EVM
//! alrededor de `NotaryEngine`, con la capa de retry opcional.
//!
//! Cada record (CSV de sensores, frame de cámara) es una ejecución
//! independiente: un record, una clasificación, un fingerprint y a lo sumo
//! una transacción.

use log::info;
use notary_adapters::{ImageSource, SourceConfig, TabularSource};
use notary_chain::{EvmNotarizationClient, UreqTransport};
use notary_classifier::CompositeClassifier;
use notary_core::{run_with_retry, AnomalyClassifier, NotarizationClient, NotaryEngine, PipelineError, Record, RetryPolicy,
                  RetryReport};

use crate::config::AppConfig;
use crate::errors::AppError;

/// Record con la etiqueta que aparece en las líneas de estado.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub label: String,
    pub record: Record,
}

/// Lee el CSV configurado y, si existe, el frame de imagen.
pub fn load_records(sources: &SourceConfig) -> Result<Vec<LabeledRecord>, AppError> {
    let tabular = TabularSource::new(sources.columns.iter().cloned());
    let mut records = vec![LabeledRecord { label: format!("cnc:{}", sources.data_csv.display()),
                                           record: tabular.load(&sources.data_csv)? }];
    if let Some(image) = &sources.image_path {
        records.push(LabeledRecord { label: format!("image:{}", image.display()),
                                     record: ImageSource::load(image)? });
    }
    Ok(records)
}

pub struct IndustrialAgent<C = CompositeClassifier, N = EvmNotarizationClient<UreqTransport>>
    where C: AnomalyClassifier,
          N: NotarizationClient
{
    engine: NotaryEngine<C, N>,
    retry: RetryPolicy,
}

impl IndustrialAgent {
    /// Agente de producción: clasificadores por defecto y cliente HTTP real.
    pub fn from_config(config: &AppConfig) -> Self {
        let classifier = CompositeClassifier::from_config(&config.classifier);
        let notary = EvmNotarizationClient::from_config(config.chain.clone());
        Self::new(classifier, notary)
    }
}

impl<C, N> IndustrialAgent<C, N>
    where C: AnomalyClassifier,
          N: NotarizationClient
{
    pub fn new(classifier: C, notary: N) -> Self {
        Self { engine: NotaryEngine::new(classifier, notary),
               retry: RetryPolicy::default() }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn engine(&self) -> &NotaryEngine<C, N> { &self.engine }

    pub fn notary(&self) -> &N { self.engine.notary() }

    /// Ejecuta el pipeline completo para un record.
    pub fn process(&mut self, record: &Record) -> Result<RetryReport, PipelineError> {
        info!("agent: processing {} record ({} items)", record.kind(), record.len());
        run_with_retry(&mut self.engine, record, &self.retry)
    }
}
