//! Clasificador numérico por error de reconstrucción.
//!
//! El record se parte en frames de `feature_count` lecturas; el score es el
//! error cuadrático medio entre cada frame y su reconstrucción. Un record es
//! válido si `score < threshold`.

use log::debug;
use notary_core::{AnomalyClassifier, ClassifierUnavailable, Record, Verdict};

use crate::config::ClassifierConfig;
use crate::model::{LinearAutoencoder, ReconstructionModel};

pub struct ReconstructionClassifier<M: ReconstructionModel> {
    model: M,
    threshold: f64,
}

impl<M: ReconstructionModel> ReconstructionClassifier<M> {
    pub fn new(model: M, threshold: f64) -> Self {
        Self { model, threshold }
    }

    pub fn threshold(&self) -> f64 { self.threshold }

    pub fn model(&self) -> &M { &self.model }

    /// MSE sobre todas las lecturas del record.
    pub fn reconstruction_error(&self, readings: &[f64]) -> Result<f64, ClassifierUnavailable> {
        let width = self.model.feature_count();
        if readings.is_empty() {
            return Err(ClassifierUnavailable::new("no readings to classify"));
        }
        if width == 0 || readings.len() % width != 0 {
            return Err(ClassifierUnavailable::new(format!("shape mismatch: {} readings do not form frames of {width}",
                                                          readings.len())));
        }
        let mut squared = 0.0;
        for frame in readings.chunks(width) {
            let rebuilt = self.model.reconstruct(frame);
            if rebuilt.len() != width {
                return Err(ClassifierUnavailable::new(format!("model returned {} values for a frame of {width}",
                                                              rebuilt.len())));
            }
            squared += frame.iter().zip(&rebuilt).map(|(x, y)| (x - y) * (x - y)).sum::<f64>();
        }
        Ok(squared / readings.len() as f64)
    }
}

impl ReconstructionClassifier<LinearAutoencoder> {
    /// Carga el modelo indicado por la configuración y comprueba que su
    /// ancho coincida con `feature_count`.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierUnavailable> {
        let path = config.model_path
                         .as_deref()
                         .ok_or_else(|| ClassifierUnavailable::new("no reconstruction model configured (NOTARY_MODEL_PATH)"))?;
        let model = LinearAutoencoder::load(path)?;
        if model.feature_count != config.feature_count {
            return Err(ClassifierUnavailable::new(format!("model expects {} features per frame, source provides {}",
                                                          model.feature_count, config.feature_count)));
        }
        Ok(Self::new(model, config.reconstruction_threshold))
    }
}

impl<M: ReconstructionModel> AnomalyClassifier for ReconstructionClassifier<M> {
    fn name(&self) -> &str { "reconstruction" }

    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        let Record::Numeric(readings) = record else {
            return Err(ClassifierUnavailable::new(format!("reconstruction classifier cannot handle {} records",
                                                          record.kind())));
        };
        if let Some(i) = readings.iter().position(|v| !v.is_finite()) {
            // Una lectura NaN/∞ es en sí misma una anomalía del sensor.
            return Ok(Verdict::anomalous(f64::INFINITY, format!("non-finite reading at position {i}")));
        }
        let score = self.reconstruction_error(readings)?;
        debug!("reconstruction: mse={score:.6} threshold={}", self.threshold);
        if score < self.threshold {
            Ok(Verdict::valid(score))
        } else {
            Ok(Verdict::anomalous(score,
                                  format!("reconstruction error {score:.4} >= threshold {}", self.threshold)))
        }
    }
}
