//! Modelos de reconstrucción.
//!
//! El clasificador numérico sólo necesita `reconstruct`: cómo se entrenó el
//! modelo queda fuera de este crate. `LinearAutoencoder` es el modelo que se
//! distribuye como archivo JSON:
//!
//! ```json
//! { "feature_count": 2, "latent_dim": 1,
//!   "encoder": [[0.7071, 0.7071]],
//!   "decoder": [[0.7071], [0.7071]],
//!   "mean": [0.0, 0.0] }
//! ```
//!
//! `reconstruct(x) = decoder · (encoder · (x − mean)) + mean`.

use log::debug;
use notary_core::ClassifierUnavailable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Modelo que reproduce un frame de `feature_count` lecturas.
pub trait ReconstructionModel: Send + Sync {
    fn feature_count(&self) -> usize;

    /// `frame.len() == feature_count()` está garantizado por el caller.
    fn reconstruct(&self, frame: &[f64]) -> Vec<f64>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearAutoencoder {
    pub feature_count: usize,
    pub latent_dim: usize,
    /// `latent_dim` filas de `feature_count` columnas.
    pub encoder: Vec<Vec<f64>>,
    /// `feature_count` filas de `latent_dim` columnas.
    pub decoder: Vec<Vec<f64>>,
    /// Centro de los datos; vacío equivale a ceros.
    #[serde(default)]
    pub mean: Vec<f64>,
}

impl LinearAutoencoder {
    /// Carga y valida un modelo desde disco.
    pub fn load(path: &Path) -> Result<Self, ClassifierUnavailable> {
        let raw = fs::read_to_string(path).map_err(|e| {
                                              ClassifierUnavailable::new(format!("cannot read model {}: {e}",
                                                                                 path.display()))
                                          })?;
        let model: Self = serde_json::from_str(&raw).map_err(|e| {
                                                       ClassifierUnavailable::new(format!("invalid model {}: {e}",
                                                                                          path.display()))
                                                   })?;
        model.validate()?;
        debug!("loaded linear autoencoder {} -> {} from {}",
               model.feature_count,
               model.latent_dim,
               path.display());
        Ok(model)
    }

    /// Comprueba que las dimensiones declaradas coincidan con las matrices.
    pub fn validate(&self) -> Result<(), ClassifierUnavailable> {
        let shape_err = |what: &str| ClassifierUnavailable::new(format!("model shape mismatch: {what}"));
        if self.feature_count == 0 || self.latent_dim == 0 {
            return Err(shape_err("dimensions must be positive"));
        }
        if self.encoder.len() != self.latent_dim || self.encoder.iter().any(|row| row.len() != self.feature_count) {
            return Err(shape_err("encoder must be latent_dim x feature_count"));
        }
        if self.decoder.len() != self.feature_count || self.decoder.iter().any(|row| row.len() != self.latent_dim) {
            return Err(shape_err("decoder must be feature_count x latent_dim"));
        }
        if !self.mean.is_empty() && self.mean.len() != self.feature_count {
            return Err(shape_err("mean must have feature_count entries"));
        }
        let all_finite = self.encoder.iter().chain(self.decoder.iter()).flatten().chain(self.mean.iter()).all(|w| w.is_finite());
        if !all_finite {
            return Err(shape_err("weights must be finite"));
        }
        Ok(())
    }

    fn center(&self, i: usize) -> f64 {
        self.mean.get(i).copied().unwrap_or(0.0)
    }
}

impl ReconstructionModel for LinearAutoencoder {
    fn feature_count(&self) -> usize { self.feature_count }

    fn reconstruct(&self, frame: &[f64]) -> Vec<f64> {
        let centered: Vec<f64> = frame.iter().enumerate().map(|(i, x)| x - self.center(i)).collect();
        let latent: Vec<f64> = self.encoder
                                   .iter()
                                   .map(|row| row.iter().zip(&centered).map(|(w, x)| w * x).sum())
                                   .collect();
        self.decoder
            .iter()
            .enumerate()
            .map(|(i, row)| row.iter().zip(&latent).map(|(w, z)| w * z).sum::<f64>() + self.center(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_model() -> LinearAutoencoder {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        LinearAutoencoder { feature_count: 2,
                            latent_dim: 1,
                            encoder: vec![vec![h, h]],
                            decoder: vec![vec![h], vec![h]],
                            mean: vec![] }
    }

    #[test]
    fn points_on_the_learned_axis_are_reproduced() {
        let m = diagonal_model();
        let out = m.reconstruct(&[3.0, 3.0]);
        assert!((out[0] - 3.0).abs() < 1e-9 && (out[1] - 3.0).abs() < 1e-9);
        // Ortogonal al eje: se proyecta a cero.
        let out = m.reconstruct(&[1.0, -1.0]);
        assert!(out.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn mean_is_removed_and_restored() {
        let mut m = diagonal_model();
        m.mean = vec![10.0, 10.0];
        let out = m.reconstruct(&[10.0, 10.0]);
        assert!((out[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        let mut m = diagonal_model();
        m.decoder = vec![vec![1.0]];
        assert!(m.validate().unwrap_err().reason.contains("decoder"));
        let mut m = diagonal_model();
        m.mean = vec![0.0];
        assert!(m.validate().is_err());
        let mut m = diagonal_model();
        m.encoder[0][0] = f64::NAN;
        assert!(m.validate().is_err());
    }
}
