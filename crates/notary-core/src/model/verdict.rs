use serde::{Deserialize, Serialize};

/// Juicio del clasificador sobre un record. Se produce una vez por record y
/// no se muta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_valid: bool,
    /// Error de reconstrucción, integrity score o conteo de marcadores según
    /// el clasificador.
    pub score: f64,
    pub reason: Option<String>,
}

impl Verdict {
    pub fn valid(score: f64) -> Self {
        Self { is_valid: true,
               score,
               reason: None }
    }

    pub fn anomalous(score: f64, reason: impl Into<String>) -> Self {
        Self { is_valid: false,
               score,
               reason: Some(reason.into()) }
    }
}
