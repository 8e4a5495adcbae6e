//! Configuración de los clasificadores desde variables de entorno.
//! Se lee una vez al arrancar y se pasa por valor a los constructores.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_RECONSTRUCTION_THRESHOLD: f64 = 0.5;
pub const DEFAULT_FEATURE_COUNT: usize = 2;
pub const DEFAULT_INTEGRITY_BOUND: f64 = 1.0;
pub const DEFAULT_ANOMALY_MARKER: &str = "ERROR";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Archivo JSON del modelo de reconstrucción. Sin él, los records
    /// numéricos no se pueden clasificar.
    pub model_path: Option<PathBuf>,
    /// Umbral del error de reconstrucción: válido si `score < threshold`.
    pub reconstruction_threshold: f64,
    /// Lecturas por frame (columnas de la fuente tabular).
    pub feature_count: usize,
    /// Rango simétrico abierto `(-bound, bound)` del integrity score.
    pub integrity_bound: f64,
    /// Marcadores que invalidan un log de texto.
    pub anomaly_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { model_path: None,
               reconstruction_threshold: DEFAULT_RECONSTRUCTION_THRESHOLD,
               feature_count: DEFAULT_FEATURE_COUNT,
               integrity_bound: DEFAULT_INTEGRITY_BOUND,
               anomaly_markers: vec![DEFAULT_ANOMALY_MARKER.to_string()] }
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let model_path = env::var("NOTARY_MODEL_PATH").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let reconstruction_threshold = env::var("NOTARY_RECONSTRUCTION_THRESHOLD").ok()
                                                                                   .and_then(|v| v.parse().ok())
                                                                                   .unwrap_or(DEFAULT_RECONSTRUCTION_THRESHOLD);
        let feature_count = env::var("NOTARY_FEATURE_COUNT").ok()
                                                             .and_then(|v| v.parse().ok())
                                                             .filter(|n: &usize| *n > 0)
                                                             .unwrap_or(DEFAULT_FEATURE_COUNT);
        let integrity_bound = env::var("NOTARY_INTEGRITY_BOUND").ok()
                                                                 .and_then(|v| v.parse().ok())
                                                                 .map(|b: f64| b.abs())
                                                                 .unwrap_or(DEFAULT_INTEGRITY_BOUND);
        let anomaly_markers = env::var("NOTARY_ANOMALY_MARKERS").map(|v| parse_markers(&v))
                                                                 .unwrap_or_else(|_| vec![DEFAULT_ANOMALY_MARKER.to_string()]);
        Self { model_path,
               reconstruction_threshold,
               feature_count,
               integrity_bound,
               anomaly_markers }
    }
}

fn parse_markers(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}
