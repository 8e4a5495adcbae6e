//! Ubicación de las fuentes de datos del agente.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_DATA_CSV: &str = "data/mill.csv";
pub const DEFAULT_COLUMNS: [&str; 2] = ["vib_spindle", "AE_spindle"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub data_csv: PathBuf,
    pub columns: Vec<String>,
    /// Frame de cámara opcional; sin él sólo se procesa el CSV.
    pub image_path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { data_csv: PathBuf::from(DEFAULT_DATA_CSV),
               columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
               image_path: None }
    }
}

impl SourceConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let data_csv = env::var("NOTARY_DATA_CSV").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from).unwrap_or(defaults.data_csv);
        let columns = env::var("NOTARY_DATA_COLUMNS").ok()
                                                      .map(|v| v.split(',').map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect::<Vec<_>>())
                                                      .filter(|c| !c.is_empty())
                                                      .unwrap_or(defaults.columns);
        let image_path = env::var("NOTARY_IMAGE_PATH").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self { data_csv,
               columns,
               image_path }
    }
}
