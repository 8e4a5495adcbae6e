use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Verifica y notariza lecturas industriales", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Imprime sólo el fingerprint del record
    Fingerprint {
        #[command(subcommand)]
        input: Input,
    },
    /// Clasifica el record e imprime el veredicto
    Classify {
        #[command(subcommand)]
        input: Input,
    },
    /// Pipeline completo: clasificar, fingerprint y notarizar
    Run {
        /// Reintentos ante fallos transitorios de la cadena (además del primer intento)
        #[arg(long, default_value_t = 0)]
        retries: u32,
        /// Segundos de espera entre intentos
        #[arg(long, default_value_t = 2)]
        backoff_secs: u64,
        /// Imprime el `RunOutcome` como JSON
        #[arg(long)]
        json: bool,
        #[command(subcommand)]
        input: Input,
    },
    /// Valida la configuración de la cadena y la conectividad
    Check,
}

#[derive(Subcommand, Clone)]
pub enum Input {
    /// CSV con header; columnas numéricas seleccionadas
    Csv {
        path: PathBuf,
        /// Columnas a leer (por defecto NOTARY_DATA_COLUMNS)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Payload crudo de una imagen
    Image { path: PathBuf },
    /// Línea de log
    Text { line: String },
}
