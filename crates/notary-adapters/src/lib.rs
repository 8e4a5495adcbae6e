//! notary-adapters: de archivos a `Record`.
//!
//! - `TabularSource`: columnas numéricas de un CSV.
//! - `ImageSource`: payload crudo de una imagen.
//! - `TextSource`: línea de log.
pub mod blob;
pub mod config;
pub mod error;
pub mod tabular;

pub use blob::{ImageSource, TextSource};
pub use config::SourceConfig;
pub use error::SourceError;
pub use tabular::TabularSource;
