//! Fuentes de payload crudo: imágenes y logs de texto.

use notary_core::Record;
use std::fs;
use std::path::Path;

use crate::error::SourceError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SourceError + '_ {
    move |source| SourceError::Io { path: path.display().to_string(),
                                    source }
}

/// Bytes del archivo tal cual; no se decodifica el formato.
pub struct ImageSource;

impl ImageSource {
    pub fn load(path: &Path) -> Result<Record, SourceError> {
        fs::read(path).map(Record::Image).map_err(io_error(path))
    }
}

/// Una línea de log de máquina.
pub struct TextSource;

impl TextSource {
    pub fn from_line(line: impl Into<String>) -> Record {
        Record::Text(line.into())
    }

    /// Contenido del archivo sin el salto de línea final.
    pub fn load(path: &Path) -> Result<Record, SourceError> {
        let content = fs::read_to_string(path).map_err(io_error(path))?;
        Ok(Record::Text(content.trim_end_matches(['\r', '\n']).to_string()))
    }
}
