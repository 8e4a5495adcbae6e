//! `Record`: la lectura capturada que entra al pipeline.
//!
//! Exactamente una representación está activa por ejecución. El record es
//! inmutable una vez capturado: el engine sólo lo toma por referencia.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Record {
    /// Lecturas de sensores en orden original (temperatura, RPM, vibración...).
    Numeric(Vec<f64>),
    /// Payload crudo de una imagen (PNG, JPEG... no se decodifica).
    Image(Vec<u8>),
    /// Línea de log de máquina tal cual llegó.
    Text(String),
}

/// Nombre de la representación activa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Numeric,
    Image,
    Text,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Numeric(_) => RecordKind::Numeric,
            Record::Image(_) => RecordKind::Image,
            Record::Text(_) => RecordKind::Text,
        }
    }

    /// Número de lecturas / bytes / caracteres, útil para logs.
    pub fn len(&self) -> usize {
        match self {
            Record::Numeric(v) => v.len(),
            Record::Image(b) => b.len(),
            Record::Text(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Numeric => "numeric",
            RecordKind::Image => "image",
            RecordKind::Text => "text",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Vec<f64>> for Record {
    fn from(v: Vec<f64>) -> Self { Record::Numeric(v) }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self { Record::Text(s.to_string()) }
}
