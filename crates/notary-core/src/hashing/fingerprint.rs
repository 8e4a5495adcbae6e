//! Fingerprinter: SHA-256 de la forma canónica de un `Record`.
//!
//! Regla de canonicalización (fija; cambiarla rompe la reproducibilidad de
//! todo lo ya anclado):
//! - `Numeric`: cada lectura se renderiza en texto decimal con el formato
//!   `Display` de `f64` (round-trip más corto, nunca notación exponencial) y
//!   `.0` añadido si no hay parte fraccionaria: `3000.0`, `70.5`, `0.02`,
//!   `0.0000001`. Unidas por `,` sin espacios y en el orden original.
//! - `Image`: los bytes crudos tal cual.
//! - `Text`: los bytes UTF-8 del string tal cual.
//!
//! El digest se expresa en hex minúscula (64 caracteres).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;

use crate::constants::{FINGERPRINT_HEX_LEN, NUMERIC_SEPARATOR};
use crate::errors::EncodingError;
use crate::model::Record;

/// Digest hex de 64 caracteres. Sólo se construye vía `fingerprint` o
/// `from_hex` (validado).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl TryFrom<String> for Fingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Fingerprint::from_hex(&value).ok_or_else(|| format!("not a {FINGERPRINT_HEX_LEN}-digit hex digest: {value:?}"))
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self { fp.0 }
}

impl Fingerprint {
    /// Acepta un digest externo (p.ej. leído de un log) si tiene la forma
    /// correcta. Normaliza a minúsculas.
    pub fn from_hex(hex_digest: &str) -> Option<Self> {
        let normalized = hex_digest.trim().to_ascii_lowercase();
        let ok = normalized.len() == FINGERPRINT_HEX_LEN && normalized.chars().all(|c| c.is_ascii_hexdigit());
        ok.then_some(Self(normalized))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str { &self.0 }
}

/// Texto decimal de una lectura finita.
fn decimal_text(v: f64) -> String {
    let mut text = v.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Bytes exactos que se hashean para `record`.
pub fn canonical_bytes(record: &Record) -> Result<Cow<'_, [u8]>, EncodingError> {
    match record {
        Record::Numeric(values) => {
            if values.is_empty() {
                return Err(EncodingError::EmptyNumeric);
            }
            let mut parts = Vec::with_capacity(values.len());
            for (index, v) in values.iter().enumerate() {
                if !v.is_finite() {
                    return Err(EncodingError::NonFinite { index });
                }
                parts.push(decimal_text(*v));
            }
            Ok(Cow::Owned(parts.join(NUMERIC_SEPARATOR).into_bytes()))
        }
        Record::Image(bytes) if bytes.is_empty() => Err(EncodingError::EmptyImage),
        Record::Image(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
        Record::Text(s) if s.is_empty() => Err(EncodingError::EmptyText),
        Record::Text(s) => Ok(Cow::Borrowed(s.as_bytes())),
    }
}

/// Fingerprint determinista del record. Función pura.
pub fn fingerprint(record: &Record) -> Result<Fingerprint, EncodingError> {
    let bytes = canonical_bytes(record)?;
    Ok(Fingerprint::of_bytes(&bytes))
}
