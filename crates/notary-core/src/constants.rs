//! Constantes del motor de notarización.
//!
//! `ENGINE_VERSION` entra en el cálculo del `run_fingerprint`: un cambio de
//! versión invalida los digests de auditoría aunque el record y el veredicto
//! no cambien. El fingerprint del record (SHA-256) NO depende de esta
//! constante; es lo único que se ancla on-chain.

/// Versión lógica del motor. Mantener estable mientras no haya cambios
/// incompatibles en el orden de pasos o en los hechos auditados.
pub const ENGINE_VERSION: &str = "N1.0";

/// Separador usado al canonicalizar records numéricos.
pub const NUMERIC_SEPARATOR: &str = ",";

/// Longitud en caracteres hex de un fingerprint SHA-256.
pub const FINGERPRINT_HEX_LEN: usize = 64;
