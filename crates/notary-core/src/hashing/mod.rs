//! Fingerprint de records (SHA-256) y digests de auditoría (BLAKE3 sobre JSON
//! canónico).

pub mod canonical_json;
pub mod fingerprint;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use fingerprint::{canonical_bytes, fingerprint, Fingerprint};
pub use hash::{hash_str, hash_value};
