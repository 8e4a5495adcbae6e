//! NotaryFlow: agente industrial verify-then-notarize.
//!
//! Este crate cablea los crates del workspace:
//! - `notary-core`: modelo, fingerprint, engine y retry.
//! - `notary-classifier`: clasificadores de anomalías.
//! - `notary-chain`: cliente de notarización EVM.
//! - `notary-adapters`: fuentes de records.
//!
//! Expone `IndustrialAgent` y las líneas de estado que usan `main.rs` y la CLI.

pub mod agent;
pub mod config;
pub mod errors;
pub mod report;

pub use agent::{load_records, IndustrialAgent, LabeledRecord};
pub use config::AppConfig;
pub use errors::AppError;
