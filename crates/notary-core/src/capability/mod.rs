//! Contratos de las dos capacidades externas.
//!
//! El engine sólo conoce estos traits; los tests los sustituyen por fakes
//! deterministas y los binarios inyectan las implementaciones reales
//! (`notary-classifier`, `notary-chain`).

pub mod classifier;
pub mod notary;

pub use classifier::AnomalyClassifier;
pub use notary::NotarizationClient;
