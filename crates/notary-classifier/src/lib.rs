//! notary-classifier: implementaciones de `AnomalyClassifier`.
//!
//! - `ReconstructionClassifier`: lecturas numéricas contra un modelo de
//!   reconstrucción (autoencoder lineal cargado desde JSON).
//! - `ImageIntegrityClassifier`: brillo medio del payload de imagen.
//! - `KeywordClassifier`: marcadores en logs de texto.
//! - `CompositeClassifier`: despacho por `RecordKind`.
pub mod composite;
pub mod config;
pub mod integrity;
pub mod keyword;
pub mod model;
pub mod reconstruction;

pub use composite::CompositeClassifier;
pub use config::ClassifierConfig;
pub use integrity::ImageIntegrityClassifier;
pub use keyword::KeywordClassifier;
pub use model::{LinearAutoencoder, ReconstructionModel};
pub use reconstruction::ReconstructionClassifier;
