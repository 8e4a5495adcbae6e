//! Despacho por tipo de record.
//!
//! Cada `RecordKind` tiene a lo sumo un clasificador registrado. Un kind sin
//! clasificador, o cuyo modelo no se pudo cargar, produce
//! `ClassifierUnavailable` sólo cuando llega un record de ese tipo.

use log::{info, warn};
use notary_core::{AnomalyClassifier, ClassifierUnavailable, Record, RecordKind, Verdict};
use std::collections::HashMap;

use crate::config::ClassifierConfig;
use crate::integrity::ImageIntegrityClassifier;
use crate::keyword::KeywordClassifier;
use crate::reconstruction::ReconstructionClassifier;

pub struct CompositeClassifier {
    routes: HashMap<RecordKind, Box<dyn AnomalyClassifier>>,
}

impl CompositeClassifier {
    /// Crea un `CompositeClassifier` vacío.
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registra (o reemplaza) el clasificador para `kind`.
    pub fn with<C>(mut self, kind: RecordKind, classifier: C) -> Self
        where C: AnomalyClassifier + 'static
    {
        self.routes.insert(kind, Box::new(classifier));
        self
    }

    /// Clasificadores por defecto: reconstrucción para numéricos, integridad
    /// para imágenes, marcadores para texto.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let numeric: Box<dyn AnomalyClassifier> = match ReconstructionClassifier::from_config(config) {
            Ok(c) => {
                info!("classifier: reconstruction model ready (threshold {})", c.threshold());
                Box::new(c)
            }
            Err(e) => {
                warn!("classifier: numeric records unavailable: {}", e.reason);
                Box::new(Unavailable { reason: e.reason })
            }
        };
        let mut composite = Self::new().with(RecordKind::Image, ImageIntegrityClassifier::new(config.integrity_bound))
                                       .with(RecordKind::Text, KeywordClassifier::new(config.anomaly_markers.clone()));
        composite.routes.insert(RecordKind::Numeric, numeric);
        composite
    }

    pub fn route_name(&self, kind: RecordKind) -> Option<&str> {
        self.routes.get(&kind).map(|c| c.name())
    }
}

impl Default for CompositeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyClassifier for CompositeClassifier {
    fn name(&self) -> &str { "composite" }

    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        let kind = record.kind();
        match self.routes.get(&kind) {
            Some(c) => c.classify(record),
            None => Err(ClassifierUnavailable::new(format!("no classifier registered for {kind} records"))),
        }
    }
}

// Ocupa el lugar de un clasificador cuyo modelo no cargó.
struct Unavailable {
    reason: String,
}

impl AnomalyClassifier for Unavailable {
    fn name(&self) -> &str { "unavailable" }

    fn classify(&self, _record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        Err(ClassifierUnavailable::new(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_record_kind() {
        let c = CompositeClassifier::new().with(RecordKind::Text, KeywordClassifier::default())
                                          .with(RecordKind::Image, ImageIntegrityClassifier::default());
        assert!(!c.classify(&Record::Text("ERROR".into())).unwrap().is_valid);
        assert!(c.classify(&Record::Image(vec![1, 200])).unwrap().is_valid);
        let err = c.classify(&Record::Numeric(vec![1.0])).unwrap_err();
        assert!(err.reason.contains("numeric"));
    }

    #[test]
    fn missing_model_only_affects_numeric_records() {
        let c = CompositeClassifier::from_config(&ClassifierConfig::default());
        assert_eq!(c.route_name(RecordKind::Numeric), Some("unavailable"));
        assert!(c.classify(&Record::Numeric(vec![1.0, 2.0])).is_err());
        assert!(c.classify(&Record::Text("STATUS=OK".into())).unwrap().is_valid);
    }
}
