use std::sync::Arc;

use crate::errors::ClassifierUnavailable;
use crate::model::{Record, Verdict};

/// Clasificador de anomalías. Implementaciones pueden ser costosas y correr
/// en hardware especializado: el engine no asume latencia acotada.
///
/// `Err(ClassifierUnavailable)` es un fallo de infraestructura, nunca un
/// veredicto negativo.
pub trait AnomalyClassifier: Send + Sync {
    /// Nombre estable (aparece en eventos y logs).
    fn name(&self) -> &str;

    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable>;
}

impl<T: AnomalyClassifier + ?Sized> AnomalyClassifier for Box<T> {
    fn name(&self) -> &str { (**self).name() }
    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> { (**self).classify(record) }
}

impl<T: AnomalyClassifier + ?Sized> AnomalyClassifier for Arc<T> {
    fn name(&self) -> &str { (**self).name() }
    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> { (**self).classify(record) }
}
