//! Builder para `NotaryEngine`.
//!
//! Patrón typestate: primero se declara el clasificador, luego el cliente de
//! notarización; sólo entonces existe `build()`. Un engine sin alguna de las
//! dos capacidades no compila.
//!
//! ```ignore
//! let engine = notary_core::engine::builder()
//!     .classifier(my_classifier)
//!     .notary(my_client)
//!     .build();
//! ```

use crate::capability::{AnomalyClassifier, NotarizationClient};
use crate::engine::NotaryEngine;
use crate::event::{EventStore, InMemoryEventStore};

/// Estado inicial: sólo el store de eventos.
#[derive(Debug, Default)]
pub struct EngineBuilderInit<E: EventStore> {
    pub event_store: E,
}

/// Punto de entrada con store en memoria.
pub fn builder() -> EngineBuilderInit<InMemoryEventStore> {
    EngineBuilderInit::default()
}

impl<E: EventStore> EngineBuilderInit<E> {
    /// Reemplaza el store de eventos.
    pub fn with_event_store<E2: EventStore>(self, event_store: E2) -> EngineBuilderInit<E2> {
        EngineBuilderInit { event_store }
    }

    #[inline]
    pub fn classifier<C: AnomalyClassifier>(self, classifier: C) -> EngineBuilderWithClassifier<C, E> {
        EngineBuilderWithClassifier { classifier,
                                      event_store: self.event_store }
    }
}

/// Clasificador declarado; falta el cliente de notarización.
#[derive(Debug)]
pub struct EngineBuilderWithClassifier<C: AnomalyClassifier, E: EventStore> {
    classifier: C,
    event_store: E,
}

impl<C: AnomalyClassifier, E: EventStore> EngineBuilderWithClassifier<C, E> {
    #[inline]
    pub fn notary<N: NotarizationClient>(self, notary: N) -> EngineBuilder<C, N, E> {
        EngineBuilder { classifier: self.classifier,
                        notary,
                        event_store: self.event_store }
    }
}

/// Builder completo.
#[derive(Debug)]
pub struct EngineBuilder<C: AnomalyClassifier, N: NotarizationClient, E: EventStore> {
    classifier: C,
    notary: N,
    event_store: E,
}

impl<C: AnomalyClassifier, N: NotarizationClient, E: EventStore> EngineBuilder<C, N, E> {
    #[inline]
    pub fn build(self) -> NotaryEngine<C, N, E> {
        NotaryEngine::new_with_store(self.classifier, self.notary, self.event_store)
    }
}
