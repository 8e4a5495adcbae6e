//! notary-core: pipeline verify-then-notarize
//!
//! Clasificación → fingerprint → notarización condicional, con las dos
//! capacidades externas (clasificador, cliente de notarización) detrás de
//! traits inyectables.
pub mod capability;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod retry;

pub use capability::{AnomalyClassifier, NotarizationClient};
pub use engine::{NotarizationFailure, NotaryEngine, RunOutcome, RunStatus};
pub use errors::{ClassifierUnavailable, EncodingError, NotarizationError, NotarizationFailureKind, PipelineError};
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use hashing::{canonical_bytes, fingerprint, Fingerprint};
pub use model::{NotarizationReceipt, Record, RecordKind, Verdict};
pub use retry::{run_with_retry, RetryPolicy, RetryReport};
