//! Modelos del pipeline (Record, Verdict, NotarizationReceipt).

pub mod receipt;
pub mod record;
pub mod verdict;

pub use receipt::NotarizationReceipt;
pub use record::{Record, RecordKind};
pub use verdict::Verdict;
