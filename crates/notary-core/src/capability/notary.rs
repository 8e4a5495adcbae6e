use std::sync::Arc;

use crate::errors::NotarizationError;
use crate::hashing::Fingerprint;
use crate::model::NotarizationReceipt;

/// Cliente de notarización: construye, firma, envía y espera la inclusión de
/// una transacción que lleva el fingerprint. No reintenta; la política de
/// retry vive por encima del orquestador.
pub trait NotarizationClient {
    fn notarize(&self, fingerprint: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError>;
}

impl<T: NotarizationClient + ?Sized> NotarizationClient for Box<T> {
    fn notarize(&self, fingerprint: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
        (**self).notarize(fingerprint)
    }
}

impl<T: NotarizationClient + ?Sized> NotarizationClient for Arc<T> {
    fn notarize(&self, fingerprint: &Fingerprint) -> Result<NotarizationReceipt, NotarizationError> {
        (**self).notarize(fingerprint)
    }
}
