//! Chequeo de integridad para payloads de imagen.
//!
//! No decodifica la imagen: resume el brillo medio de los bytes en un score
//! normalizado a `[-1, 1]` (`(media - 127.5) / 127.5`). Un payload es válido si
//! el score cae estrictamente dentro de `(-bound, bound)`; con el bound por
//! defecto (1.0) sólo los payloads totalmente negros o blancos se rechazan.

use notary_core::{AnomalyClassifier, ClassifierUnavailable, Record, Verdict};

const MID: f64 = 127.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageIntegrityClassifier {
    bound: f64,
}

impl ImageIntegrityClassifier {
    pub fn new(bound: f64) -> Self {
        Self { bound: bound.abs() }
    }

    pub fn bound(&self) -> f64 { self.bound }

    pub fn integrity_score(payload: &[u8]) -> f64 {
        let sum: u64 = payload.iter().map(|b| *b as u64).sum();
        let mean = sum as f64 / payload.len() as f64;
        (mean - MID) / MID
    }
}

impl Default for ImageIntegrityClassifier {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_INTEGRITY_BOUND)
    }
}

impl AnomalyClassifier for ImageIntegrityClassifier {
    fn name(&self) -> &str { "image-integrity" }

    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        let Record::Image(payload) = record else {
            return Err(ClassifierUnavailable::new(format!("integrity classifier cannot handle {} records",
                                                          record.kind())));
        };
        if payload.is_empty() {
            return Err(ClassifierUnavailable::new("empty image payload"));
        }
        let score = Self::integrity_score(payload);
        if score > -self.bound && score < self.bound {
            Ok(Verdict::valid(score))
        } else {
            Ok(Verdict::anomalous(score,
                                  format!("integrity score {score:.4} outside (-{b}, {b})", b = self.bound)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_payloads_are_rejected_with_default_bound() {
        let c = ImageIntegrityClassifier::default();
        let black = c.classify(&Record::Image(vec![0; 16])).unwrap();
        let white = c.classify(&Record::Image(vec![255; 16])).unwrap();
        assert_eq!(black.score, -1.0);
        assert_eq!(white.score, 1.0);
        assert!(!black.is_valid && !white.is_valid);
    }

    #[test]
    fn mixed_payload_is_valid() {
        let c = ImageIntegrityClassifier::default();
        let v = c.classify(&Record::Image(vec![0, 255, 128, 127])).unwrap();
        assert!(v.is_valid);
        assert!(v.score.abs() < 0.01);
    }

    #[test]
    fn tighter_bound_rejects_dark_frames() {
        let c = ImageIntegrityClassifier::new(0.5);
        assert!(!c.classify(&Record::Image(vec![10; 8])).unwrap().is_valid);
    }

    #[test]
    fn empty_or_wrong_kind_is_unavailable() {
        let c = ImageIntegrityClassifier::default();
        assert!(c.classify(&Record::Image(vec![])).is_err());
        assert!(c.classify(&Record::Numeric(vec![1.0])).is_err());
    }
}
