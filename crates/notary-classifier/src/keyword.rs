//! Clasificador de logs de texto por marcadores.

use notary_core::{AnomalyClassifier, ClassifierUnavailable, Record, Verdict};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    markers: Vec<String>,
}

impl KeywordClassifier {
    pub fn new<I, S>(markers: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { markers: markers.into_iter().map(|m| -> String { m.into() }).filter(|m| !m.is_empty()).collect() }
    }

    pub fn markers(&self) -> &[String] { &self.markers }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new([crate::config::DEFAULT_ANOMALY_MARKER])
    }
}

impl AnomalyClassifier for KeywordClassifier {
    fn name(&self) -> &str { "keyword" }

    fn classify(&self, record: &Record) -> Result<Verdict, ClassifierUnavailable> {
        let Record::Text(line) = record else {
            return Err(ClassifierUnavailable::new(format!("keyword classifier cannot handle {} records",
                                                          record.kind())));
        };
        let hits: usize = self.markers.iter().map(|m| line.matches(m.as_str()).count()).sum();
        // El primer marcador, por posición en el texto, da el motivo.
        let first = self.markers
                        .iter()
                        .filter_map(|m| line.find(m.as_str()).map(|pos| (pos, m)))
                        .min_by_key(|(pos, _)| *pos);
        match first {
            Some((_, marker)) => Ok(Verdict::anomalous(hits as f64, format!("marker '{marker}' found"))),
            None => Ok(Verdict::valid(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_marker_rejects_the_line() {
        let c = KeywordClassifier::default();
        let v = c.classify(&Record::Text("spindle ERROR overload ERROR".into())).unwrap();
        assert!(!v.is_valid);
        assert_eq!(v.score, 2.0);
        assert_eq!(v.reason.as_deref(), Some("marker 'ERROR' found"));
    }

    #[test]
    fn clean_line_is_valid() {
        let v = KeywordClassifier::default().classify(&Record::Text("STATUS=OK temp=70.5".into())).unwrap();
        assert!(v.is_valid);
        assert_eq!(v.score, 0.0);
    }

    #[test]
    fn reason_names_earliest_marker() {
        let c = KeywordClassifier::new(["FAULT", "ERROR"]);
        let v = c.classify(&Record::Text("ERROR then FAULT".into())).unwrap();
        assert_eq!(v.reason.as_deref(), Some("marker 'ERROR' found"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(KeywordClassifier::default().classify(&Record::Text("error".into())).unwrap().is_valid);
    }
}
