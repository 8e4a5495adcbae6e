use serde::{Deserialize, Serialize};

/// Estado de una ejecución del pipeline.
///
/// Las transiciones válidas son:
/// - `Idle` -> `Classifying`
/// - `Classifying` -> `Rejected` | `Fingerprinting`
/// - `Fingerprinting` -> `Notarizing`
/// - `Notarizing` -> `Confirmed` | `Failed`
///
/// No hay estado de éxito parcial ni de "pendiente de retry".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Aún no se recibió record.
    Idle,
    /// Esperando el veredicto del clasificador.
    Classifying,
    /// Veredicto válido; calculando fingerprint.
    Fingerprinting,
    /// Esperando al cliente de notarización.
    Notarizing,
    /// Veredicto negativo (terminal).
    Rejected,
    /// Transacción incluida (terminal, éxito).
    Confirmed,
    /// El cliente de notarización falló (terminal).
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Rejected | RunStatus::Confirmed | RunStatus::Failed)
    }

    pub fn can_transition_to(self, next: RunStatus) -> bool {
        use RunStatus::*;
        matches!((self, next),
                 (Idle, Classifying)
                 | (Classifying, Rejected)
                 | (Classifying, Fingerprinting)
                 | (Fingerprinting, Notarizing)
                 | (Notarizing, Confirmed)
                 | (Notarizing, Failed))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Classifying => "classifying",
            RunStatus::Fingerprinting => "fingerprinting",
            RunStatus::Notarizing => "notarizing",
            RunStatus::Rejected => "rejected",
            RunStatus::Confirmed => "confirmed",
            RunStatus::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunStatus::*;

    #[test]
    fn linear_transitions_only() {
        assert!(Idle.can_transition_to(Classifying));
        assert!(Classifying.can_transition_to(Rejected));
        assert!(Notarizing.can_transition_to(Failed));
        assert!(!Classifying.can_transition_to(Notarizing));
        assert!(!Rejected.can_transition_to(Fingerprinting));
        assert!(!Failed.can_transition_to(Notarizing));
        assert!(Confirmed.is_terminal() && Rejected.is_terminal() && !Notarizing.is_terminal());
    }
}
