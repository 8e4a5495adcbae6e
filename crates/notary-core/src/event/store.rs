use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::{RunEvent, RunEventKind};

/// Diario append-only de ejecuciones.
///
/// `seq` es global al diario: entre ejecuciones refleja el orden real en que
/// el engine las fue cerrando (en batch, el orden de notarización).
pub trait EventStore {
    /// Agrega un evento y lo devuelve con `seq` y `ts` asignados.
    fn append_kind(&mut self, run_id: Uuid, kind: RunEventKind) -> RunEvent;
    /// Eventos de una ejecución, por `seq` ascendente.
    fn list(&self, run_id: Uuid) -> Vec<RunEvent>;
    /// Ejecuciones en orden de primer evento.
    fn run_ids(&self) -> Vec<Uuid>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    log: Vec<RunEvent>,
    by_run: HashMap<Uuid, Vec<usize>>,
    order: Vec<Uuid>,
}

impl InMemoryEventStore {
    pub fn len(&self) -> usize { self.log.len() }

    pub fn is_empty(&self) -> bool { self.log.is_empty() }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: RunEventKind) -> RunEvent {
        let ev = RunEvent { seq: self.log.len() as u64,
                            run_id,
                            kind,
                            ts: Utc::now() };
        let positions = self.by_run.entry(run_id).or_default();
        if positions.is_empty() {
            self.order.push(run_id);
        }
        positions.push(self.log.len());
        self.log.push(ev.clone());
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.by_run
            .get(&run_id)
            .map(|positions| positions.iter().map(|&i| self.log[i].clone()).collect())
            .unwrap_or_default()
    }

    fn run_ids(&self) -> Vec<Uuid> {
        self.order.clone()
    }
}
