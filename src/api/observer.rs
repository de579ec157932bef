use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::filter::{FilterIntent, FilterState};

use super::ViewId;

/// Event stream exposed to host observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardEvent {
    DataLoaded { records: usize },
    GroupSelected { group: String, records: usize },
    IntentApplied { intent: FilterIntent, changed: bool },
    Rendered {
        view: ViewId,
        entered: usize,
        updated: usize,
        exited: usize,
    },
}

/// Host hook for controller events.
///
/// Observers see the filter state after the event took effect and cannot
/// mutate it.
pub trait DashboardObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &DashboardEvent, filter: &FilterState);
}

#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn DashboardObserver>>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|observer| observer.id()))
            .finish()
    }
}

impl ObserverRegistry {
    /// Registers an observer with a unique, non-empty identifier.
    pub fn register(&mut self, observer: Box<dyn DashboardObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.contains(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn contains(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|entry| entry.id() == observer_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, event: &DashboardEvent, filter: &FilterState) {
        for observer in &mut self.observers {
            observer.on_event(event, filter);
        }
    }
}
