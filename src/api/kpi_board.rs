use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::KpiCounter;

/// Display value of one running or finished counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiFrame {
    pub id: String,
    pub display: String,
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct KpiSlot {
    counter: KpiCounter,
    started_at: Option<Duration>,
}

/// KPI cards of a page. Each counter starts at most once.
#[derive(Debug, Clone)]
pub struct KpiBoard {
    counters: IndexMap<String, KpiSlot>,
    thousands_separator: String,
}

impl KpiBoard {
    #[must_use]
    pub fn new(thousands_separator: impl Into<String>) -> Self {
        Self {
            counters: IndexMap::new(),
            thousands_separator: thousands_separator.into(),
        }
    }

    /// Adds a counter; an existing counter with the same id is kept.
    pub fn add(&mut self, id: impl Into<String>, counter: KpiCounter) -> bool {
        let id = id.into();
        if self.counters.contains_key(&id) {
            return false;
        }
        self.counters.insert(
            id,
            KpiSlot {
                counter,
                started_at: None,
            },
        );
        true
    }

    /// Starts the count-up. Returns `false` for unknown or already started counters.
    pub fn start(&mut self, id: &str, now: Duration) -> bool {
        let Some(slot) = self.counters.get_mut(id) else {
            return false;
        };
        if slot.started_at.is_some() {
            return false;
        }
        slot.started_at = Some(now);
        debug!(kpi = id, target = slot.counter.target(), "kpi counter started");
        true
    }

    #[must_use]
    pub fn is_started(&self, id: &str) -> bool {
        self.counters
            .get(id)
            .is_some_and(|slot| slot.started_at.is_some())
    }

    /// Current text of a started counter.
    #[must_use]
    pub fn display(&self, id: &str, now: Duration) -> Option<String> {
        let slot = self.counters.get(id)?;
        let started_at = slot.started_at?;
        Some(
            slot.counter
                .display_at(now.saturating_sub(started_at), &self.thousands_separator),
        )
    }

    /// Frames of every started counter, in registration order.
    #[must_use]
    pub fn frame(&self, now: Duration) -> Vec<KpiFrame> {
        self.counters
            .iter()
            .filter_map(|(id, slot)| {
                let elapsed = now.saturating_sub(slot.started_at?);
                Some(KpiFrame {
                    id: id.clone(),
                    display: slot
                        .counter
                        .display_at(elapsed, &self.thousands_separator),
                    finished: slot.counter.is_finished(elapsed),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl Default for KpiBoard {
    fn default() -> Self {
        Self::new(",")
    }
}
