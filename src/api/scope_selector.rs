use tracing::{debug, info};

use crate::core::{EntityCode, ScopeSet, ScopeTable, SeriesDatum};

/// A change of the active scope, ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChange {
    pub scope: String,
    pub entities: Vec<EntityCode>,
}

/// Tracks the user-selected scope.
///
/// The requested name is remembered as given; unknown names resolve to the
/// table's default entity set.
#[derive(Debug, Clone)]
pub struct ScopeSelector {
    table: ScopeTable,
    active: String,
}

impl ScopeSelector {
    #[must_use]
    pub fn new(table: ScopeTable, initial: impl Into<String>) -> Self {
        Self {
            table,
            active: initial.into(),
        }
    }

    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    #[must_use]
    pub fn active_set(&self) -> &ScopeSet {
        self.table.resolve(&self.active)
    }

    #[must_use]
    pub fn table(&self) -> &ScopeTable {
        &self.table
    }

    /// Switches the active scope. Returns `None` when `scope` is already
    /// active, otherwise the change to broadcast.
    pub fn select(&mut self, scope: &str) -> Option<ScopeChange> {
        if scope == self.active {
            debug!(scope, "scope already active");
            return None;
        }
        if !self.table.contains(scope) {
            debug!(scope, "unknown scope; resolving to default entity set");
        }
        self.active = scope.to_owned();
        let entities = self.active_set().entities().to_vec();
        info!(scope, entity_count = entities.len(), "scope changed");
        Some(ScopeChange {
            scope: self.active.clone(),
            entities,
        })
    }

    /// Series visible under the active scope, in input order.
    #[must_use]
    pub fn filter(&self, series: &[SeriesDatum]) -> Vec<SeriesDatum> {
        self.active_set().filter(series)
    }
}

impl Default for ScopeSelector {
    fn default() -> Self {
        let table = ScopeTable::standard();
        let initial = table.default_scope().name().to_owned();
        Self::new(table, initial)
    }
}
