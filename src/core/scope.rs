use indexmap::IndexMap;
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

use super::chart_config::ChartConfig;
use super::series::{EntityCatalog, EntityCode, SeriesDatum};

pub const DEFAULT_SCOPE: &str = "all";

/// Ordered entity codes selected by one scope name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSet {
    name: String,
    entities: SmallVec<[EntityCode; 8]>,
}

impl ScopeSet {
    #[must_use]
    pub fn new<I, E>(name: impl Into<String>, entities: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<EntityCode>,
    {
        Self {
            name: name.into(),
            entities: entities.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityCode] {
        &self.entities
    }

    #[must_use]
    pub fn contains(&self, entity: &EntityCode) -> bool {
        self.entities.contains(entity)
    }

    #[must_use]
    pub fn is_subset_of(&self, other: &ScopeSet) -> bool {
        self.entities.iter().all(|entity| other.contains(entity))
    }

    /// Series whose entity belongs to this scope, in input order.
    #[must_use]
    pub fn filter(&self, series: &[SeriesDatum]) -> Vec<SeriesDatum> {
        series
            .iter()
            .filter(|datum| self.contains(&datum.entity))
            .cloned()
            .collect()
    }

    /// Chart overrides carrying the scoped `series` and their matching `colors`.
    #[must_use]
    pub fn series_overrides(&self, series: &[SeriesDatum]) -> ChartConfig {
        let visible = self.filter(series);
        let entries = visible.iter().map(SeriesDatum::to_series_entry).collect();
        let colors = visible
            .iter()
            .map(|datum| Value::from(EntityCatalog::color(&datum.entity)))
            .collect();
        ChartConfig::new()
            .with("series", Value::Array(entries))
            .with("colors", Value::Array(colors))
    }
}

/// Lookup table from scope name to entity set, with a designated fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTable {
    scopes: IndexMap<String, ScopeSet>,
    default_scope: String,
}

impl ScopeTable {
    /// Builds a table; the default scope must be one of `scopes`.
    pub fn new(scopes: Vec<ScopeSet>, default_scope: impl Into<String>) -> ChartResult<Self> {
        let default_scope = default_scope.into();
        let scopes: IndexMap<String, ScopeSet> = scopes
            .into_iter()
            .map(|scope| (scope.name.clone(), scope))
            .collect();
        if !scopes.contains_key(&default_scope) {
            return Err(ChartError::InvalidConfig(format!(
                "default scope `{default_scope}` is not part of the scope table"
            )));
        }
        Ok(Self {
            scopes,
            default_scope,
        })
    }

    /// spain ⊂ europe ⊂ world ⊂ all.
    #[must_use]
    pub fn standard() -> Self {
        let spain = ["ES"];
        let europe = ["ES", "FR", "DE", "UK", "IT"];
        let world = ["ES", "FR", "DE", "UK", "IT", "US", "JP"];
        let all = ["ES", "FR", "DE", "UK", "IT", "US", "JP", "World"];
        let scopes = [
            ScopeSet::new("spain", spain),
            ScopeSet::new("europe", europe),
            ScopeSet::new("world", world),
            ScopeSet::new(DEFAULT_SCOPE, all),
        ];
        Self {
            scopes: scopes
                .into_iter()
                .map(|scope| (scope.name.clone(), scope))
                .collect(),
            default_scope: DEFAULT_SCOPE.to_owned(),
        }
    }

    #[must_use]
    pub fn default_scope(&self) -> &ScopeSet {
        &self.scopes[&self.default_scope]
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// Entity set for `name`, falling back to the default scope.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &ScopeSet {
        self.scopes
            .get(name)
            .unwrap_or_else(|| self.default_scope())
    }

    pub fn scopes(&self) -> impl Iterator<Item = &ScopeSet> {
        self.scopes.values()
    }

    #[must_use]
    pub fn filter_by_scope(&self, series: &[SeriesDatum], scope: &str) -> Vec<SeriesDatum> {
        self.resolve(scope).filter(series)
    }

    /// Scoped `series` and `colors` overrides for `scope`, with fallback.
    #[must_use]
    pub fn series_overrides(&self, series: &[SeriesDatum], scope: &str) -> ChartConfig {
        self.resolve(scope).series_overrides(series)
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Filters `series` by a scope of the standard table.
#[must_use]
pub fn filter_by_scope(series: &[SeriesDatum], scope: &str) -> Vec<SeriesDatum> {
    ScopeTable::standard().filter_by_scope(series, scope)
}
