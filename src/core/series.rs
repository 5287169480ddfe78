use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Entity code a series is tagged with (`ES`, `FR`, ..., `World`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCode(String);

impl EntityCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A labeled data series owned by one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDatum {
    pub entity: EntityCode,
    pub name: String,
    pub data: Vec<f64>,
}

impl SeriesDatum {
    #[must_use]
    pub fn new(entity: impl Into<EntityCode>, name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            entity: entity.into(),
            name: name.into(),
            data,
        }
    }

    /// Series named after the entity's display name.
    #[must_use]
    pub fn for_entity(entity: impl Into<EntityCode>, data: Vec<f64>) -> Self {
        let entity = entity.into();
        let name = EntityCatalog::name(&entity).to_owned();
        Self { entity, name, data }
    }

    /// Series entry in the shape the rendering library expects.
    #[must_use]
    pub fn to_series_entry(&self) -> Value {
        json!({ "name": self.name, "data": self.data })
    }
}

const FALLBACK_COLOR: &str = "#86868b";

const ENTITIES: [(&str, &str, &str); 10] = [
    ("ES", "Spain", "#ff3b30"),
    ("FR", "France", "#0071e3"),
    ("DE", "Germany", "#ff9500"),
    ("UK", "United Kingdom", "#5856d6"),
    ("IT", "Italy", "#34c759"),
    ("US", "United States", "#c77dff"),
    ("JP", "Japan", "#ff6b6b"),
    ("PT", "Portugal", "#5eb0ff"),
    ("GR", "Greece", "#86868b"),
    ("World", "World", "#888"),
];

/// Display names and series colors of the tracked entities.
pub struct EntityCatalog;

impl EntityCatalog {
    #[must_use]
    pub fn is_known(code: &EntityCode) -> bool {
        ENTITIES.iter().any(|(known, _, _)| *known == code.as_str())
    }

    /// Display name, or the code itself for untracked entities.
    #[must_use]
    pub fn name(code: &EntityCode) -> &str {
        ENTITIES
            .iter()
            .find(|(known, _, _)| *known == code.as_str())
            .map_or(code.as_str(), |(_, name, _)| *name)
    }

    #[must_use]
    pub fn color(code: &EntityCode) -> &'static str {
        ENTITIES
            .iter()
            .find(|(known, _, _)| *known == code.as_str())
            .map_or(FALLBACK_COLOR, |(_, _, color)| *color)
    }

    pub fn codes() -> impl Iterator<Item = EntityCode> {
        ENTITIES.iter().map(|(code, _, _)| EntityCode::new(*code))
    }
}
