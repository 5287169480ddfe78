pub mod chart_config;
pub mod kpi;
pub mod scope;
pub mod series;
pub mod theme;
pub mod trigger;
pub mod types;

pub use chart_config::{ChartConfig, SectionKind, merge};
pub use kpi::{KPI_COUNTER_DURATION, KpiCounter, ease_out_cubic};
pub use scope::{DEFAULT_SCOPE, ScopeSet, ScopeTable, filter_by_scope};
pub use series::{EntityCatalog, EntityCode, SeriesDatum};
pub use theme::ChartTheme;
pub use trigger::{ElementEdge, ElementRect, TriggerStart};
pub use types::{DatasetTag, NodeId, SectionId, TargetId};
