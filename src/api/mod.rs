//! Stateful page components: chart registry, lazy section scheduler, scope
//! selection and the controller that owns them.

mod controller;
mod dashboard;
mod events;
mod json_contract;
mod kpi_board;
mod page_config;
mod registry;
mod scheduler;
mod scope_selector;
mod stage;

pub use controller::PageController;
pub use dashboard::DashboardSet;
pub use events::{EventBus, ListenerId, PageEvent, PageEventKind, PageListener};
pub use json_contract::{
    STAGE_SNAPSHOT_JSON_SCHEMA_V1, SectionSnapshot, StageSnapshot, StageSnapshotJsonContractV1,
};
pub use kpi_board::{KpiBoard, KpiFrame};
pub use page_config::PageConfig;
pub use registry::{BindingSummary, ChartRegistry, CreateOutcome};
pub use scheduler::{
    LazyTriggerScheduler, ReadyInit, RegisterOutcome, SectionInit, SectionSpec, SectionState,
    SectionTrigger,
};
pub use scope_selector::{ScopeChange, ScopeSelector};
pub use stage::ChartStage;
