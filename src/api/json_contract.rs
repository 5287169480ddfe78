use serde::{Deserialize, Serialize};

use crate::core::SectionId;
use crate::error::{ChartError, ChartResult};
use crate::render::ChartBackend;

use super::{BindingSummary, ChartStage, DashboardSet, LazyTriggerScheduler, SectionState};

pub const STAGE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    pub id: SectionId,
    pub state: SectionState,
    pub pending: bool,
}

/// Point-in-time view of a page's chart state, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub active_scope: String,
    pub charts: Vec<BindingSummary>,
    pub sections: Vec<SectionSnapshot>,
    #[serde(default)]
    pub expanded_dashboard: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StageSnapshot,
}

impl StageSnapshot {
    #[must_use]
    pub fn capture<B: ChartBackend>(
        stage: &ChartStage<B>,
        scheduler: &LazyTriggerScheduler<ChartStage<B>>,
        dashboards: &DashboardSet,
    ) -> Self {
        Self {
            active_scope: stage.scope().active().to_owned(),
            charts: stage.registry().summaries(),
            sections: scheduler
                .sections()
                .map(|(id, state)| SectionSnapshot {
                    id: id.clone(),
                    state,
                    pending: scheduler.is_pending(id),
                })
                .collect(),
            expanded_dashboard: dashboards.expanded().map(str::to_owned),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = StageSnapshotJsonContractV1 {
            schema_version: STAGE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<StageSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: StageSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != STAGE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidConfig(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
