//! Host collaborators: the document the charts mount into and the
//! scroll-trigger facility that reports threshold crossings.
//!
//! Real pages bind these to the browser; the headless implementations drive
//! the same contracts from tests and offline runs.

mod headless;

pub use headless::{HeadlessDocument, HeadlessTriggerHost};

use serde::{Deserialize, Serialize};

use crate::core::{NodeId, TriggerStart};

/// Read-only node lookup.
pub trait Document {
    fn query_one(&self, selector: &str) -> Option<NodeId>;
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
}

/// Handle returned by [`TriggerHost::register_trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerHandle(pub u64);

/// Scroll direction in which a trigger became active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerDirection {
    Enter,
    EnterBack,
}

/// Crossing reported by the host. Hosts may report the same trigger many
/// times; callers decide what "once" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub handle: TriggerHandle,
    pub direction: TriggerDirection,
}

impl TriggerEvent {
    #[must_use]
    pub fn enter(handle: TriggerHandle) -> Self {
        Self {
            handle,
            direction: TriggerDirection::Enter,
        }
    }

    #[must_use]
    pub fn enter_back(handle: TriggerHandle) -> Self {
        Self {
            handle,
            direction: TriggerDirection::EnterBack,
        }
    }
}

/// Visibility facility that watches nodes against a scroll threshold.
pub trait TriggerHost {
    fn register_trigger(&mut self, node: NodeId, start: TriggerStart) -> TriggerHandle;

    /// Stops watching a trigger. Unknown handles are ignored.
    fn release_trigger(&mut self, handle: TriggerHandle);
}
