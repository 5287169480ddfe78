use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{ChartConfig, DatasetTag, NodeId, TargetId};
use crate::error::ChartResult;
use crate::platform::Document;
use crate::render::{ChartBackend, ChartInstance};

/// Result of a registry creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateOutcome {
    /// A new chart was constructed for a previously unbound target.
    Created,
    /// The previous chart was destroyed and a new one bound in its place.
    Replaced,
    /// `create_once` found an existing binding and left it untouched.
    AlreadyBound,
    /// The document has no node for the target; nothing changed.
    MissingTarget,
    /// The backend could not construct or render the chart; the target is
    /// left unbound.
    BackendFailed,
}

impl CreateOutcome {
    /// Whether a live chart is bound to the target after the call.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        matches!(self, Self::Created | Self::Replaced | Self::AlreadyBound)
    }
}

#[derive(Debug)]
struct Binding<C> {
    chart: C,
    dataset: Option<DatasetTag>,
    hidden_series: BTreeSet<String>,
}

/// Read-only view of one binding, used by snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSummary {
    pub target: TargetId,
    pub dataset: Option<DatasetTag>,
    pub hidden_series: Vec<String>,
}

/// Owns the mapping from mount target to live chart.
///
/// At most one chart is bound to a target at any time. Every mutation
/// completes within the call that starts it.
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    bindings: IndexMap<TargetId, Binding<B::Chart>>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: IndexMap::new(),
        }
    }

    /// Constructs and renders a chart unless `target` is already bound.
    ///
    /// An existing binding is neither reconfigured nor destroyed.
    pub fn create_once(
        &mut self,
        document: &dyn Document,
        target: &TargetId,
        config: &ChartConfig,
    ) -> CreateOutcome {
        if self.bindings.contains_key(target) {
            debug!(%target, "chart already bound; create_once is a no-op");
            return CreateOutcome::AlreadyBound;
        }
        let Some(node) = document.query_one(target.as_str()) else {
            debug!(%target, "mount target absent; chart skipped");
            return CreateOutcome::MissingTarget;
        };

        match self.build(node, target, config) {
            Ok(chart) => {
                self.bindings.insert(
                    target.clone(),
                    Binding {
                        chart,
                        dataset: None,
                        hidden_series: BTreeSet::new(),
                    },
                );
                info!(%target, "chart created");
                CreateOutcome::Created
            }
            Err(err) => {
                warn!(%target, error = %err, "chart construction failed");
                CreateOutcome::BackendFailed
            }
        }
    }

    /// Destroys any chart bound to `target`, then constructs a fresh one.
    ///
    /// A supplied `dataset` replaces the recorded tag; `None` keeps the tag
    /// of the previous binding. A missing mount target leaves the current
    /// binding alive.
    pub fn create_or_replace(
        &mut self,
        document: &dyn Document,
        target: &TargetId,
        config: &ChartConfig,
        dataset: Option<DatasetTag>,
    ) -> CreateOutcome {
        let Some(node) = document.query_one(target.as_str()) else {
            debug!(%target, "mount target absent; chart skipped");
            return CreateOutcome::MissingTarget;
        };

        let previous = self.bindings.shift_remove(target);
        let replaced = previous.is_some();
        let dataset = match previous {
            Some(mut binding) => {
                binding.chart.destroy();
                dataset.or(binding.dataset)
            }
            None => dataset,
        };

        match self.build(node, target, config) {
            Ok(chart) => {
                self.bindings.insert(
                    target.clone(),
                    Binding {
                        chart,
                        dataset,
                        hidden_series: BTreeSet::new(),
                    },
                );
                if replaced {
                    info!(%target, "chart replaced");
                    CreateOutcome::Replaced
                } else {
                    info!(%target, "chart created");
                    CreateOutcome::Created
                }
            }
            Err(err) => {
                warn!(%target, error = %err, replaced, "chart construction failed");
                CreateOutcome::BackendFailed
            }
        }
    }

    fn build(
        &mut self,
        node: NodeId,
        target: &TargetId,
        config: &ChartConfig,
    ) -> ChartResult<B::Chart> {
        let mut chart = self.backend.construct(node, target, config)?;
        if let Err(err) = chart.render() {
            chart.destroy();
            return Err(err);
        }
        Ok(chart)
    }

    #[must_use]
    pub fn get(&self, target: &TargetId) -> Option<&B::Chart> {
        self.bindings.get(target).map(|binding| &binding.chart)
    }

    #[must_use]
    pub fn get_mut(&mut self, target: &TargetId) -> Option<&mut B::Chart> {
        self.bindings
            .get_mut(target)
            .map(|binding| &mut binding.chart)
    }

    #[must_use]
    pub fn dataset(&self, target: &TargetId) -> Option<&DatasetTag> {
        self.bindings
            .get(target)
            .and_then(|binding| binding.dataset.as_ref())
    }

    #[must_use]
    pub fn is_bound(&self, target: &TargetId) -> bool {
        self.bindings.contains_key(target)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound targets in binding order.
    pub fn targets(&self) -> impl Iterator<Item = &TargetId> {
        self.bindings.keys()
    }

    /// Targets whose recorded dataset tag equals `tag`.
    pub fn targets_with_dataset<'a>(
        &'a self,
        tag: &'a DatasetTag,
    ) -> impl Iterator<Item = &'a TargetId> + 'a {
        self.bindings
            .iter()
            .filter(move |(_, binding)| binding.dataset.as_ref() == Some(tag))
            .map(|(target, _)| target)
    }

    /// Flips one series between shown and hidden on the chart bound to
    /// `target`. Returns the new visibility, or `None` when nothing is bound.
    pub fn toggle_series(&mut self, target: &TargetId, series_name: &str) -> Option<bool> {
        let binding = self.bindings.get_mut(target)?;
        let visible = if binding.hidden_series.remove(series_name) {
            binding.chart.show_series(series_name);
            true
        } else {
            binding.hidden_series.insert(series_name.to_owned());
            binding.chart.hide_series(series_name);
            false
        };
        debug!(%target, series = series_name, visible, "series toggled");
        Some(visible)
    }

    /// Visibility of a series on a bound chart; series start out visible.
    #[must_use]
    pub fn is_series_visible(&self, target: &TargetId, series_name: &str) -> Option<bool> {
        self.bindings
            .get(target)
            .map(|binding| !binding.hidden_series.contains(series_name))
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<BindingSummary> {
        self.bindings
            .iter()
            .map(|(target, binding)| BindingSummary {
                target: target.clone(),
                dataset: binding.dataset.clone(),
                hidden_series: binding.hidden_series.iter().cloned().collect(),
            })
            .collect()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
