use std::time::Duration;

use tracing::debug;

use crate::core::{ChartConfig, ChartTheme, DatasetTag, SeriesDatum, TargetId};
use crate::platform::Document;
use crate::render::ChartBackend;

use super::{ChartRegistry, CreateOutcome, KpiBoard, ScopeSelector};

/// Page state handed to section initializers and event listeners.
///
/// Owned by the [`PageController`](super::PageController); nothing here is
/// global.
pub struct ChartStage<B: ChartBackend> {
    pub(super) registry: ChartRegistry<B>,
    pub(super) document: Box<dyn Document>,
    pub(super) theme: ChartTheme,
    pub(super) scope: ScopeSelector,
    pub(super) kpis: KpiBoard,
    pub(super) now: Duration,
}

impl<B: ChartBackend> ChartStage<B> {
    /// Themes `overrides` and binds the chart unless `target` already has one.
    pub fn render_once(
        &mut self,
        target: impl Into<TargetId>,
        overrides: &ChartConfig,
    ) -> CreateOutcome {
        let target = target.into();
        let config = self.theme.config(overrides);
        self.registry
            .create_once(self.document.as_ref(), &target, &config)
    }

    /// Themes `overrides` and (re)binds a fresh chart to `target`.
    pub fn render_fresh(
        &mut self,
        target: impl Into<TargetId>,
        overrides: &ChartConfig,
        dataset: Option<DatasetTag>,
    ) -> CreateOutcome {
        let target = target.into();
        let config = self.theme.config(overrides);
        self.registry
            .create_or_replace(self.document.as_ref(), &target, &config, dataset)
    }

    /// Re-renders `target` with the series visible under the active scope.
    ///
    /// `overrides` carries the chart-specific options; the scoped `series`
    /// and `colors` keys are layered on top of it.
    pub fn render_scoped(
        &mut self,
        target: impl Into<TargetId>,
        overrides: &ChartConfig,
        series: &[SeriesDatum],
        dataset: Option<DatasetTag>,
    ) -> CreateOutcome {
        let target = target.into();
        let scoped = self.scope.active_set().series_overrides(series);
        debug!(
            %target,
            scope = self.scope.active(),
            total = series.len(),
            "rendering scoped series"
        );
        let config = self.theme.config(&overrides.merged_with(&scoped));
        self.registry
            .create_or_replace(self.document.as_ref(), &target, &config, dataset)
    }

    /// Flips a series on the chart bound to `target`.
    pub fn toggle_series(&mut self, target: &TargetId, series_name: &str) -> Option<bool> {
        self.registry.toggle_series(target, series_name)
    }

    #[must_use]
    pub fn registry(&self) -> &ChartRegistry<B> {
        &self.registry
    }

    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    #[must_use]
    pub fn scope(&self) -> &ScopeSelector {
        &self.scope
    }

    #[must_use]
    pub fn kpis(&self) -> &KpiBoard {
        &self.kpis
    }

    pub fn kpis_mut(&mut self) -> &mut KpiBoard {
        &mut self.kpis
    }

    #[must_use]
    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    /// Page clock at the current callback turn.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }
}
