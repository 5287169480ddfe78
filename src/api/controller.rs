use std::time::Duration;

use tracing::{debug, info};

use crate::core::{ChartTheme, KpiCounter, ScopeTable, SectionId, TargetId};
use crate::error::ChartResult;
use crate::platform::{Document, TriggerEvent, TriggerHost};
use crate::render::ChartBackend;

use super::{
    ChartRegistry, ChartStage, DashboardSet, EventBus, KpiBoard, KpiFrame, LazyTriggerScheduler,
    ListenerId, PageConfig, PageEvent, PageEventKind, PageListener, RegisterOutcome,
    ScopeSelector, SectionSpec, StageSnapshot,
};

/// Single top-level owner of a page's chart state.
///
/// Host callbacks (trigger crossings, timer ticks, clicks) enter through
/// this type; each call runs to completion before the next.
pub struct PageController<B: ChartBackend> {
    config: PageConfig,
    stage: ChartStage<B>,
    scheduler: LazyTriggerScheduler<ChartStage<B>>,
    bus: EventBus<ChartStage<B>>,
    triggers: Box<dyn TriggerHost>,
    dashboards: DashboardSet,
}

impl<B: ChartBackend + 'static> PageController<B> {
    pub fn new(
        config: PageConfig,
        backend: B,
        document: Box<dyn Document>,
        triggers: Box<dyn TriggerHost>,
    ) -> ChartResult<Self> {
        Self::with_theme(config, ChartTheme::deep_dive(), backend, document, triggers)
    }

    pub fn with_theme(
        config: PageConfig,
        theme: ChartTheme,
        backend: B,
        document: Box<dyn Document>,
        triggers: Box<dyn TriggerHost>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let table = ScopeTable::standard();
        let scope = ScopeSelector::new(table, config.default_scope.clone());
        let kpis = KpiBoard::new(config.thousands_separator.clone());
        info!(
            theme = theme.name(),
            scope = scope.active(),
            settle_ms = config.section_settle_delay_ms,
            "page controller initialized"
        );

        Ok(Self {
            stage: ChartStage {
                registry: ChartRegistry::new(backend),
                document,
                theme,
                scope,
                kpis,
                now: Duration::ZERO,
            },
            config,
            scheduler: LazyTriggerScheduler::new(),
            bus: EventBus::new(),
            triggers,
            dashboards: DashboardSet::new(),
        })
    }

    /// Registers a section with an explicit spec.
    pub fn register_section<F>(&mut self, spec: SectionSpec, init: F) -> RegisterOutcome
    where
        F: FnOnce(&mut ChartStage<B>) + 'static,
    {
        self.scheduler.register(
            spec,
            Box::new(init),
            self.stage.document.as_ref(),
            self.triggers.as_mut(),
        )
    }

    /// Registers a scroll-revealed chapter using the page's default
    /// threshold and settle delay.
    pub fn register_chapter<F>(
        &mut self,
        id: impl Into<SectionId>,
        trigger: impl Into<TargetId>,
        init: F,
    ) -> RegisterOutcome
    where
        F: FnOnce(&mut ChartStage<B>) + 'static,
    {
        let spec = SectionSpec::scroll(id, trigger, self.config.default_trigger_start)
            .with_settle_delay(self.config.section_settle_delay());
        self.register_section(spec, init)
    }

    /// Registers an expandable dashboard whose charts are built the first
    /// time it opens. Panels missing their toggle or container are skipped.
    pub fn register_dashboard<F>(&mut self, panel: &str, init: F) -> RegisterOutcome
    where
        F: FnOnce(&mut ChartStage<B>) + 'static,
    {
        let document = self.stage.document.as_ref();
        let toggle = DashboardSet::toggle_selector(panel);
        let container = DashboardSet::container_selector(panel);
        if document.query_one(&toggle).is_none() || document.query_one(&container).is_none() {
            debug!(panel, "dashboard toggle or container absent; not registered");
            return RegisterOutcome::Skipped;
        }
        if !self.dashboards.add(panel) {
            return RegisterOutcome::Duplicate;
        }
        let spec = SectionSpec::manual(DashboardSet::section_id(panel))
            .with_settle_delay(self.config.dashboard_init_delay());
        self.register_section(spec, init)
    }

    /// Registers a KPI card that starts counting when `trigger` scrolls into view.
    pub fn register_kpi(
        &mut self,
        id: &str,
        trigger: impl Into<TargetId>,
        counter: KpiCounter,
    ) -> RegisterOutcome {
        if !self.stage.kpis.add(id, counter) {
            return RegisterOutcome::Duplicate;
        }
        let kpi = id.to_owned();
        let spec = SectionSpec::scroll(
            SectionId::new(format!("kpi:{id}")),
            trigger,
            self.config.default_trigger_start,
        );
        self.register_section(spec, move |stage: &mut ChartStage<B>| {
            let now = stage.now;
            stage.kpis.start(&kpi, now);
        })
    }

    pub fn subscribe(&mut self, listener: Box<dyn PageListener<ChartStage<B>>>) -> ListenerId {
        self.bus.subscribe(listener)
    }

    pub fn subscribe_to(
        &mut self,
        kind: PageEventKind,
        listener: Box<dyn PageListener<ChartStage<B>>>,
    ) -> ListenerId {
        self.bus.subscribe_to(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Handles one crossing reported by the trigger host.
    pub fn on_trigger(&mut self, event: TriggerEvent, now: Duration) -> Option<SectionId> {
        self.stage.now = now;
        let section = self
            .scheduler
            .on_trigger(event, now, self.triggers.as_mut())?;
        self.publish(PageEvent::SectionVisible {
            section: section.clone(),
        });
        Some(section)
    }

    /// Handles a batch of crossings, e.g. everything one fast scroll produced.
    pub fn on_triggers(
        &mut self,
        events: impl IntoIterator<Item = TriggerEvent>,
        now: Duration,
    ) -> Vec<SectionId> {
        events
            .into_iter()
            .filter_map(|event| self.on_trigger(event, now))
            .collect()
    }

    /// Fires a section by id regardless of scroll position.
    pub fn trigger_section(&mut self, section: &SectionId, now: Duration) -> bool {
        self.stage.now = now;
        let fired = self
            .scheduler
            .trigger_section(section, now, self.triggers.as_mut());
        if fired {
            self.publish(PageEvent::SectionVisible {
                section: section.clone(),
            });
        }
        fired
    }

    /// Advances the page clock and runs every initializer whose settle
    /// delay has elapsed. Returns how many ran.
    pub fn advance(&mut self, now: Duration) -> usize {
        self.stage.now = now;
        self.scheduler.run_due(now, &mut self.stage)
    }

    /// Selects a scope and notifies listeners when it actually changed.
    pub fn select_scope(&mut self, scope: &str) -> bool {
        let Some(change) = self.stage.scope.select(scope) else {
            return false;
        };
        self.publish(PageEvent::ScopeChanged {
            scope: change.scope,
            entities: change.entities,
        });
        true
    }

    /// Opens `panel` (collapsing the others) or closes it when already open.
    /// Returns the panel's new expanded state, `None` for unknown panels.
    pub fn toggle_dashboard(&mut self, panel: &str, now: Duration) -> Option<bool> {
        if !self.dashboards.contains(panel) {
            return None;
        }
        if self.dashboards.is_expanded(panel) {
            self.dashboards.close(panel);
            Some(false)
        } else {
            self.open_dashboard(panel, now);
            Some(true)
        }
    }

    pub fn open_dashboard(&mut self, panel: &str, now: Duration) -> bool {
        if self.dashboards.open(panel).is_none() {
            return false;
        }
        let section = DashboardSet::section_id(panel);
        if !self.trigger_section(&section, now) {
            debug!(panel, "dashboard charts already initialized");
        }
        true
    }

    pub fn close_dashboard(&mut self, panel: &str) -> bool {
        self.dashboards.close(panel)
    }

    /// Collapses the expanded dashboard, if any.
    pub fn close_all_dashboards(&mut self) -> Vec<String> {
        self.dashboards.close_all()
    }

    pub fn toggle_series(&mut self, target: &TargetId, series_name: &str) -> Option<bool> {
        self.stage.toggle_series(target, series_name)
    }

    #[must_use]
    pub fn kpi_frame(&self, now: Duration) -> Vec<KpiFrame> {
        self.stage.kpis.frame(now)
    }

    #[must_use]
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot::capture(&self.stage, &self.scheduler, &self.dashboards)
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn stage(&self) -> &ChartStage<B> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut ChartStage<B> {
        &mut self.stage
    }

    #[must_use]
    pub fn scheduler(&self) -> &LazyTriggerScheduler<ChartStage<B>> {
        &self.scheduler
    }

    #[must_use]
    pub fn dashboards(&self) -> &DashboardSet {
        &self.dashboards
    }

    fn publish(&mut self, event: PageEvent) {
        let delivered = self.bus.publish(&event, &mut self.stage);
        debug!(kind = ?event.kind(), delivered, "page event published");
    }
}
