use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::core::{ChartConfig, NodeId, TargetId};
use crate::error::{ChartError, ChartResult};

use super::{ChartBackend, ChartInstance};

/// Observable side effect of the headless backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    Constructed { chart: u64, target: TargetId },
    Rendered { chart: u64 },
    Destroyed { chart: u64 },
    SeriesShown { chart: u64, series: String },
    SeriesHidden { chart: u64, series: String },
}

/// Shared record of everything the headless backend did.
#[derive(Debug, Default)]
pub struct HeadlessLog {
    pub events: Vec<BackendEvent>,
    pub constructed: usize,
    pub destroyed: usize,
    next_chart: u64,
}

impl HeadlessLog {
    #[must_use]
    pub fn live_charts(&self) -> usize {
        self.constructed - self.destroyed
    }
}

/// No-op backend used by tests and headless page runs.
///
/// Clones share one log so a test can keep a handle while the registry owns
/// the backend.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    log: Rc<RefCell<HeadlessLog>>,
    failing_targets: Rc<RefCell<BTreeSet<TargetId>>>,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later construction for `target` fail.
    pub fn fail_target(&self, target: impl Into<TargetId>) {
        self.failing_targets.borrow_mut().insert(target.into());
    }

    #[must_use]
    pub fn constructed(&self) -> usize {
        self.log.borrow().constructed
    }

    #[must_use]
    pub fn destroyed(&self) -> usize {
        self.log.borrow().destroyed
    }

    #[must_use]
    pub fn live_charts(&self) -> usize {
        self.log.borrow().live_charts()
    }

    #[must_use]
    pub fn events(&self) -> Vec<BackendEvent> {
        self.log.borrow().events.clone()
    }
}

impl ChartBackend for HeadlessBackend {
    type Chart = HeadlessChart;

    fn construct(
        &mut self,
        node: NodeId,
        target: &TargetId,
        config: &ChartConfig,
    ) -> ChartResult<HeadlessChart> {
        if self.failing_targets.borrow().contains(target) {
            return Err(ChartError::Backend {
                target: target.to_string(),
                reason: "construction rejected by headless backend".to_owned(),
            });
        }

        let mut log = self.log.borrow_mut();
        let id = log.next_chart;
        log.next_chart += 1;
        log.constructed += 1;
        log.events.push(BackendEvent::Constructed {
            chart: id,
            target: target.clone(),
        });

        Ok(HeadlessChart {
            id,
            node,
            config: config.clone(),
            rendered: false,
            destroyed: false,
            hidden_series: BTreeSet::new(),
            log: Rc::clone(&self.log),
        })
    }
}

/// Chart instance produced by [`HeadlessBackend`].
#[derive(Debug)]
pub struct HeadlessChart {
    id: u64,
    node: NodeId,
    config: ChartConfig,
    rendered: bool,
    destroyed: bool,
    hidden_series: BTreeSet<String>,
    log: Rc<RefCell<HeadlessLog>>,
}

impl HeadlessChart {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn is_series_hidden(&self, series_name: &str) -> bool {
        self.hidden_series.contains(series_name)
    }

    fn record(&self, event: BackendEvent) {
        self.log.borrow_mut().events.push(event);
    }
}

impl ChartInstance for HeadlessChart {
    fn render(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::InvalidData(format!(
                "chart {} rendered after destroy",
                self.id
            )));
        }
        self.rendered = true;
        self.record(BackendEvent::Rendered { chart: self.id });
        Ok(())
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let mut log = self.log.borrow_mut();
        log.destroyed += 1;
        log.events.push(BackendEvent::Destroyed { chart: self.id });
    }

    fn show_series(&mut self, series_name: &str) {
        self.hidden_series.remove(series_name);
        self.record(BackendEvent::SeriesShown {
            chart: self.id,
            series: series_name.to_owned(),
        });
    }

    fn hide_series(&mut self, series_name: &str) {
        self.hidden_series.insert(series_name.to_owned());
        self.record(BackendEvent::SeriesHidden {
            chart: self.id,
            series: series_name.to_owned(),
        });
    }
}
