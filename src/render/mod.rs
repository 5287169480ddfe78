mod headless_backend;

pub use headless_backend::{BackendEvent, HeadlessBackend, HeadlessChart, HeadlessLog};

use crate::core::{ChartConfig, NodeId, TargetId};
use crate::error::ChartResult;

/// A live chart owned by the rendering library.
pub trait ChartInstance {
    /// Draws the chart into its mount node.
    fn render(&mut self) -> ChartResult<()>;

    /// Releases the chart's rendering resources. Called exactly once before
    /// the instance is dropped by the registry.
    fn destroy(&mut self);

    fn show_series(&mut self, series_name: &str);

    fn hide_series(&mut self, series_name: &str);
}

/// Contract implemented by the charting library binding.
///
/// Construction is synchronous and side-effecting on the host document;
/// the registry owns the returned instance.
pub trait ChartBackend {
    type Chart: ChartInstance;

    fn construct(
        &mut self,
        node: NodeId,
        target: &TargetId,
        config: &ChartConfig,
    ) -> ChartResult<Self::Chart>;
}
