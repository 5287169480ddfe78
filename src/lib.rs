//! chapter-charts: chart configuration and lazy initialization for
//! scroll-driven data pages.
//!
//! The crate merges per-chart options over a shared theme, binds charts to
//! mount targets at most once (or replaces them on demand), defers each
//! chapter's chart construction until it scrolls into view, and re-slices
//! series by a selected geographic scope. The browser, the charting library
//! and the scroll-trigger facility are reached through the traits in
//! [`render`] and [`platform`].

pub mod api;
pub mod core;
pub mod error;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{ChartRegistry, LazyTriggerScheduler, PageConfig, PageController};
pub use core::{ChartConfig, merge};
pub use error::{ChartError, ChartResult};
