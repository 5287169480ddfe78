use serde_json::json;

use super::chart_config::{ChartConfig, SectionKind, merge};

const FONT_STACK: &str = "'Inter', -apple-system, BlinkMacSystemFont, sans-serif";
const APPLE_FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, \"SF Pro Text\", Inter, sans-serif";

/// Base visual theme layered under every chart's own options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    name: &'static str,
    base: ChartConfig,
}

impl ChartTheme {
    /// Dark theme used by the deep-dive chapters: visible toolbar with export
    /// filenames, muted axis labels, data labels off.
    #[must_use]
    pub fn deep_dive() -> Self {
        let base = ChartConfig::new()
            .with_section(
                SectionKind::Chart,
                json!({
                    "fontFamily": FONT_STACK,
                    "toolbar": {
                        "show": true,
                        "tools": {
                            "download": true,
                            "selection": true,
                            "zoom": true,
                            "zoomin": true,
                            "zoomout": true,
                            "pan": true,
                            "reset": true
                        },
                        "export": {
                            "csv": { "filename": "deep-dive-data" },
                            "svg": { "filename": "deep-dive-chart" },
                            "png": { "filename": "deep-dive-chart" }
                        }
                    },
                    "animations": { "enabled": true, "easing": "easeinout", "speed": 800 },
                    "background": "transparent"
                }),
            )
            .with_section(
                SectionKind::Grid,
                json!({ "borderColor": "rgba(255,255,255,0.04)", "strokeDashArray": 4 }),
            )
            .with_section(
                SectionKind::XAxis,
                json!({
                    "labels": { "style": { "colors": "#888", "fontSize": "10px" } },
                    "axisBorder": { "show": false },
                    "axisTicks": { "show": false }
                }),
            )
            .with_section(
                SectionKind::YAxis,
                json!({ "labels": { "style": { "colors": "#888", "fontSize": "10px" } } }),
            )
            .with_section(
                SectionKind::Tooltip,
                json!({ "theme": "dark", "style": { "fontSize": "12px" } }),
            )
            .with_section(SectionKind::Legend, json!({ "labels": { "colors": "#888" } }))
            .with_section(SectionKind::DataLabels, json!({ "enabled": false }));

        Self {
            name: "deep-dive",
            base,
        }
    }

    /// Light theme of the main page dashboards: toolbar hidden, grey labels.
    #[must_use]
    pub fn light() -> Self {
        let label_style = json!({ "colors": "#86868b", "fontSize": "11px", "fontWeight": 500 });
        let base = ChartConfig::new()
            .with_section(
                SectionKind::Chart,
                json!({
                    "fontFamily": APPLE_FONT_STACK,
                    "toolbar": { "show": false },
                    "animations": { "enabled": true, "easing": "easeinout", "speed": 800 }
                }),
            )
            .with_section(
                SectionKind::Grid,
                json!({ "borderColor": "rgba(0, 0, 0, 0.06)", "strokeDashArray": 4 }),
            )
            .with_section(
                SectionKind::XAxis,
                json!({
                    "labels": { "style": label_style.clone() },
                    "axisBorder": { "show": false },
                    "axisTicks": { "show": false }
                }),
            )
            .with_section(SectionKind::YAxis, json!({ "labels": { "style": label_style } }))
            .with_section(
                SectionKind::Tooltip,
                json!({ "theme": "light", "style": { "fontSize": "12px" } }),
            )
            .with_section(SectionKind::Legend, json!({ "labels": { "colors": "#86868b" } }))
            .with_section(SectionKind::DataLabels, json!({ "enabled": false }));

        Self {
            name: "light",
            base,
        }
    }

    /// Wraps an arbitrary base config, e.g. one loaded from JSON.
    #[must_use]
    pub fn custom(name: &'static str, base: ChartConfig) -> Self {
        Self { name, base }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn base(&self) -> &ChartConfig {
        &self.base
    }

    /// Full chart config: the theme with `overrides` layered on top.
    #[must_use]
    pub fn config(&self, overrides: &ChartConfig) -> ChartConfig {
        merge(&self.base, overrides)
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::deep_dive()
    }
}
