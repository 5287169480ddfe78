use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_SCOPE, TriggerStart};
use crate::error::{ChartError, ChartResult};

/// Page bootstrap configuration.
///
/// Serializable so a page can ship its setup as JSON next to its markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub accent_rgb: Option<String>,
    #[serde(default = "default_section_settle_delay_ms")]
    pub section_settle_delay_ms: u64,
    #[serde(default = "default_dashboard_init_delay_ms")]
    pub dashboard_init_delay_ms: u64,
    #[serde(default)]
    pub default_trigger_start: TriggerStart,
    #[serde(default = "default_scope")]
    pub default_scope: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

impl PageConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accent_color: None,
            accent_rgb: None,
            section_settle_delay_ms: default_section_settle_delay_ms(),
            dashboard_init_delay_ms: default_dashboard_init_delay_ms(),
            default_trigger_start: TriggerStart::default(),
            default_scope: default_scope(),
            thousands_separator: default_thousands_separator(),
        }
    }

    /// Sets the chapter accent color (any CSS color).
    #[must_use]
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    /// Sets the accent as an `r, g, b` triple for gradient backgrounds.
    #[must_use]
    pub fn with_accent_rgb(mut self, rgb: impl Into<String>) -> Self {
        self.accent_rgb = Some(rgb.into());
        self
    }

    #[must_use]
    pub fn with_section_settle_delay(mut self, delay: Duration) -> Self {
        self.section_settle_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_dashboard_init_delay(mut self, delay: Duration) -> Self {
        self.dashboard_init_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_default_trigger_start(mut self, start: TriggerStart) -> Self {
        self.default_trigger_start = start;
        self
    }

    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    #[must_use]
    pub fn with_thousands_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousands_separator = separator.into();
        self
    }

    #[must_use]
    pub fn section_settle_delay(&self) -> Duration {
        Duration::from_millis(self.section_settle_delay_ms)
    }

    #[must_use]
    pub fn dashboard_init_delay(&self) -> Duration {
        Duration::from_millis(self.dashboard_init_delay_ms)
    }

    /// Rejects a programmatically built trigger start outside the viewport.
    pub fn validate(&self) -> ChartResult<()> {
        let ratio = self.default_trigger_start.viewport_ratio;
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(ChartError::InvalidTrigger {
                spec: self.default_trigger_start.to_string(),
                reason: "viewport ratio must be within 0.0..=1.0".to_owned(),
            });
        }
        Ok(())
    }

    /// CSS custom properties the page root should carry.
    #[must_use]
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let mut variables = Vec::new();
        if let Some(color) = &self.accent_color {
            variables.push(("--chapter-accent", color.clone()));
        }
        if let Some(rgb) = &self.accent_rgb {
            variables.push(("--accent-rgb", rgb.clone()));
        }
        variables
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize page config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse page config: {e}")))
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_section_settle_delay_ms() -> u64 {
    100
}

fn default_dashboard_init_delay_ms() -> u64 {
    300
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_owned()
}

fn default_thousands_separator() -> String {
    ",".to_owned()
}
