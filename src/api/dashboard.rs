use indexmap::IndexMap;
use tracing::info;

use crate::core::SectionId;

/// Expandable dashboard panels. At most one panel is expanded at a time.
#[derive(Debug, Clone, Default)]
pub struct DashboardSet {
    panels: IndexMap<String, bool>,
}

impl DashboardSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Section id under which a panel's charts are initialized.
    #[must_use]
    pub fn section_id(panel: &str) -> SectionId {
        SectionId::new(format!("dashboard:{panel}"))
    }

    /// Selector of the element that toggles `panel`.
    #[must_use]
    pub fn toggle_selector(panel: &str) -> String {
        format!("[data-dashboard=\"{panel}\"]")
    }

    /// Selector of the container that holds `panel`'s charts.
    #[must_use]
    pub fn container_selector(panel: &str) -> String {
        format!("#{panel}-dashboard")
    }

    pub fn add(&mut self, panel: impl Into<String>) -> bool {
        let panel = panel.into();
        if self.panels.contains_key(&panel) {
            return false;
        }
        self.panels.insert(panel, false);
        true
    }

    #[must_use]
    pub fn contains(&self, panel: &str) -> bool {
        self.panels.contains_key(panel)
    }

    #[must_use]
    pub fn is_expanded(&self, panel: &str) -> bool {
        self.panels.get(panel).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|(_, expanded)| **expanded)
            .map(|(panel, _)| panel.as_str())
    }

    /// Expands `panel`, collapsing any other. Returns the collapsed panels,
    /// or `None` for an unknown panel.
    pub fn open(&mut self, panel: &str) -> Option<Vec<String>> {
        if !self.panels.contains_key(panel) {
            return None;
        }
        let mut collapsed = Vec::new();
        for (name, expanded) in &mut self.panels {
            if name == panel {
                *expanded = true;
            } else if *expanded {
                *expanded = false;
                collapsed.push(name.clone());
            }
        }
        info!(panel, collapsed = collapsed.len(), "dashboard opened");
        Some(collapsed)
    }

    /// Returns `true` when the panel was expanded.
    pub fn close(&mut self, panel: &str) -> bool {
        match self.panels.get_mut(panel) {
            Some(expanded) if *expanded => {
                *expanded = false;
                info!(panel, "dashboard closed");
                true
            }
            _ => false,
        }
    }

    /// Collapses whatever is expanded (Escape key).
    pub fn close_all(&mut self) -> Vec<String> {
        let mut collapsed = Vec::new();
        for (name, expanded) in &mut self.panels {
            if *expanded {
                *expanded = false;
                collapsed.push(name.clone());
            }
        }
        collapsed
    }
}
