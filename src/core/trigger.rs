use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Edge of the watched element that has to reach the viewport line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementEdge {
    Top,
    Center,
    Bottom,
}

impl ElementEdge {
    fn keyword(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// Vertical placement of an element in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn edge_y(self, edge: ElementEdge) -> f64 {
        match edge {
            ElementEdge::Top => self.top,
            ElementEdge::Center => self.top + self.height / 2.0,
            ElementEdge::Bottom => self.top + self.height,
        }
    }
}

/// Scroll threshold written as `"<element edge> <viewport position>"`.
///
/// `"top 85%"` is reached once the element's top edge sits at or above the
/// line 85% down the viewport. The viewport position accepts `top`,
/// `center`, `bottom` or a percentage in `0%..=100%`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerStart {
    pub element_edge: ElementEdge,
    pub viewport_ratio: f64,
}

impl TriggerStart {
    #[must_use]
    pub const fn new(element_edge: ElementEdge, viewport_ratio: f64) -> Self {
        Self {
            element_edge,
            viewport_ratio,
        }
    }

    /// Whether the threshold is past for a viewport scrolled to `scroll_y`.
    #[must_use]
    pub fn is_reached(self, element: ElementRect, scroll_y: f64, viewport_height: f64) -> bool {
        element.edge_y(self.element_edge) <= scroll_y + viewport_height * self.viewport_ratio
    }
}

impl Default for TriggerStart {
    fn default() -> Self {
        Self::new(ElementEdge::Top, 0.85)
    }
}

impl FromStr for TriggerStart {
    type Err = ChartError;

    fn from_str(spec: &str) -> ChartResult<Self> {
        let invalid = |reason: &str| ChartError::InvalidTrigger {
            spec: spec.to_owned(),
            reason: reason.to_owned(),
        };

        let mut parts = spec.split_whitespace();
        let (Some(edge), Some(position), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected `<element edge> <viewport position>`"));
        };

        let element_edge = match edge {
            "top" => ElementEdge::Top,
            "center" => ElementEdge::Center,
            "bottom" => ElementEdge::Bottom,
            _ => return Err(invalid("element edge must be top, center or bottom")),
        };

        let viewport_ratio = match position {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            _ => {
                let percent = position
                    .strip_suffix('%')
                    .ok_or_else(|| invalid("viewport position must be a keyword or a percentage"))?
                    .parse::<f64>()
                    .map_err(|_| invalid("viewport percentage is not a number"))?;
                if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                    return Err(invalid("viewport percentage must be within 0%..=100%"));
                }
                percent / 100.0
            }
        };

        Ok(Self::new(element_edge, viewport_ratio))
    }
}

impl TryFrom<String> for TriggerStart {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<TriggerStart> for String {
    fn from(value: TriggerStart) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TriggerStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.viewport_ratio * 100.0 * 1e4).round() / 1e4;
        write!(f, "{} {percent}%", self.element_edge.keyword())
    }
}
