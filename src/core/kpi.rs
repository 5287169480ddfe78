use std::time::Duration;

use rust_decimal::prelude::{Decimal, FromPrimitive, RoundingStrategy, ToPrimitive};

pub const KPI_COUNTER_DURATION: Duration = Duration::from_millis(1500);

/// Cubic ease-out (`power2.out` in the page's animation vocabulary).
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Count-up figure shown in a KPI card.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCounter {
    target: f64,
    suffix: String,
    decimals: u32,
    duration: Duration,
}

impl KpiCounter {
    #[must_use]
    pub fn new(target: f64, suffix: impl Into<String>, decimals: u32) -> Self {
        Self {
            target: if target.is_finite() { target } else { 0.0 },
            suffix: suffix.into(),
            decimals,
            duration: KPI_COUNTER_DURATION,
        }
    }

    /// Reads the card's `value`, `suffix` and `decimals` attributes.
    ///
    /// Missing or unparseable numbers count as zero; only the leading numeric
    /// part of an attribute is read (`"12.5%"` is `12.5`).
    #[must_use]
    pub fn from_attributes(
        value: Option<&str>,
        suffix: Option<&str>,
        decimals: Option<&str>,
    ) -> Self {
        let target = value.and_then(leading_float).unwrap_or(0.0);
        let decimals = decimals
            .and_then(leading_int)
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(0);
        Self::new(target, suffix.unwrap_or_default(), decimals)
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.target;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.target * ease_out_cubic(progress)
    }

    #[must_use]
    pub fn display_at(&self, elapsed: Duration, thousands_separator: &str) -> String {
        self.format_value(self.value_at(elapsed), thousands_separator)
    }

    /// Formats an intermediate value: fixed `decimals` when set, grouped
    /// integers for targets of magnitude 100 or more, one decimal otherwise.
    /// Fixed output rounds halves away from zero; grouped integers round
    /// halves up.
    #[must_use]
    pub fn format_value(&self, current: f64, thousands_separator: &str) -> String {
        let current = Decimal::from_f64(current).unwrap_or(Decimal::ZERO);
        let body = if self.decimals > 0 {
            fixed(current, self.decimals)
        } else if self.target.abs() >= 100.0 {
            group_thousands(round_half_up(current), thousands_separator)
        } else {
            fixed(current, 1)
        };
        format!("{body}{}", self.suffix)
    }
}

/// Nearest integer with halves rounded toward positive infinity (`-2.5` is `-2`).
fn round_half_up(value: Decimal) -> i128 {
    (value + Decimal::new(5, 1)).floor().to_i128().unwrap_or(0)
}

fn fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = decimals as usize)
}

fn group_thousands(value: i128, separator: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

fn leading_float(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    (1..=raw.len())
        .rev()
        .filter(|end| raw.is_char_boundary(*end))
        .find_map(|end| {
            raw[..end]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        })
}

fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|(index, c)| !(c.is_ascii_digit() || (*index == 0 && (*c == '-' || *c == '+'))))
        .map_or(raw.len(), |(index, _)| index);
    raw[..end].parse().ok()
}
