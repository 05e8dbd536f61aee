//! Display formatting for sidebar metric tiles.

use crate::metrics::registry::{MetricResult, EMPTY_METRIC_DISPLAY};
use crate::model::sidebar::{MetricEmphasis, MetricFormatter, SidebarCardSchema};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M UTC";
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats a raw metric value for one sidebar tile.
///
/// - Null, missing or blank values render as `--`.
/// - `percentage` clamps to `0..=1` and renders a whole percent; strings
///   already containing `%` pass through.
/// - `datetime` renders RFC 3339 input in UTC; anything else passes through.
/// - `number` groups thousands.
pub fn format_metric_value(value: Option<&Value>, formatter: Option<MetricFormatter>) -> String {
    let value = match value {
        None | Some(Value::Null) => return EMPTY_METRIC_DISPLAY.to_string(),
        Some(value) => value,
    };

    if let Value::String(raw) = value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return EMPTY_METRIC_DISPLAY.to_string();
        }
        if formatter.is_none() {
            return trimmed.to_string();
        }
    }

    match formatter {
        Some(MetricFormatter::Percentage) => {
            if let Value::String(raw) = value {
                if raw.contains('%') {
                    return raw.trim().to_string();
                }
            }
            match as_finite_number(value) {
                Some(numeric) => format!("{}%", (numeric.clamp(0.0, 1.0) * 100.0).round()),
                None => plain_string(value),
            }
        }
        Some(MetricFormatter::Datetime) => {
            let raw = plain_string(value);
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(parsed) => parsed
                    .with_timezone(&Utc)
                    .format(DATETIME_DISPLAY_FORMAT)
                    .to_string(),
                Err(_) => raw,
            }
        }
        Some(MetricFormatter::Number) => match as_finite_number(value) {
            Some(numeric) => group_thousands(numeric),
            None => plain_string(value),
        },
        Some(MetricFormatter::String) | None => plain_string(value),
    }
}

/// Renders `value` with `,` thousands separators and at most three decimals.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

fn as_finite_number(value: &Value) -> Option<f64> {
    let numeric = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => return None,
    };
    numeric.is_finite().then_some(numeric)
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.trim().to_string(),
        other => other.to_string(),
    }
}

/// One rendered metric tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTileView {
    pub id: String,
    pub label: String,
    pub display_value: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub emphasis: MetricEmphasis,
}

/// Sidebar card with display-ready metric values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarCardView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub metrics: Vec<MetricTileView>,
    pub footer_hint: Option<String>,
}

/// Pairs every card metric with its display value.
///
/// A resolved metric's `formatted` text wins; otherwise the raw value from
/// `raw_values[valueField]` goes through [`format_metric_value`].
pub fn build_sidebar_card_view(
    card: &SidebarCardSchema,
    raw_values: &Map<String, Value>,
    resolved: &BTreeMap<String, MetricResult>,
) -> SidebarCardView {
    let metrics = card
        .metrics
        .iter()
        .map(|metric| {
            let value_field = metric.value_field.as_deref();
            let precomputed = value_field
                .and_then(|field| resolved.get(field))
                .and_then(|result| result.formatted.clone());
            let display_value = precomputed.unwrap_or_else(|| {
                let raw = value_field.and_then(|field| {
                    resolved
                        .get(field)
                        .map(|result| &result.value)
                        .or_else(|| raw_values.get(field))
                });
                format_metric_value(raw, metric.formatter)
            });

            MetricTileView {
                id: metric.id.clone(),
                label: metric.label.clone(),
                display_value,
                description: metric.description.clone(),
                icon: metric.icon.clone(),
                emphasis: metric.emphasis.unwrap_or_default(),
            }
        })
        .collect();

    SidebarCardView {
        id: card.id.clone(),
        title: card.title.clone(),
        description: card.description.clone(),
        metrics,
        footer_hint: card.footer_hint.clone(),
    }
}
