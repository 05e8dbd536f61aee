//! In-process metric registry.

use crate::capability::CapabilitySet;
use crate::metrics::format::group_thousands;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Placeholder shown for absent values.
pub const EMPTY_METRIC_DISPLAY: &str = "--";

/// Input handed to every resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Surface requesting the metric (`dashboard`, `canvas`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Raw runtime data, keyed by sidebar `valueField`.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl MetricContext {
    pub fn data_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// One resolved metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    /// Empty when the resolver left it to the registry.
    #[serde(default)]
    pub id: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_utc: Option<String>,
}

impl MetricResult {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            formatted: None,
            unit: None,
            updated_at_utc: None,
        }
    }
}

/// Metric source contract.
pub trait MetricResolver: Send + Sync {
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    /// Capabilities that must all be enabled for this metric to resolve.
    fn required_capabilities(&self) -> &[String] {
        &[]
    }

    fn resolve(&self, context: &MetricContext) -> Option<MetricResult>;

    /// Produces the display form; defaults to [`default_format`].
    fn format(&self, result: MetricResult, _context: &MetricContext) -> MetricResult {
        default_format(result)
    }
}

/// Fills `formatted` unless the resolver already produced non-empty text.
///
/// Null becomes `--`, numbers get thousands grouping, everything else its
/// plain string form.
pub fn default_format(mut result: MetricResult) -> MetricResult {
    if result
        .formatted
        .as_deref()
        .is_some_and(|formatted| !formatted.is_empty())
    {
        return result;
    }
    let formatted = match &result.value {
        Value::Null => EMPTY_METRIC_DISPLAY.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(group_thousands)
            .unwrap_or_else(|| number.to_string()),
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    };
    result.formatted = Some(formatted);
    result
}

/// Metric registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricRegistryError {
    InvalidMetricId(String),
    DuplicateMetricId(String),
}

impl Display for MetricRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMetricId(value) => write!(f, "metric id is invalid: `{value}`"),
            Self::DuplicateMetricId(value) => {
                write!(f, "metric id already registered: `{value}`")
            }
        }
    }
}

impl Error for MetricRegistryError {}

/// Registry of metric resolvers.
#[derive(Default)]
pub struct MetricRegistry {
    resolvers: BTreeMap<String, Arc<dyn MetricResolver>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one resolver under its trimmed id.
    pub fn register(&mut self, resolver: Arc<dyn MetricResolver>) -> Result<(), MetricRegistryError> {
        let id = resolver.id().trim().to_string();
        if id.is_empty() {
            return Err(MetricRegistryError::InvalidMetricId(id));
        }
        if self.resolvers.contains_key(&id) {
            return Err(MetricRegistryError::DuplicateMetricId(id));
        }
        self.resolvers.insert(id, resolver);
        Ok(())
    }

    /// Removes one resolver; returns whether it was registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.resolvers.remove(id.trim()).is_some()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Returns sorted metric ids.
    pub fn metric_ids(&self) -> Vec<String> {
        self.resolvers.keys().cloned().collect()
    }

    /// Resolves and formats one metric.
    pub fn resolve(
        &self,
        id: &str,
        context: &MetricContext,
        capabilities: &CapabilitySet,
    ) -> Option<MetricResult> {
        let resolver = self.resolvers.get(id.trim())?;
        if !capabilities.has_all(resolver.required_capabilities()) {
            log::debug!("event=metric_resolve module=metrics status=gated id={}", resolver.id());
            return None;
        }

        let mut result = resolver.resolve(context)?;
        if result.id.is_empty() {
            result.id = resolver.id().to_string();
        }
        Some(resolver.format(result, context))
    }

    /// Resolves several metrics; ids that yield nothing are left out.
    pub fn resolve_many<S: AsRef<str>>(
        &self,
        ids: &[S],
        context: &MetricContext,
        capabilities: &CapabilitySet,
    ) -> BTreeMap<String, MetricResult> {
        ids.iter()
            .filter_map(|id| {
                let id = id.as_ref();
                self.resolve(id, context, capabilities)
                    .map(|result| (id.to_string(), result))
            })
            .collect()
    }
}
