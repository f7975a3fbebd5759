//! First-success-wins resolution over an ordered source list.
//!
//! # Responsibility
//! - Try candidate sources strictly in order, one at a time.
//! - Degrade to a built-in value when every source fails.
//!
//! # Invariants
//! - Source N is never loaded before source N-1 has been tried and rejected.
//! - Resolution never fails; every failure becomes a soft notice.
//! - Each attempt is bounded by the per-source timeout.

use super::source::{ResourceSource, SourceError};
use crate::config::numerology::{normalize_constants, NumerologyConstants};
use crate::config::palette::{normalize_palette, Palette};
use crate::registry::schema::NodeSchema;
use log::{info, warn};
use serde_json::Value;
use std::time::Duration;

/// Per-source budget used by the typed helpers.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(2);

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOrigin {
    Source { index: usize, label: String },
    Fallback,
}

/// Resolved value plus a human-readable account of its origin.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: ResolvedOrigin,
    /// Names the source used, or states that the built-in fallback is active.
    pub notice: String,
    /// Failures of the sources tried before the winner, in order.
    pub failures: Vec<SourceError>,
}

impl<T> Resolved<T> {
    pub fn is_fallback(&self) -> bool {
        self.origin == ResolvedOrigin::Fallback
    }

    /// The notice, but only when resolution degraded to the fallback.
    pub fn fallback_notice(&self) -> Option<&str> {
        self.is_fallback().then_some(self.notice.as_str())
    }
}

/// Resolves `kind` from the first source that both loads and parses.
pub async fn resolve_first<T, P, F>(
    kind: &str,
    sources: &[Box<dyn ResourceSource>],
    per_source_timeout: Duration,
    parse: P,
    fallback: F,
) -> Resolved<T>
where
    P: Fn(&str) -> Result<T, String>,
    F: FnOnce() -> T,
{
    let mut failures = Vec::new();

    for (index, source) in sources.iter().enumerate() {
        let label = source.label();
        let attempt = match tokio::time::timeout(per_source_timeout, source.load()).await {
            Ok(Ok(text)) => parse(&text).map_err(|message| SourceError::Parse {
                source_label: label.clone(),
                message,
            }),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(SourceError::Timeout {
                source_label: label.clone(),
                after_ms: per_source_timeout.as_millis(),
            }),
        };

        match attempt {
            Ok(value) => {
                info!(
                    "event=resource_resolve module=resource status=ok kind={} source={} index={}",
                    kind, label, index
                );
                return Resolved {
                    value,
                    notice: format!("{kind} loaded from {label}"),
                    origin: ResolvedOrigin::Source { index, label },
                    failures,
                };
            }
            Err(err) => {
                warn!(
                    "event=resource_attempt module=resource status=error kind={} index={} error={}",
                    kind, index, err
                );
                failures.push(err);
            }
        }
    }

    info!(
        "event=resource_resolve module=resource status=fallback kind={} attempts={}",
        kind,
        failures.len()
    );
    Resolved {
        value: fallback(),
        origin: ResolvedOrigin::Fallback,
        notice: format!("fallback {kind} active (built-in defaults)"),
        failures,
    }
}

/// Resolves a palette document; any JSON object counts as parsed.
pub async fn resolve_palette(
    sources: &[Box<dyn ResourceSource>],
    per_source_timeout: Duration,
) -> Resolved<Palette> {
    resolve_first(
        "palette",
        sources,
        per_source_timeout,
        |text| parse_object(text).map(|value| normalize_palette(&value)),
        Palette::default,
    )
    .await
}

/// Resolves a numerology constants document.
pub async fn resolve_constants(
    sources: &[Box<dyn ResourceSource>],
    per_source_timeout: Duration,
) -> Resolved<NumerologyConstants> {
    resolve_first(
        "constants",
        sources,
        per_source_timeout,
        |text| parse_object(text).map(|value| normalize_constants(&value)),
        NumerologyConstants::default,
    )
    .await
}

/// Resolves a node schema document.
pub async fn resolve_schema(
    sources: &[Box<dyn ResourceSource>],
    per_source_timeout: Duration,
) -> Resolved<NodeSchema> {
    resolve_first(
        "schema",
        sources,
        per_source_timeout,
        |text| {
            let value = parse_object(text)?;
            NodeSchema::from_json(&value).map_err(|err| err.to_string())
        },
        NodeSchema::builtin,
    )
    .await
}

/// Resolves a node registry: a JSON list, or an object with a `nodes` list.
///
/// The fallback is an empty registry.
pub async fn resolve_registry(
    sources: &[Box<dyn ResourceSource>],
    per_source_timeout: Duration,
) -> Resolved<Vec<Value>> {
    resolve_first(
        "registry",
        sources,
        per_source_timeout,
        |text| {
            let value: Value = serde_json::from_str(text).map_err(|err| err.to_string())?;
            match value {
                Value::Array(records) => Ok(records),
                Value::Object(mut object) => match object.remove("nodes") {
                    Some(Value::Array(records)) => Ok(records),
                    _ => Err("registry object has no `nodes` list".to_string()),
                },
                _ => Err("registry must be a JSON list".to_string()),
            }
        },
        Vec::new,
    )
    .await
}

fn parse_object(text: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(text).map_err(|err| err.to_string())?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("document must be a JSON object".to_string())
    }
}
