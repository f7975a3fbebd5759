//! Activation store: the only mutable shared state in the core.
//!
//! # Responsibility
//! - Hold one `ActivationRecord` per node id.
//! - Enforce the ND-safe guardrail before any insert.
//!
//! # Invariants
//! - Only callers that explicitly assert `nd_safe == Some(true)` mutate the map.
//! - Re-activating an id overwrites its record; the map never holds duplicates.
//! - Writes are serialized by a mutex, so concurrent cycles keep idempotence.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Clock used to stamp activations.
pub type ActivationClock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// One active node entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    pub id: String,
    /// Always `true`; stored so consumers can re-check the guardrail.
    pub nd_safe: bool,
    pub activated_at: DateTime<Utc>,
}

/// Caller assertion required by `ActivationStore::activate`.
///
/// `ActivationGuard::default()` asserts nothing and is always refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationGuard {
    pub nd_safe: Option<bool>,
}

impl ActivationGuard {
    /// Explicit ND-safe assertion.
    pub fn nd_safe() -> Self {
        Self {
            nd_safe: Some(true),
        }
    }
}

/// Single-owner activation map keyed by node id.
pub struct ActivationStore {
    entries: Mutex<BTreeMap<String, ActivationRecord>>,
    clock: ActivationClock,
}

impl Default for ActivationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivationStore {
    /// Creates an empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(Utc::now))
    }

    /// Creates an empty store stamped by `clock`.
    pub fn with_clock(clock: ActivationClock) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            clock,
        }
    }

    /// Activates one node id.
    ///
    /// Returns the stored record, or `None` when the guard does not assert
    /// `nd_safe == Some(true)` or the id is blank. Refusal mutates nothing.
    pub fn activate(&self, id: &str, guard: ActivationGuard) -> Option<ActivationRecord> {
        let id = id.trim();
        if guard.nd_safe != Some(true) {
            warn!(
                "event=activation_refused module=activation status=skip node_id={} reason=nd_safe_not_asserted",
                id
            );
            return None;
        }
        if id.is_empty() {
            warn!("event=activation_refused module=activation status=skip reason=blank_id");
            return None;
        }

        let record = ActivationRecord {
            id: id.to_string(),
            nd_safe: true,
            activated_at: (self.clock)(),
        };
        let replaced = self
            .lock()
            .insert(record.id.clone(), record.clone())
            .is_some();
        debug!(
            "event=node_activated module=activation status=ok node_id={} replaced={}",
            record.id, replaced
        );
        Some(record)
    }

    /// Snapshot of every current record, ordered by id.
    pub fn active_nodes(&self) -> Vec<ActivationRecord> {
        self.lock().values().cloned().collect()
    }

    /// Record for one id, if active.
    pub fn get(&self, id: &str) -> Option<ActivationRecord> {
        self.lock().get(id.trim()).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every record.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ActivationRecord>> {
        // A poisoned map still holds whole records; keep serving it.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

static GLOBAL_STORE: Lazy<ActivationStore> = Lazy::new(ActivationStore::new);

/// Process-wide store used by the free `activate`/`get_active_nodes` entry points.
pub fn global() -> &'static ActivationStore {
    &GLOBAL_STORE
}

/// Activates `id` in the process-wide store.
pub fn activate(id: &str, guard: ActivationGuard) -> Option<ActivationRecord> {
    global().activate(id, guard)
}

/// Read-only snapshot of the process-wide store.
pub fn get_active_nodes() -> Vec<ActivationRecord> {
    global().active_nodes()
}
