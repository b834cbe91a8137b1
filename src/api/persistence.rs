use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::DisplayFormat;
use crate::render::Renderer;

use super::GanttEngine;

pub const SELECTED_FORMAT_KEY: &str = "selectedFormat";

/// Write the host should forward to its key-value persistence call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistRequest {
    pub key: String,
    pub value: String,
}

/// Last known persisted values, from the host or from our own writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedProperties {
    values: IndexMap<String, String>,
}

impl PersistedProperties {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores `value`; returns `true` when it differs from the known one.
    pub fn record(&mut self, key: &str, value: &str) -> bool {
        if self.get(key) == Some(value) {
            return false;
        }
        self.values.insert(key.to_owned(), value.to_owned());
        true
    }
}

/// Reads a persisted format string, falling back to the default format.
#[must_use]
pub fn parse_persisted_format(value: &str) -> DisplayFormat {
    DisplayFormat::parse(value).unwrap_or_else(|| {
        warn!(value, "unrecognized persisted display format, using default");
        DisplayFormat::default()
    })
}

impl<R: Renderer> GanttEngine<R> {
    /// Takes the queued persistence writes, oldest first.
    pub fn drain_persist_requests(&mut self) -> Vec<PersistRequest> {
        std::mem::take(&mut self.core.runtime.persist_queue)
    }

    #[must_use]
    pub fn persisted_value(&self, key: &str) -> Option<&str> {
        self.core.runtime.persisted.get(key)
    }

    /// Queues a write unless the value is already the persisted one.
    pub(super) fn queue_persist(&mut self, key: &str, value: &str) {
        if !self.core.runtime.persisted.record(key, value) {
            return;
        }
        debug!(key, value, "queue persist request");
        self.core.runtime.persist_queue.push(PersistRequest {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Adopts host-provided values. A changed format becomes a pending
    /// format command applied once a time scale exists.
    pub(super) fn apply_persisted(&mut self, values: &IndexMap<String, String>) {
        for (key, value) in values {
            let changed = self.core.runtime.persisted.record(key, value);
            if key != SELECTED_FORMAT_KEY || !changed {
                continue;
            }
            let format = parse_persisted_format(value);
            if format != self.core.view.selected_format {
                self.core.view.selected_format = format;
                self.core.runtime.pending_format = Some(format);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PersistedProperties, parse_persisted_format};
    use crate::core::DisplayFormat;

    #[test]
    fn recording_the_same_value_twice_is_not_a_change() {
        let mut props = PersistedProperties::default();
        assert!(props.record("selectedFormat", "Month"));
        assert!(!props.record("selectedFormat", "Month"));
        assert!(props.record("selectedFormat", "Day"));
    }

    #[test]
    fn unknown_persisted_format_falls_back_to_default() {
        assert_eq!(parse_persisted_format("Quarter"), DisplayFormat::All);
        assert_eq!(parse_persisted_format("Año"), DisplayFormat::Year);
    }
}
