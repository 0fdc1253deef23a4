//! Fire-and-forget usage events.
//!
//! Events carry a name and a handful of numeric properties (durations,
//! exit codes). Capturing an event never fails and never blocks the caller.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;

/// A named event with numeric properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub properties: BTreeMap<String, i64>,
}

impl TelemetryEvent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: BTreeMap::new(),
        }
    }

    /// Attach a numeric property.
    pub fn with(mut self, key: &str, value: i64) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }
}

/// Sink for telemetry events.
pub trait Telemetry {
    fn capture(&self, event: TelemetryEvent);
}

/// Emits events as structured debug logs.
#[derive(Debug, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn capture(&self, event: TelemetryEvent) {
        let properties = serde_json::to_string(&event.properties).unwrap_or_default();
        tracing::debug!(event = %event.name, %properties, "telemetry");
    }
}

/// Keeps events in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: RefCell<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.borrow().clone()
    }

    /// Names of captured events, in order.
    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.name.clone()).collect()
    }

    /// Find the first event with a given name.
    pub fn find(&self, name: &str) -> Option<TelemetryEvent> {
        self.events.borrow().iter().find(|e| e.name == name).cloned()
    }
}

impl Telemetry for RecordingTelemetry {
    fn capture(&self, event: TelemetryEvent) {
        self.events.borrow_mut().push(event);
    }
}
