//! Events forwarded to the application layer and the sinks that carry them.

pub mod sink;

use serde::Serialize;
use serde_json::{Value, json};

use crate::constants::{HEADING_UPDATED_EVENT, LOCATION_UPDATED_EVENT};
use crate::error::Result;
use crate::heading::HeadingEvent;
use crate::location::LocationEvent;

pub use sink::{ChannelSink, GatedSink, WriterSink};

/// Event produced by one of the trackers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeEvent {
    HeadingUpdated(HeadingEvent),
    LocationUpdated(LocationEvent),
}

impl BridgeEvent {
    /// Name the application layer listens for
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeadingUpdated(_) => HEADING_UPDATED_EVENT,
            Self::LocationUpdated(_) => LOCATION_UPDATED_EVENT,
        }
    }

    /// Payload map handed to the sink
    pub fn payload(&self) -> Value {
        match self {
            Self::HeadingUpdated(e) => json!({ "heading": e.heading }),
            Self::LocationUpdated(e) => json!({
                "longitude": e.longitude,
                "latitude": e.latitude,
                "speed": e.speed,
                "altitude": e.altitude,
                "accuracy": e.accuracy,
                "course": e.course,
                "timestamp": e.timestamp,
            }),
        }
    }
}

impl From<HeadingEvent> for BridgeEvent {
    fn from(event: HeadingEvent) -> Self {
        Self::HeadingUpdated(event)
    }
}

impl From<LocationEvent> for BridgeEvent {
    fn from(event: LocationEvent) -> Self {
        Self::LocationUpdated(event)
    }
}

/// An event as it crossed the sink boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Value,
}

impl EmittedEvent {
    pub fn new(name: &str, payload: Value) -> Self {
        Self {
            name: name.to_string(),
            payload,
        }
    }

    /// Numeric payload field, if present
    pub fn field(&self, key: &str) -> Option<f64> {
        self.payload.get(key).and_then(Value::as_f64)
    }
}

/// Transport that delivers named events to the application layer
///
/// Delivery is best effort. Implementations synchronize internally; the
/// module only ever calls into them.
pub trait EventSink: Send + Sync {
    /// Whether the application layer is attached and can receive events
    fn is_ready(&self) -> bool {
        true
    }

    fn emit(&self, name: &str, payload: Value) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn emit(&self, name: &str, payload: Value) -> Result<()> {
        (**self).emit(name, payload)
    }
}
