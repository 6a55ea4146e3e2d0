use serde_json::json;

use super::{Formatter, iso8601_timestamp};
use crate::events::EmittedEvent;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, event: &EmittedEvent) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "event": event.name,
            "payload": event.payload,
        })
        .to_string()
    }
}
