use super::{Formatter, iso8601_timestamp};
use crate::events::EmittedEvent;

const COLUMNS: [&str; 8] = [
    "heading",
    "longitude",
    "latitude",
    "speed",
    "altitude",
    "accuracy",
    "course",
    "timestamp",
];

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, event: &EmittedEvent) -> String {
        let fields: Vec<String> = COLUMNS
            .iter()
            .map(|key| event.field(key).map_or(String::new(), |v| v.to_string()))
            .collect();
        format!("{},{},{}", iso8601_timestamp(), event.name, fields.join(","))
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,event,heading,longitude,latitude,speed,altitude,accuracy,course,timestamp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_row_leaves_location_columns_empty() {
        let event = EmittedEvent::new("headingUpdated", json!({ "heading": 42.5 }));
        let line = CsvFormatter.format(&event);
        let cols: Vec<&str> = line.split(',').collect();
        assert_eq!(cols.len(), 10);
        assert_eq!(cols[1], "headingUpdated");
        assert_eq!(cols[2], "42.5");
        assert!(cols[3..].iter().all(|c| c.is_empty()));
    }
}
