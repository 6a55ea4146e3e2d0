use super::{Formatter, iso8601_timestamp};
use crate::constants::{HEADING_UPDATED_EVENT, LOCATION_UPDATED_EVENT};
use crate::events::EmittedEvent;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn describe(&self, event: &EmittedEvent) -> String {
        let f = |key: &str| event.field(key).unwrap_or(f64::NAN);
        match event.name.as_str() {
            HEADING_UPDATED_EVENT => format!("Heading: {:>6.1}°", f("heading")),
            LOCATION_UPDATED_EVENT if self.verbose => format!(
                "Location: {:.6}, {:.6} ±{:.1} m [speed: {:.1} m/s, alt: {:.1} m, course: {:.1}°]",
                f("latitude"),
                f("longitude"),
                f("accuracy"),
                f("speed"),
                f("altitude"),
                f("course")
            ),
            LOCATION_UPDATED_EVENT => format!(
                "Location: {:.6}, {:.6} ±{:.1} m",
                f("latitude"),
                f("longitude"),
                f("accuracy")
            ),
            other => format!("{}: {}", other, event.payload),
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, event: &EmittedEvent) -> String {
        if self.verbose {
            format!("{} {}", iso8601_timestamp(), self.describe(event))
        } else {
            self.describe(event)
        }
    }
}
