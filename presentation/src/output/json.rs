//! JSON-lines event output

use super::formatter::EventFormatter;
use impostor_application::GameEvent;

/// Writes each event as one compact JSON object
pub struct JsonFormatter;

impl EventFormatter for JsonFormatter {
    fn format_event(&self, event: &GameEvent) -> Option<String> {
        serde_json::to_string(event).ok()
    }
}
