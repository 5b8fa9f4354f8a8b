//! Event formatter trait

use impostor_application::GameEvent;

/// Turns game events into terminal text
pub trait EventFormatter: Send {
    /// Text for one event, or `None` when the event has no line of its own
    fn format_event(&self, event: &GameEvent) -> Option<String>;
}
