//! Broadcaster backed by a tokio broadcast channel
//!
//! Each subscriber gets its own receiver. A subscriber that falls more
//! than `capacity` events behind sees `RecvError::Lagged` and skips ahead;
//! the game never waits for it.

use impostor_application::ports::broadcaster::{Broadcaster, GameEvent};
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of events buffered per subscriber
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: broadcast::Sender<GameEvent>,
}

impl ChannelBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn publish(&self, event: GameEvent) {
        // Sending with no subscribers is not an error worth reporting
        if let Err(e) = self.sender.send(event) {
            trace!("Dropped {} event: no subscribers", e.0.event_type());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impostor_application::ports::broadcaster::GameEventKind;
    use tokio::sync::broadcast::error::RecvError;

    fn debate_round(round: u32) -> GameEvent {
        GameEvent::new("g", GameEventKind::DebateRound { round, total: 5 })
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_in_order() {
        let broadcaster = ChannelBroadcaster::default();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        broadcaster.publish(debate_round(1));
        broadcaster.publish(GameEvent::new("g", GameEventKind::DebateEnded));

        for receiver in [&mut first, &mut second] {
            assert_eq!(receiver.recv().await.unwrap().event_type(), "debate_round");
            assert_eq!(receiver.recv().await.unwrap().event_type(), "debate_ended");
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        let broadcaster = ChannelBroadcaster::new(4);
        broadcaster.publish(debate_round(1));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags() {
        let broadcaster = ChannelBroadcaster::new(2);
        let mut receiver = broadcaster.subscribe();
        for round in 1..=4 {
            broadcaster.publish(debate_round(round));
        }

        assert!(matches!(receiver.recv().await, Err(RecvError::Lagged(2))));
        let event = receiver.recv().await.unwrap();
        assert!(matches!(event.kind, GameEventKind::DebateRound { round: 3, .. }));
    }
}
