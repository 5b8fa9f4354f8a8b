//! Event loop that prints one game as it happens

use crate::output::formatter::EventFormatter;
use impostor_application::{GameEvent, GameEventKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Prints formatted events and shows a spinner while a model is thinking.
pub struct ConsolePresenter<F: EventFormatter> {
    formatter: F,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
}

impl<F: EventFormatter> ConsolePresenter<F> {
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            spinner: None,
            show_spinner: true,
        }
    }

    /// Disable the thinking spinner (JSON output, non-interactive runs)
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    /// Print events for `game_id` until its `game_over` arrives or the
    /// channel closes. Events of other games are skipped.
    ///
    /// `thinking_label` maps a player id to the name shown next to the spinner.
    pub async fn run(
        mut self,
        game_id: String,
        mut events: broadcast::Receiver<GameEvent>,
        thinking_label: impl Fn(&str) -> String,
    ) {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Console fell behind, {} events skipped", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if event.game_id != game_id {
                continue;
            }

            let finished = matches!(event.kind, GameEventKind::GameOver { .. });
            self.present(&event, &thinking_label);
            if finished {
                break;
            }
        }
        self.stop_spinner();
    }

    fn present(&mut self, event: &GameEvent, thinking_label: &impl Fn(&str) -> String) {
        if let GameEventKind::AiThinking {
            player_id,
            thinking,
        } = &event.kind
        {
            if *thinking {
                self.start_spinner(&thinking_label(player_id));
            } else {
                self.stop_spinner();
            }
            return;
        }

        if let Some(text) = self.formatter.format_event(event) {
            self.stop_spinner();
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", text);
            let _ = stdout.flush();
        }
    }

    fn start_spinner(&mut self, label: &str) {
        if !self.show_spinner {
            return;
        }
        self.stop_spinner();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{label} is thinking..."));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records which events reached the formatter
    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<String>>>);

    impl EventFormatter for Recording {
        fn format_event(&self, event: &GameEvent) -> Option<String> {
            self.0.lock().unwrap().push(event.event_type().to_string());
            None
        }
    }

    fn game_over(game_id: &str) -> GameEvent {
        GameEvent::new(
            game_id,
            GameEventKind::GameOver {
                result: impostor_domain::GameResult::InnocentsWin,
                winner: impostor_domain::Winner::Innocents,
                secret_word: "beach".into(),
                impostor_id: "player_1".into(),
                impostor_name: "Beta".into(),
                impostor_guess: None,
                scores: Vec::new(),
                leaderboard: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_stops_at_game_over_and_filters_games() {
        let (sender, receiver) = broadcast::channel(16);
        let recording = Recording::default();
        let presenter = ConsolePresenter::new(recording.clone()).without_spinner();

        sender
            .send(GameEvent::new("other", GameEventKind::DebateEnded))
            .unwrap();
        sender
            .send(GameEvent::new(
                "g1",
                GameEventKind::AiThinking {
                    player_id: "player_0".into(),
                    thinking: true,
                },
            ))
            .unwrap();
        sender
            .send(GameEvent::new("g1", GameEventKind::DebateEnded))
            .unwrap();
        sender.send(game_over("g1")).unwrap();
        sender
            .send(GameEvent::new("g1", GameEventKind::DebateEnded))
            .unwrap();

        presenter.run("g1".to_string(), receiver, |id| id.to_string()).await;

        assert_eq!(*recording.0.lock().unwrap(), ["debate_ended", "game_over"]);
    }

    #[tokio::test]
    async fn test_returns_when_channel_closes() {
        let (sender, receiver) = broadcast::channel(4);
        let recording = Recording::default();
        sender
            .send(GameEvent::new("g1", GameEventKind::DebateEnded))
            .unwrap();
        drop(sender);

        ConsolePresenter::new(recording.clone())
            .without_spinner()
            .run("g1".to_string(), receiver, |id| id.to_string())
            .await;

        assert_eq!(recording.0.lock().unwrap().len(), 1);
    }
}
