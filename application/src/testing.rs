//! Test doubles shared by the application tests

use crate::ports::broadcaster::{Broadcaster, GameEvent, GameEventKind};
use crate::ports::inference_client::{InferenceClient, InferenceError};
use async_trait::async_trait;
use impostor_domain::{Game, Message, Model, Player};
use std::sync::Mutex;

type Responder = dyn Fn(&Model, &[Message]) -> Result<String, InferenceError> + Send + Sync;

/// Inference client answering from a closure and recording every call.
///
/// `generate` calls are recorded as a single user message.
pub struct ScriptedInference {
    respond: Box<Responder>,
    calls: Mutex<Vec<(Model, Vec<Message>)>>,
}

impl ScriptedInference {
    pub fn new(
        respond: impl Fn(&Model, &[Message]) -> Result<String, InferenceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Model, Vec<Message>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, InferenceError> {
        let messages = vec![Message::user(prompt)];
        self.calls
            .lock()
            .unwrap()
            .push((model.clone(), messages.clone()));
        (self.respond)(model, &messages)
    }

    async fn chat(&self, model: &Model, messages: &[Message]) -> Result<String, InferenceError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.clone(), messages.to_vec()));
        (self.respond)(model, messages)
    }
}

/// Last request text in a message list
pub fn last_request(messages: &[Message]) -> &str {
    messages.last().map(|m| m.content.as_str()).unwrap_or("")
}

/// Broadcaster that keeps every event
#[derive(Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingBroadcaster {
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<GameEventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }

    pub fn types(&self) -> Vec<&'static str> {
        self.events().iter().map(GameEvent::event_type).collect()
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.types().iter().filter(|t| **t == event_type).count()
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn publish(&self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Five AI seats named Alfa..Epsilon on models `model-alfa`..`model-epsilon`
pub fn five_player_game(secret_word: &str, impostor: usize) -> Game {
    game_with(&["Alfa", "Beta", "Gamma", "Delta", "Epsilon"], None, secret_word, impostor)
}

/// Seats named `names`; `human` replaces that seat with a human player
pub fn game_with(names: &[&str], human: Option<usize>, secret_word: &str, impostor: usize) -> Game {
    let players = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if human == Some(i) {
                Player::human(format!("player_{i}"), *name)
            } else {
                Player::ai(
                    format!("player_{i}"),
                    *name,
                    Model::new(format!("model-{}", name.to_lowercase())),
                    "#FFFFFF",
                )
            }
        })
        .collect();
    Game::new("game0001", players, secret_word, format!("player_{impostor}")).unwrap()
}
