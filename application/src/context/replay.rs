//! Replay prompts
//!
//! Every request is rebuilt from the game record: role framing, all words
//! said so far and a trimmed debate history. The only thing carried between
//! calls is the call memory, a per-player list of earlier prompt/reply
//! pairs so the model can see what it said before.

use super::{ContextEvent, ConversationContext, TurnRequest};
use crate::config::ContextStrategy;
use crate::ports::inference_client::{InferenceClient, InferenceError};
use async_trait::async_trait;
use impostor_domain::{Game, GamePrompts, Message, Player};
use std::collections::HashMap;

pub struct ReplayContext {
    memory: Option<HashMap<String, Vec<Message>>>,
}

impl Default for ReplayContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayContext {
    pub fn new() -> Self {
        Self {
            memory: Some(HashMap::new()),
        }
    }

    /// Single-shot `generate` requests with no memory at all
    pub fn without_memory() -> Self {
        Self { memory: None }
    }

    pub fn remembered(&self, player_id: &str) -> &[Message] {
        self.memory
            .as_ref()
            .and_then(|m| m.get(player_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn prompt(game: &Game, player: &Player, turn: &TurnRequest) -> String {
        match turn {
            TurnRequest::Word => GamePrompts::full_word_prompt(game, player),
            TurnRequest::Debate { exchange } => {
                GamePrompts::full_debate_prompt(game, player, *exchange)
            }
            TurnRequest::Vote { candidates } => {
                let names: Vec<&str> = candidates.iter().map(String::as_str).collect();
                GamePrompts::full_vote_prompt(game, player, &names)
            }
            TurnRequest::Guess => GamePrompts::full_guess_prompt(game, player),
        }
    }
}

#[async_trait]
impl ConversationContext for ReplayContext {
    fn strategy(&self) -> ContextStrategy {
        ContextStrategy::Replay
    }

    fn begin(&mut self, _game: &Game) {
        if let Some(memory) = &mut self.memory {
            memory.clear();
        }
    }

    fn observe(&mut self, _game: &Game, _event: &ContextEvent<'_>) {}

    async fn request(
        &mut self,
        inference: &dyn InferenceClient,
        game: &Game,
        player: &Player,
        turn: &TurnRequest,
    ) -> Result<String, InferenceError> {
        let model = player
            .model()
            .ok_or_else(|| InferenceError::ModelNotAvailable(player.id().to_string()))?;
        let prompt = GamePrompts::for_model(model, Self::prompt(game, player, turn));

        let Some(memory) = &mut self.memory else {
            return inference.generate(model, &prompt).await;
        };

        let history = memory.entry(player.id().to_string()).or_default();
        let mut messages = history.clone();
        messages.push(Message::user(prompt.clone()));

        let reply = inference.chat(model, &messages).await?;
        history.push(Message::user(prompt));
        history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedInference, five_player_game};
    use impostor_domain::Role;

    #[tokio::test]
    async fn test_prompt_is_rebuilt_from_game() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Ok("sand".to_string()));
        let mut context = ReplayContext::new();
        context.begin(&game);

        let innocent = game.player("player_0").unwrap();
        context
            .request(&inference, &game, innocent, &TurnRequest::Word)
            .await
            .unwrap();

        let calls = inference.calls();
        let prompt = &calls[0].1.last().unwrap().content;
        assert!(prompt.contains("The secret word is \"playa\""));
        assert!(prompt.contains("YOUR TURN: WORD"));
    }

    #[tokio::test]
    async fn test_call_memory_carries_previous_exchanges() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Ok("sand".to_string()));
        let mut context = ReplayContext::new();
        let player = game.player("player_1").unwrap();

        for _ in 0..2 {
            context
                .request(&inference, &game, player, &TurnRequest::Word)
                .await
                .unwrap();
        }

        let calls = inference.calls();
        assert_eq!(calls[0].1.len(), 1);
        assert_eq!(calls[1].1.len(), 3);
        assert_eq!(calls[1].1[1].role, Role::Assistant);
        assert_eq!(context.remembered("player_1").len(), 4);
        assert!(context.remembered("player_0").is_empty());
    }

    #[tokio::test]
    async fn test_impostor_prompt_hides_word() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Ok("sand".to_string()));
        let mut context = ReplayContext::without_memory();
        let impostor = game.player("player_4").unwrap();

        context
            .request(&inference, &game, impostor, &TurnRequest::Guess)
            .await
            .unwrap();

        let calls = inference.calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].1[0].content.contains("playa"));
        assert!(calls[0].1[0].content.contains("YOUR TURN: GUESS"));
    }

    #[tokio::test]
    async fn test_failed_call_is_not_remembered() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Err(InferenceError::Timeout));
        let mut context = ReplayContext::new();
        let player = game.player("player_2").unwrap();

        let result = context
            .request(&inference, &game, player, &TurnRequest::Word)
            .await;
        assert!(matches!(result, Err(InferenceError::Timeout)));
        assert!(context.remembered("player_2").is_empty());
    }
}
