//! Persistent transcripts
//!
//! Each AI player owns a chat transcript seeded with its private briefing.
//! Game events are appended to every other active AI player's transcript;
//! turn requests and the player's own replies go only to its own.

use super::{ContextEvent, ConversationContext, TurnRequest};
use crate::config::ContextStrategy;
use crate::ports::inference_client::{InferenceClient, InferenceError};
use async_trait::async_trait;
use impostor_domain::{Game, GamePrompts, Player, Transcript};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct PersistentContext {
    transcripts: HashMap<String, Transcript>,
}

impl PersistentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self, player_id: &str) -> Option<&Transcript> {
        self.transcripts.get(player_id)
    }

    fn render(game: &Game, event: &ContextEvent<'_>) -> String {
        match *event {
            ContextEvent::RoundStarted { round } => GamePrompts::round_started(round),
            ContextEvent::Word { speaker_id, word } => {
                GamePrompts::word_said(game.display_name_of(speaker_id), word)
            }
            ContextEvent::DebateStarted => GamePrompts::debate_started(),
            ContextEvent::DebateMessage {
                speaker_id,
                message,
            } => GamePrompts::debate_line(game.display_name_of(speaker_id), message),
            ContextEvent::VotingStarted => GamePrompts::voting_started(),
            ContextEvent::Vote {
                voter_id,
                target_id,
                justification,
            } => GamePrompts::vote_cast(
                game.display_name_of(voter_id),
                game.display_name_of(target_id),
                justification,
            ),
            ContextEvent::VoteTied => GamePrompts::vote_tied(),
            ContextEvent::Eliminated {
                player_id,
                was_impostor,
            } => GamePrompts::eliminated(game.display_name_of(player_id), was_impostor),
            ContextEvent::GameOver { result } => GamePrompts::game_result(
                result,
                game.secret_word(),
                game.display_name_of(game.impostor_id()),
            ),
        }
    }

    fn request_text(game: &Game, turn: &TurnRequest) -> String {
        match turn {
            TurnRequest::Word => GamePrompts::word_request(game.round()),
            TurnRequest::Debate { exchange } => GamePrompts::debate_request(*exchange),
            TurnRequest::Vote { candidates } => {
                let names: Vec<&str> = candidates.iter().map(String::as_str).collect();
                GamePrompts::vote_request(&names)
            }
            TurnRequest::Guess => GamePrompts::guess_request(),
        }
    }
}

#[async_trait]
impl ConversationContext for PersistentContext {
    fn strategy(&self) -> ContextStrategy {
        ContextStrategy::Persistent
    }

    fn begin(&mut self, game: &Game) {
        self.transcripts.clear();
        for player in game.players().iter().filter(|p| !p.is_human()) {
            if let Some(model) = player.model() {
                self.transcripts.insert(
                    player.id().to_string(),
                    Transcript::new(
                        player.id(),
                        model.clone(),
                        GamePrompts::briefing(game, player),
                    ),
                );
            }
        }
    }

    fn observe(&mut self, game: &Game, event: &ContextEvent<'_>) {
        let entry = Self::render(game, event);
        let speaker = event.speaker();

        for player in game.active_players() {
            if Some(player.id()) == speaker {
                continue;
            }
            if let Some(transcript) = self.transcripts.get_mut(player.id()) {
                transcript.push_event(entry.clone());
            }
        }
    }

    async fn request(
        &mut self,
        inference: &dyn InferenceClient,
        game: &Game,
        player: &Player,
        turn: &TurnRequest,
    ) -> Result<String, InferenceError> {
        let model = player
            .model()
            .cloned()
            .ok_or_else(|| InferenceError::ModelNotAvailable(player.id().to_string()))?;

        let transcript = self
            .transcripts
            .entry(player.id().to_string())
            .or_insert_with(|| {
                Transcript::new(player.id(), model.clone(), GamePrompts::briefing(game, player))
            });
        transcript.push_event(GamePrompts::for_model(&model, Self::request_text(game, turn)));

        debug!(
            player = player.id(),
            turn = turn.kind(),
            entries = transcript.len(),
            "Sending transcript"
        );
        let reply = inference.chat(&model, transcript.messages()).await?;
        transcript.push_reply(reply.clone());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedInference, five_player_game};
    use impostor_domain::{GameManager, GamePhase, Leaderboard, Role};

    fn count_containing(transcript: &Transcript, needle: &str) -> usize {
        transcript
            .messages()
            .iter()
            .filter(|m| m.content.contains(needle))
            .count()
    }

    #[test]
    fn test_begin_seeds_role_briefings() {
        let game = five_player_game("playa", 4);
        let mut context = PersistentContext::new();
        context.begin(&game);

        let innocent = context.transcript("player_0").unwrap();
        let impostor = context.transcript("player_4").unwrap();
        assert_eq!(innocent.messages()[0].role, Role::System);
        assert!(innocent.messages()[0].content.contains("playa"));
        assert!(!impostor.messages()[0].content.contains("playa"));
    }

    #[tokio::test]
    async fn test_debate_message_reaches_everyone_but_the_speaker() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Ok("I suspect Beta".to_string()));
        let mut context = PersistentContext::new();
        context.begin(&game);

        let alfa = game.player("player_0").unwrap();
        let reply = context
            .request(&inference, &game, alfa, &TurnRequest::Debate { exchange: 1 })
            .await
            .unwrap();
        context.observe(
            &game,
            &ContextEvent::DebateMessage {
                speaker_id: "player_0",
                message: &reply,
            },
        );

        let line = "[DEBATE] Alfa: \"I suspect Beta\"";
        for id in ["player_1", "player_2", "player_3", "player_4"] {
            let transcript = context.transcript(id).unwrap();
            assert_eq!(count_containing(transcript, line), 1, "{id}");
            assert_eq!(transcript.messages().last().unwrap().role, Role::User);
        }

        let own = context.transcript("player_0").unwrap();
        assert_eq!(count_containing(own, "I suspect Beta"), 1);
        assert_eq!(own.messages().last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_request_sends_whole_transcript() {
        let game = five_player_game("playa", 4);
        let inference = ScriptedInference::new(|_, _| Ok("sand".to_string()));
        let mut context = PersistentContext::new();
        context.begin(&game);
        context.observe(&game, &ContextEvent::RoundStarted { round: 1 });
        context.observe(
            &game,
            &ContextEvent::Word {
                speaker_id: "player_1",
                word: "towel",
            },
        );

        let alfa = game.player("player_0").unwrap();
        context
            .request(&inference, &game, alfa, &TurnRequest::Word)
            .await
            .unwrap();

        let calls = inference.calls();
        assert_eq!(calls.len(), 1);
        let sent = &calls[0].1;
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].role, Role::System);
        assert!(sent[2].content.contains("Beta says: \"towel\""));
        assert!(sent[3].content.contains("YOUR TURN: WORD"));
        assert_eq!(context.transcript("player_0").unwrap().len(), 5);
    }

    #[test]
    fn test_eliminated_players_stop_listening() {
        let game = five_player_game("playa", 4);
        let mut manager = GameManager::with_seed(game, Leaderboard::new().shared(), 3);
        let mut context = PersistentContext::new();
        context.begin(manager.game());

        manager.start_game();
        manager.advance_to_word_round();
        while manager.game().phase() == GamePhase::WordRound {
            let id = manager.game().current_player().unwrap().id().to_string();
            manager.record_word(&id, "w");
        }
        manager.start_voting();
        for (voter, target) in [(0, 1), (1, 2), (2, 1), (3, 1), (4, 1)] {
            manager.record_vote(&format!("player_{voter}"), &format!("player_{target}"), "");
        }
        manager.process_elimination();

        let before = context.transcript("player_1").unwrap().len();
        context.observe(
            manager.game(),
            &ContextEvent::Eliminated {
                player_id: "player_1",
                was_impostor: false,
            },
        );
        context.observe(manager.game(), &ContextEvent::RoundStarted { round: 2 });

        assert_eq!(context.transcript("player_1").unwrap().len(), before);
        let other = context.transcript("player_0").unwrap();
        assert_eq!(count_containing(other, "[ELIMINATED] Beta"), 1);
    }
}
