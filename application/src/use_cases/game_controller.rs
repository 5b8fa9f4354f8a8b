//! Game Controller
//!
//! Drives one game from `SETUP` to `GAME_OVER`. The controller is the only
//! writer of turn progress: it asks AI players for their turns through the
//! game's [`ConversationContext`], waits on the human action channel when a
//! human has to act, and publishes a [`GameEvent`] after every state change.
//!
//! Inference failures never stop a game. Every AI turn has a fallback
//! (placeholder word, stock debate line, random ballot) that is used when
//! the model errors out or replies with something unusable.

use crate::config::ControllerParams;
use crate::context::{ContextEvent, ConversationContext, TurnRequest, context_for};
use crate::ports::broadcaster::{Broadcaster, FinalScore, GameEvent, GameEventKind, VoteCount};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::human_action::{HumanAction, HumanActionReceiver};
use crate::ports::inference_client::{InferenceClient, InferenceError};
use impostor_domain::text::{PLACEHOLDER_WORD, clean_response};
use impostor_domain::{
    Elimination, EliminationOutcome, Game, GameManager, GamePhase, GameResult, Player,
    parse_vote_reply, redact_secret_word, word_from_reply,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

/// Consecutive tied votes before the tie is broken at random
pub const MAX_TIED_VOTES: u32 = 2;

const DEBATE_TOO_SHORT: &str = "I'm still analysing the situation...";
const DEBATE_FAILED: &str = "Hmm, I'm not sure.";
const VOTE_UNDECIDED: &str = "I couldn't decide clearly.";
const VOTE_FAILED: &str = "Error processing my vote.";
const HUMAN_VOTE: &str = "Human player's vote";
const MIN_DEBATE_CHARS: usize = 3;

/// What happened after one resolved vote
enum Resolution {
    Settled,
    Revote,
}

/// Turn controller for a single game
pub struct GameController<I: InferenceClient + 'static> {
    manager: GameManager,
    inference: Arc<I>,
    context: Box<dyn ConversationContext>,
    broadcaster: Arc<dyn Broadcaster>,
    conversation_logger: Arc<dyn ConversationLogger>,
    actions: HumanActionReceiver,
    /// Set once the human action channel has no senders left
    actions_closed: bool,
    snapshots: watch::Sender<Game>,
    params: ControllerParams,
    rng: StdRng,
    /// Consecutive tied outcomes in the current vote
    tie_attempts: u32,
    ai_voting_complete: bool,
    /// Human ballot received during voting, applied after the AI ballots
    pending_human_vote: Option<String>,
    /// Word (player id, word) sent on the human's turn before it was taken
    pending_human_word: Option<(String, String)>,
    /// Guess (player id, guess) sent before the guess was asked for
    pending_human_guess: Option<(String, String)>,
}

impl<I: InferenceClient + 'static> GameController<I> {
    pub fn new(
        manager: GameManager,
        inference: Arc<I>,
        broadcaster: Arc<dyn Broadcaster>,
        actions: HumanActionReceiver,
        params: ControllerParams,
    ) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let (snapshots, _) = watch::channel(manager.game().clone());

        Self {
            context: context_for(params.context),
            manager,
            inference,
            broadcaster,
            conversation_logger: Arc::new(NoConversationLogger),
            actions,
            actions_closed: false,
            snapshots,
            params,
            rng,
            tie_attempts: 0,
            ai_voting_complete: false,
            pending_human_vote: None,
            pending_human_word: None,
            pending_human_guess: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Replace the context chosen by `params.context`
    pub fn with_context(mut self, context: Box<dyn ConversationContext>) -> Self {
        self.context = context;
        self
    }

    pub fn game(&self) -> &Game {
        self.manager.game()
    }

    pub fn tie_attempts(&self) -> u32 {
        self.tie_attempts
    }

    /// Live view of the game, updated after every state change
    pub fn subscribe(&self) -> watch::Receiver<Game> {
        self.snapshots.subscribe()
    }

    /// Play the game to the end and return the final state
    pub async fn run(&mut self) -> Game {
        info!(
            game = self.manager.game().id(),
            players = self.manager.game().players().len(),
            context = %self.context.strategy(),
            "Starting game"
        );
        self.context.begin(self.manager.game());

        loop {
            match self.manager.phase() {
                GamePhase::Setup => self.reveal_word().await,
                GamePhase::WordReveal => self.open_word_round(),
                GamePhase::WordRound => self.run_word_round().await,
                GamePhase::Debate => self.run_debate().await,
                GamePhase::Voting | GamePhase::Elimination => self.run_voting().await,
                GamePhase::ImpostorGuess => self.run_impostor_guess().await,
                GamePhase::GameOver => break,
            }
        }

        self.finish();
        self.manager.game().clone()
    }

    // ==================== Phases ====================

    async fn reveal_word(&mut self) {
        if !self.manager.start_game() {
            return;
        }
        self.announce_phase();

        let game = self.manager.game();
        let human = game.human();
        self.emit(GameEventKind::WordReveal {
            category: game.category().map(str::to_string),
            human_id: human.map(|p| p.id().to_string()),
            human_word: human.map(|p| game.private_word_for(p).to_string()),
        });
        self.sync();
        pause(self.params.pacing.reveal).await;
    }

    fn open_word_round(&mut self) {
        if self.manager.advance_to_word_round() {
            self.start_round();
        }
    }

    /// Announce the round that the state machine just opened
    fn start_round(&mut self) {
        self.pending_human_word = None;
        let round = self.manager.game().round();
        info!(game = self.manager.game().id(), round, "Word round");
        self.announce_phase();
        self.observe(ContextEvent::RoundStarted { round });
        self.sync();
    }

    async fn run_word_round(&mut self) {
        while self.manager.phase() == GamePhase::WordRound {
            self.drain_actions();
            let Some(player) = self.manager.game().current_player().cloned() else {
                break;
            };

            self.emit(GameEventKind::PlayerTurn {
                player_id: player.id().to_string(),
                player_name: player.display_name().to_string(),
                is_human: player.is_human(),
            });

            let word = if player.is_human() {
                self.wait_for_human_word(&player).await
            } else {
                self.ai_word(&player).await
            };

            if !self.manager.record_word(player.id(), &word) {
                warn!(player = player.id(), "Word rejected by the game");
                break;
            }
            debug!(player = player.id(), word = %word, "Word recorded");
            self.emit(GameEventKind::PlayerWord {
                player_id: player.id().to_string(),
                player_name: player.display_name().to_string(),
                word: word.clone(),
            });
            self.observe(ContextEvent::Word {
                speaker_id: player.id(),
                word: &word,
            });
            self.sync();

            if !player.is_human() {
                pause(self.params.pacing.turn).await;
            }
        }
    }

    async fn run_debate(&mut self) {
        info!(game = self.manager.game().id(), "Debate");
        self.announce_phase();
        self.observe(ContextEvent::DebateStarted);

        let total = self.params.debate_rounds;
        for exchange in 1..=total {
            self.emit(GameEventKind::DebateRound {
                round: exchange,
                total,
            });

            for player in self.active_ai_players() {
                self.drain_actions();
                let message = self.ai_debate_message(&player, exchange).await;
                self.post_debate_message(player.id(), &message);
                pause(self.params.pacing.debate).await;
            }
        }

        self.drain_actions();
        self.emit(GameEventKind::DebateEnded);
        pause(self.params.pacing.before_voting).await;
        self.open_voting();
    }

    fn open_voting(&mut self) {
        if !self.manager.start_voting() {
            return;
        }
        self.ai_voting_complete = false;
        self.pending_human_vote = None;
        self.announce_phase();
        self.observe(ContextEvent::VotingStarted);
        self.sync();
    }

    /// One full vote, repeated while tied
    async fn run_voting(&mut self) {
        loop {
            if self.manager.phase() != GamePhase::Voting {
                self.open_voting();
            }

            for voter in self.active_ai_players() {
                self.drain_actions();
                let (target_id, justification) = self.ai_vote(&voter).await;
                self.apply_vote(voter.id(), &target_id, &justification);
                pause(self.params.pacing.vote).await;
            }
            self.ai_voting_complete = true;
            self.drain_actions();
            self.collect_human_vote().await;
            self.fill_missing_votes();

            match self.resolve_votes().await {
                Resolution::Settled => return,
                Resolution::Revote => continue,
            }
        }
    }

    async fn resolve_votes(&mut self) -> Resolution {
        match self.manager.process_elimination() {
            EliminationOutcome::Eliminated(elimination) => {
                self.tie_attempts = 0;
                self.after_elimination(elimination).await;
                Resolution::Settled
            }
            EliminationOutcome::Tie { tied } => {
                self.tie_attempts += 1;
                if self.tie_attempts >= MAX_TIED_VOTES {
                    info!(
                        game = self.manager.game().id(),
                        attempts = self.tie_attempts,
                        "Vote still tied, breaking tie at random"
                    );
                    let outcome = self.manager.break_tie_randomly();
                    self.tie_attempts = 0;
                    if let EliminationOutcome::Eliminated(elimination) = outcome {
                        self.after_elimination(elimination).await;
                    }
                    return Resolution::Settled;
                }

                info!(
                    game = self.manager.game().id(),
                    attempt = self.tie_attempts,
                    "Vote tied, voting again"
                );
                let tied = tied
                    .iter()
                    .map(|id| self.manager.game().display_name_of(id).to_string())
                    .collect();
                self.emit(GameEventKind::VoteTie {
                    tied,
                    attempt: self.tie_attempts,
                });
                self.observe(ContextEvent::VoteTied);
                pause(self.params.pacing.tie).await;
                Resolution::Revote
            }
            EliminationOutcome::Ignored => {
                error!(
                    game = self.manager.game().id(),
                    phase = %self.manager.phase(),
                    "Elimination could not be processed"
                );
                Resolution::Settled
            }
        }
    }

    async fn after_elimination(&mut self, elimination: Elimination) {
        let game = self.manager.game();
        let votes = elimination
            .tally
            .iter()
            .map(|entry| VoteCount {
                player_id: entry.target_id.clone(),
                player_name: game.display_name_of(&entry.target_id).to_string(),
                votes: entry.votes,
            })
            .collect();
        let player_name = game.display_name_of(&elimination.player_id).to_string();

        info!(
            game = game.id(),
            player = %player_name,
            was_impostor = elimination.was_impostor,
            "Player eliminated"
        );
        self.observe(ContextEvent::Eliminated {
            player_id: &elimination.player_id,
            was_impostor: elimination.was_impostor,
        });
        self.emit(GameEventKind::Elimination {
            player_id: elimination.player_id.clone(),
            player_name,
            was_impostor: elimination.was_impostor,
            votes,
        });
        self.sync();
        pause(self.params.pacing.elimination).await;

        match elimination.next_phase {
            GamePhase::WordRound => self.start_round(),
            GamePhase::ImpostorGuess => self.announce_phase(),
            _ => {}
        }
    }

    async fn run_impostor_guess(&mut self) {
        let Some(impostor) = self.manager.game().impostor().cloned() else {
            return;
        };

        let guess = if impostor.is_human() {
            self.wait_for_human_guess(&impostor).await
        } else {
            self.emit_thinking(&impostor, true);
            let guess = match self.ask(&impostor, TurnRequest::Guess).await {
                Ok(reply) => word_from_reply(&reply),
                Err(_) => PLACEHOLDER_WORD.to_string(),
            };
            self.emit_thinking(&impostor, false);
            guess
        };

        let Some(result) = self.manager.process_impostor_guess(&guess) else {
            return;
        };
        info!(
            game = self.manager.game().id(),
            guess = %guess,
            result = %result,
            "Impostor guessed"
        );
        self.emit(GameEventKind::ImpostorGuess {
            player_id: impostor.id().to_string(),
            guess,
            correct: result == GameResult::ImpostorWinsGuess,
            secret_word: self.manager.game().secret_word().to_string(),
        });
        self.sync();
    }

    fn finish(&mut self) {
        let game = self.manager.game();
        let (Some(result), Some(winner)) = (game.result(), game.winner()) else {
            return;
        };
        info!(game = game.id(), result = %result, "Game over");

        let scores = game
            .players()
            .iter()
            .map(|p| FinalScore {
                player_id: p.id().to_string(),
                player_name: p.display_name().to_string(),
                is_impostor: p.is_impostor(),
                score: p.score(),
            })
            .collect();
        let event = GameEventKind::GameOver {
            result,
            winner,
            secret_word: game.secret_word().to_string(),
            impostor_id: game.impostor_id().to_string(),
            impostor_name: game.display_name_of(game.impostor_id()).to_string(),
            impostor_guess: game.impostor_guess().map(str::to_string),
            scores,
            leaderboard: self.manager.leaderboard_snapshot(),
        };

        self.observe(ContextEvent::GameOver { result });
        self.emit(event);
        self.sync();
    }

    // ==================== AI turns ====================

    async fn ai_word(&mut self, player: &Player) -> String {
        self.emit_thinking(player, true);
        let word = match self.ask(player, TurnRequest::Word).await {
            Ok(reply) => word_from_reply(&reply),
            Err(_) => PLACEHOLDER_WORD.to_string(),
        };
        self.emit_thinking(player, false);
        word
    }

    async fn ai_debate_message(&mut self, player: &Player, exchange: u32) -> String {
        self.emit_thinking(player, true);
        let message = match self.ask(player, TurnRequest::Debate { exchange }).await {
            Ok(reply) => {
                let cleaned = clean_response(&reply);
                if cleaned.chars().count() < MIN_DEBATE_CHARS {
                    DEBATE_TOO_SHORT.to_string()
                } else {
                    cleaned
                }
            }
            Err(_) => DEBATE_FAILED.to_string(),
        };
        self.emit_thinking(player, false);
        redact_secret_word(&message, self.manager.game().secret_word())
    }

    /// Target id and justification for one AI ballot
    async fn ai_vote(&mut self, voter: &Player) -> (String, String) {
        let candidates: Vec<Player> = self
            .manager
            .game()
            .active_players()
            .filter(|p| p.id() != voter.id())
            .cloned()
            .collect();
        let names: Vec<String> = candidates
            .iter()
            .map(|p| p.display_name().to_string())
            .collect();

        self.emit_thinking(voter, true);
        let reply = self
            .ask(
                voter,
                TurnRequest::Vote {
                    candidates: names.clone(),
                },
            )
            .await;
        self.emit_thinking(voter, false);

        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (target, justification) = match reply {
            Ok(raw) => {
                let parsed = parse_vote_reply(&raw, &name_refs);
                let target = parsed
                    .target
                    .and_then(|name| candidates.iter().find(|p| p.display_name() == name));
                match target {
                    Some(target) => (Some(target.id().to_string()), parsed.justification),
                    None => (None, VOTE_UNDECIDED.to_string()),
                }
            }
            Err(_) => (None, VOTE_FAILED.to_string()),
        };

        let target = match target {
            Some(target) => target,
            None => {
                debug!(voter = voter.id(), "Falling back to a random ballot");
                self.random_target(&candidates)
            }
        };
        let justification = redact_secret_word(&justification, self.manager.game().secret_word());
        (target, justification)
    }

    /// Every AI turn goes through here so requests and replies get logged
    async fn ask(&mut self, player: &Player, turn: TurnRequest) -> Result<String, InferenceError> {
        let game_id = self.manager.game().id().to_string();
        let model = player.model().map(|m| m.to_string()).unwrap_or_default();
        self.conversation_logger.log(ConversationEvent::new(
            "model_request",
            json!({
                "game_id": game_id,
                "player_id": player.id(),
                "model": model,
                "turn": turn.kind(),
                "round": self.manager.game().round(),
            }),
        ));

        let result = self
            .context
            .request(&*self.inference, self.manager.game(), player, &turn)
            .await;

        match &result {
            Ok(reply) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "model_reply",
                    json!({
                        "game_id": game_id,
                        "player_id": player.id(),
                        "model": model,
                        "turn": turn.kind(),
                        "bytes": reply.len(),
                        "reply": reply,
                    }),
                ));
            }
            Err(e) => {
                warn!(
                    player = player.id(),
                    model = %model,
                    turn = turn.kind(),
                    "Inference failed, using fallback: {}",
                    e
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "model_error",
                    json!({
                        "game_id": game_id,
                        "player_id": player.id(),
                        "model": model,
                        "turn": turn.kind(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }
        result
    }

    // ==================== Votes ====================

    fn apply_vote(&mut self, voter_id: &str, target_id: &str, justification: &str) -> bool {
        if !self.manager.record_vote(voter_id, target_id, justification) {
            debug!(voter = voter_id, target = target_id, "Ballot rejected");
            return false;
        }

        let game = self.manager.game();
        self.emit(GameEventKind::PlayerVoted {
            voter_id: voter_id.to_string(),
            voter_name: game.display_name_of(voter_id).to_string(),
            target_id: target_id.to_string(),
            target_name: game.display_name_of(target_id).to_string(),
            justification: justification.to_string(),
        });
        self.observe(ContextEvent::Vote {
            voter_id,
            target_id,
            justification,
        });
        self.sync();
        true
    }

    async fn collect_human_vote(&mut self) {
        let Some(human) = self.manager.game().human().cloned() else {
            return;
        };
        if !human.is_active() || self.manager.game().has_voted(human.id()) {
            return;
        }

        if let Some(target_id) = self.pending_human_vote.take()
            && self.apply_vote(human.id(), &target_id, HUMAN_VOTE)
        {
            return;
        }

        let human_id = human.id().to_string();
        let waited = self
            .wait_for(|game, action| match action {
                HumanAction::CastVote {
                    player_id,
                    target_id,
                } if *player_id == human_id
                    && *target_id != human_id
                    && game.player(target_id).is_some_and(|p| p.is_active()) =>
                {
                    Some(target_id.clone())
                }
                _ => None,
            })
            .await;

        let target_id = match waited {
            Some(target_id) => target_id,
            None => {
                let candidates: Vec<Player> = self
                    .manager
                    .game()
                    .active_players()
                    .filter(|p| p.id() != human_id)
                    .cloned()
                    .collect();
                self.random_target(&candidates)
            }
        };
        self.apply_vote(&human_id, &target_id, HUMAN_VOTE);
    }

    /// Random ballots for active AI players whose vote was rejected
    fn fill_missing_votes(&mut self) {
        if self.manager.phase() != GamePhase::Voting {
            return;
        }
        for voter in self.active_ai_players() {
            if self.manager.game().has_voted(voter.id()) {
                continue;
            }
            let candidates: Vec<Player> = self
                .manager
                .game()
                .active_players()
                .filter(|p| p.id() != voter.id())
                .cloned()
                .collect();
            let target = self.random_target(&candidates);
            self.apply_vote(voter.id(), &target, VOTE_UNDECIDED);
        }
    }

    fn random_target(&mut self, candidates: &[Player]) -> String {
        candidates
            .choose(&mut self.rng)
            .map(|p| p.id().to_string())
            .unwrap_or_default()
    }

    // ==================== Human actions ====================

    async fn wait_for_human_word(&mut self, player: &Player) -> String {
        if let Some((sender, word)) = self.pending_human_word.take()
            && sender == player.id()
        {
            return word;
        }
        let player_id = player.id().to_string();
        self.wait_for(|_, action| match action {
            HumanAction::SubmitWord {
                player_id: sender,
                word,
            } if *sender == player_id && !word.trim().is_empty() => Some(word.trim().to_string()),
            _ => None,
        })
        .await
        .unwrap_or_else(|| PLACEHOLDER_WORD.to_string())
    }

    async fn wait_for_human_guess(&mut self, player: &Player) -> String {
        self.drain_actions();
        if let Some((sender, guess)) = self.pending_human_guess.take()
            && sender == player.id()
        {
            return guess;
        }
        let player_id = player.id().to_string();
        self.wait_for(|_, action| match action {
            HumanAction::SubmitGuess {
                player_id: sender,
                guess,
            } if *sender == player_id && !guess.trim().is_empty() => {
                Some(guess.trim().to_string())
            }
            _ => None,
        })
        .await
        .unwrap_or_else(|| PLACEHOLDER_WORD.to_string())
    }

    /// Wait for the first action `accept` takes; anything else is handled
    /// as if it had arrived between turns. `None` once every sender is gone.
    async fn wait_for<T>(
        &mut self,
        mut accept: impl FnMut(&Game, &HumanAction) -> Option<T>,
    ) -> Option<T> {
        if self.actions_closed {
            return None;
        }
        self.sync();
        loop {
            let Some(action) = self.actions.recv().await else {
                warn!(
                    game = self.manager.game().id(),
                    "Human action channel closed, using fallback"
                );
                self.actions_closed = true;
                return None;
            };
            if let Some(value) = accept(self.manager.game(), &action) {
                return Some(value);
            }
            self.dispatch(action);
        }
    }

    /// Apply actions queued since the last turn without waiting
    fn drain_actions(&mut self) {
        loop {
            match self.actions.try_recv() {
                Ok(action) => self.dispatch(action),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.actions_closed = true;
                    break;
                }
            }
        }
    }

    fn dispatch(&mut self, action: HumanAction) {
        let phase = self.manager.phase();
        // The impostor guesses after being voted out
        let can_act = match &action {
            HumanAction::SubmitGuess { player_id, .. } => self
                .manager
                .game()
                .player(player_id)
                .is_some_and(|p| p.is_human() && p.is_impostor()),
            other => self.is_active_human(other.player_id()),
        };
        if !can_act {
            debug!(
                player = action.player_id(),
                action = action.kind(),
                "Ignoring action from a player who cannot act"
            );
            return;
        }

        match action {
            HumanAction::SubmitDebateMessage { player_id, message }
                if phase == GamePhase::Debate && !message.trim().is_empty() =>
            {
                self.post_debate_message(&player_id, message.trim());
            }
            HumanAction::SubmitWord { player_id, word }
                if phase == GamePhase::WordRound
                    && !word.trim().is_empty()
                    && self
                        .manager
                        .game()
                        .current_player()
                        .is_some_and(|p| p.id() == player_id) =>
            {
                debug!(player = %player_id, "Holding word until the turn is taken");
                self.pending_human_word = Some((player_id, word.trim().to_string()));
            }
            HumanAction::CastVote { target_id, .. } if phase == GamePhase::Voting => {
                if !self.ai_voting_complete {
                    debug!(target = %target_id, "Holding human vote until AI voting completes");
                }
                self.pending_human_vote = Some(target_id);
            }
            HumanAction::SubmitGuess { player_id, guess }
                if phase == GamePhase::ImpostorGuess
                    && !guess.trim().is_empty()
                    && self.manager.game().impostor_id() == player_id =>
            {
                self.pending_human_guess = Some((player_id, guess.trim().to_string()));
            }
            other => {
                debug!(
                    player = other.player_id(),
                    action = other.kind(),
                    phase = %phase,
                    "Ignoring action"
                );
            }
        }
    }

    fn is_active_human(&self, player_id: &str) -> bool {
        self.manager
            .game()
            .player(player_id)
            .is_some_and(|p| p.is_human() && p.is_active())
    }

    // ==================== Helpers ====================

    fn post_debate_message(&mut self, player_id: &str, message: &str) {
        if !self.manager.add_debate_message(player_id, message) {
            return;
        }
        self.emit(GameEventKind::NewDebateMessage {
            player_id: player_id.to_string(),
            player_name: self.manager.game().display_name_of(player_id).to_string(),
            message: message.to_string(),
        });
        self.observe(ContextEvent::DebateMessage {
            speaker_id: player_id,
            message,
        });
        self.sync();
    }

    fn active_ai_players(&self) -> Vec<Player> {
        self.manager
            .game()
            .active_players()
            .filter(|p| !p.is_human())
            .cloned()
            .collect()
    }

    fn announce_phase(&self) {
        let game = self.manager.game();
        let phase = game.phase();
        self.emit(GameEventKind::PhaseChange {
            phase,
            round: game.round(),
            duration_secs: (phase == GamePhase::Debate).then(|| game.debate_duration_secs()),
        });
    }

    fn emit_thinking(&self, player: &Player, thinking: bool) {
        self.emit(GameEventKind::AiThinking {
            player_id: player.id().to_string(),
            thinking,
        });
    }

    fn emit(&self, kind: GameEventKind) {
        self.broadcaster
            .publish(GameEvent::new(self.manager.game().id(), kind));
    }

    fn observe(&mut self, event: ContextEvent<'_>) {
        self.context.observe(self.manager.game(), &event);
    }

    fn sync(&self) {
        self.snapshots.send_replace(self.manager.game().clone());
    }
}

/// Cosmetic pause between events
async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
