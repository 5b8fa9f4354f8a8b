//! Game domain entities
//!
//! Fields are crate-visible only: reads go through accessors and every
//! mutation goes through [`GameManager`](super::manager::GameManager).

use super::phase::{GamePhase, GameResult};
use crate::core::error::GameSetupError;
use crate::core::model::Model;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Smallest table the game supports
pub const MIN_PLAYERS: usize = 3;
/// Largest table the game supports
pub const MAX_PLAYERS: usize = 6;

/// Private word handed to the impostor instead of the secret word
pub const IMPOSTOR_MARKER: &str = "IMPOSTOR";

/// Display colour used for the human seat
pub const HUMAN_COLOR: &str = "#FFD700";

/// Debate length announced when none is configured
pub const DEFAULT_DEBATE_DURATION_SECS: u64 = 60;

/// A seat at the table (Entity)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub(crate) id: String,
    pub(crate) model: Option<Model>,
    pub(crate) display_name: String,
    pub(crate) color: String,
    pub(crate) is_impostor: bool,
    pub(crate) is_human: bool,
    pub(crate) is_eliminated: bool,
    pub(crate) words_said: Vec<String>,
    pub(crate) score: i32,
}

impl Player {
    /// An AI seat driven by `model`
    pub fn ai(
        id: impl Into<String>,
        display_name: impl Into<String>,
        model: Model,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            model: Some(model),
            display_name: display_name.into(),
            color: color.into(),
            is_impostor: false,
            is_human: false,
            is_eliminated: false,
            words_said: Vec::new(),
            score: 0,
        }
    }

    /// The human seat. It has no model binding.
    pub fn human(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: None,
            display_name: display_name.into(),
            color: HUMAN_COLOR.to_string(),
            is_impostor: false,
            is_human: true,
            is_eliminated: false,
            words_said: Vec::new(),
            score: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_impostor(&self) -> bool {
        self.is_impostor
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn is_eliminated(&self) -> bool {
        self.is_eliminated
    }

    pub fn is_active(&self) -> bool {
        !self.is_eliminated
    }

    pub fn words_said(&self) -> &[String] {
        &self.words_said
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

/// One ballot in the current voting attempt (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub voter_id: String,
    pub target_id: String,
    pub justification: String,
}

/// A line spoken during the debate (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateMessage {
    pub player_id: String,
    pub message: String,
    /// Arrival order within the game, starting at 0
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
}

/// Which side won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Innocents,
    Impostor,
}

/// The canonical record of one game (Entity)
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub(crate) id: String,
    pub(crate) phase: GamePhase,
    pub(crate) players: Vec<Player>,
    pub(crate) secret_word: String,
    pub(crate) category: Option<String>,
    pub(crate) impostor_id: String,
    /// Announced length of the debate
    pub(crate) debate_duration_secs: u64,
    pub(crate) round: u32,
    pub(crate) current_turn: usize,
    pub(crate) debate_messages: Vec<DebateMessage>,
    pub(crate) next_message_seq: u64,
    pub(crate) votes: Vec<Vote>,
    pub(crate) eliminated: Vec<String>,
    pub(crate) result: Option<GameResult>,
    pub(crate) winner: Option<Winner>,
    pub(crate) impostor_guess: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Game {
    /// Assemble a game in [`GamePhase::Setup`] with the impostor assigned.
    ///
    /// Player ids must be unique and `impostor_id` must name one of them.
    pub fn new(
        id: impl Into<String>,
        mut players: Vec<Player>,
        secret_word: impl Into<String>,
        impostor_id: impl Into<String>,
    ) -> Result<Self, GameSetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameSetupError::InvalidPlayerCount {
                requested: players.len(),
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        let impostor_id = impostor_id.into();
        let mut found = false;
        for player in &mut players {
            player.is_impostor = player.id == impostor_id;
            found |= player.is_impostor;
        }
        if !found {
            return Err(GameSetupError::UnknownPlayer(impostor_id));
        }

        let secret_word = secret_word.into();
        if secret_word.trim().is_empty() {
            return Err(GameSetupError::EmptyWordList);
        }

        Ok(Self {
            id: id.into(),
            phase: GamePhase::Setup,
            players,
            secret_word,
            category: None,
            impostor_id,
            debate_duration_secs: DEFAULT_DEBATE_DURATION_SECS,
            round: 1,
            current_turn: 0,
            debate_messages: Vec::new(),
            next_message_seq: 0,
            votes: Vec::new(),
            eliminated: Vec::new(),
            result: None,
            winner: None,
            impostor_guess: None,
            created_at: Utc::now(),
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_debate_duration_secs(mut self, secs: u64) -> Self {
        self.debate_duration_secs = secs;
        self
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn impostor_id(&self) -> &str {
        &self.impostor_id
    }

    pub fn debate_duration_secs(&self) -> u64 {
        self.debate_duration_secs
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn debate_messages(&self) -> &[DebateMessage] {
        &self.debate_messages
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn impostor_guess(&self) -> Option<&str> {
        self.impostor_guess.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ==================== Queries ====================

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn impostor(&self) -> Option<&Player> {
        self.player(&self.impostor_id)
    }

    /// Non-eliminated players in current speaking order
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Non-eliminated players other than the impostor
    pub fn active_innocent_count(&self) -> usize {
        self.active_players().filter(|p| !p.is_impostor).count()
    }

    /// The active player whose turn it is in the word round
    pub fn current_player(&self) -> Option<&Player> {
        self.active_players().nth(self.current_turn)
    }

    pub fn human(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human)
    }

    pub fn has_active_human(&self) -> bool {
        self.human().is_some_and(Player::is_active)
    }

    /// Word a player is told at the reveal
    pub fn private_word_for(&self, player: &Player) -> &str {
        if player.is_impostor {
            IMPOSTOR_MARKER
        } else {
            &self.secret_word
        }
    }

    pub fn vote_of(&self, voter_id: &str) -> Option<&Vote> {
        self.votes.iter().find(|v| v.voter_id == voter_id)
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.vote_of(voter_id).is_some()
    }

    /// Resolve a display name to a player, ignoring case and surrounding space
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.display_name.to_lowercase() == wanted)
    }

    pub fn display_name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.player(id).map(Player::display_name).unwrap_or(id)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::five_player_game;
    use super::*;

    #[test]
    fn test_exactly_one_impostor() {
        let game = five_player_game("playa", 2);
        let impostors: Vec<_> = game.players().iter().filter(|p| p.is_impostor()).collect();
        assert_eq!(impostors.len(), 1);
        assert_eq!(impostors[0].id(), "player_2");
        assert_eq!(game.impostor_id(), "player_2");
    }

    #[test]
    fn test_new_game_starts_in_setup() {
        let game = five_player_game("playa", 0);
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.round(), 1);
        assert_eq!(game.current_turn(), 0);
        assert!(game.result().is_none());
    }

    #[test]
    fn test_rejects_unknown_impostor() {
        let players = vec![
            Player::ai("a", "A", Model::new("m"), "#000"),
            Player::ai("b", "B", Model::new("m"), "#000"),
            Player::ai("c", "C", Model::new("m"), "#000"),
        ];
        let err = Game::new("g", players, "sol", "z").unwrap_err();
        assert_eq!(err, GameSetupError::UnknownPlayer("z".into()));
    }

    #[test]
    fn test_rejects_bad_player_count() {
        let players = vec![
            Player::ai("a", "A", Model::new("m"), "#000"),
            Player::ai("b", "B", Model::new("m"), "#000"),
        ];
        assert!(matches!(
            Game::new("g", players, "sol", "a"),
            Err(GameSetupError::InvalidPlayerCount { requested: 2, .. })
        ));
    }

    #[test]
    fn test_private_word() {
        let game = five_player_game("playa", 1);
        let impostor = game.player("player_1").unwrap();
        let innocent = game.player("player_0").unwrap();
        assert_eq!(game.private_word_for(impostor), IMPOSTOR_MARKER);
        assert_eq!(game.private_word_for(innocent), "playa");
    }

    #[test]
    fn test_player_by_name_ignores_case() {
        let game = five_player_game("playa", 1);
        assert_eq!(game.player_by_name(" gamma ").unwrap().id(), "player_2");
        assert!(game.player_by_name("Omega").is_none());
    }

    #[test]
    fn test_human_has_no_model() {
        let human = Player::human("player_0", "Ana");
        assert!(human.is_human());
        assert!(human.model().is_none());
        assert_eq!(human.color(), HUMAN_COLOR);
    }
}
