//! Roster pool and game setup
//!
//! Turns a [`GameConfig`] into seated players, picks the impostor and
//! produces a [`Game`] in the setup phase.

use super::entities::{DEFAULT_DEBATE_DURATION_SECS, Game, MAX_PLAYERS, MIN_PLAYERS, Player};
use crate::core::error::GameSetupError;
use crate::core::model::Model;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Names handed out to seats when one model plays every chair
pub const SEAT_NAMES: &[(&str, &str)] = &[
    ("Alfa", "#FF6B6B"),
    ("Beta", "#4ECDC4"),
    ("Gamma", "#45B7D1"),
    ("Delta", "#96CEB4"),
    ("Epsilon", "#DDA0DD"),
    ("Zeta", "#FFA500"),
    ("Sigma", "#FF69B4"),
];

/// Default table size
pub const DEFAULT_PLAYER_COUNT: usize = 5;

/// A model available to sit at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub model: Model,
    pub display_name: String,
    pub color: String,
}

impl RosterEntry {
    pub fn new(model: &str, display_name: &str, color: &str) -> Self {
        Self {
            model: Model::new(model),
            display_name: display_name.to_string(),
            color: color.to_string(),
        }
    }

    /// Matches either the model tag or the short display name
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.model.as_str().eq_ignore_ascii_case(name) || self.display_name.eq_ignore_ascii_case(name)
    }
}

/// Models shipped as the default pool
pub fn default_pool() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new("gemma3:4b", "gemma3", "#FF6B6B"),
        RosterEntry::new("mistral:7b", "mistral", "#4ECDC4"),
        RosterEntry::new("olmo2:7b", "olmo2", "#45B7D1"),
        RosterEntry::new("dolphin-mistral:7b", "dolphin", "#96CEB4"),
        RosterEntry::new("qwen3:8b", "qwen3", "#DDA0DD"),
        RosterEntry::new("llama3.2:3b-instruct-q4_0", "llama3.2", "#FFA500"),
    ]
}

/// Who sits at the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    AllAi,
    HumanPlayer,
}

/// Game creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Seat taken by the human; random when unset
    pub human_position: Option<usize>,
    pub human_name: String,
    /// Pool entries (model tag or display name) to seat; empty = first `player_count`
    pub selected_players: Vec<String>,
    /// Seat this model in every chair under the [`SEAT_NAMES`]
    pub single_model: Option<Model>,
    pub player_count: usize,
    /// Advertised debate length in seconds, informational for observers
    pub debate_duration_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::AllAi,
            human_position: None,
            human_name: "Human".to_string(),
            selected_players: Vec::new(),
            single_model: None,
            player_count: DEFAULT_PLAYER_COUNT,
            debate_duration_secs: DEFAULT_DEBATE_DURATION_SECS,
        }
    }
}

impl GameConfig {
    pub fn with_human(mut self, name: impl Into<String>) -> Self {
        self.mode = GameMode::HumanPlayer;
        self.human_name = name.into();
        self
    }

    pub fn with_human_position(mut self, position: usize) -> Self {
        self.human_position = Some(position);
        self
    }

    pub fn with_players(mut self, players: Vec<String>) -> Self {
        self.selected_players = players;
        self
    }

    pub fn with_single_model(mut self, model: Model) -> Self {
        self.single_model = Some(model);
        self
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_debate_duration_secs(mut self, secs: u64) -> Self {
        self.debate_duration_secs = secs;
        self
    }
}

/// A secret word and the category it was drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretWord {
    pub word: String,
    pub category: String,
}

fn check_count(count: usize) -> Result<(), GameSetupError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(GameSetupError::InvalidPlayerCount {
            requested: count,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        })
    }
}

/// Resolve the configured seats against the pool, in pool order.
fn pick_seats(config: &GameConfig, pool: &[RosterEntry]) -> Result<Vec<RosterEntry>, GameSetupError> {
    if let Some(model) = &config.single_model {
        check_count(config.player_count)?;
        return Ok(SEAT_NAMES
            .iter()
            .take(config.player_count)
            .map(|(name, color)| RosterEntry::new(model.as_str(), name, color))
            .collect());
    }

    if config.selected_players.is_empty() {
        check_count(config.player_count)?;
        if pool.len() < config.player_count {
            return Err(GameSetupError::InvalidPlayerCount {
                requested: config.player_count,
                min: MIN_PLAYERS,
                max: pool.len().min(MAX_PLAYERS),
            });
        }
        return Ok(pool.iter().take(config.player_count).cloned().collect());
    }

    let seats = config
        .selected_players
        .iter()
        .map(|name| {
            pool.iter()
                .find(|entry| entry.matches(name))
                .cloned()
                .ok_or_else(|| GameSetupError::UnknownModel(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_count(seats.len())?;
    Ok(seats)
}

/// Seat players, assign the impostor and build the game record.
///
/// Seats are shuffled before the human takes their chair, so the human
/// replaces whichever model lands at `human_position`.
pub fn assemble_game<R: Rng + ?Sized>(
    id: impl Into<String>,
    config: &GameConfig,
    pool: &[RosterEntry],
    secret: SecretWord,
    rng: &mut R,
) -> Result<Game, GameSetupError> {
    let mut seats = pick_seats(config, pool)?;
    seats.shuffle(rng);

    let human_seat = match config.mode {
        GameMode::AllAi => None,
        GameMode::HumanPlayer => {
            let position = config
                .human_position
                .unwrap_or_else(|| rng.random_range(0..seats.len()));
            if position >= seats.len() {
                return Err(GameSetupError::InvalidHumanPosition {
                    position,
                    players: seats.len(),
                });
            }
            Some(position)
        }
    };

    let players: Vec<Player> = seats
        .into_iter()
        .enumerate()
        .map(|(i, seat)| {
            let id = format!("player_{i}");
            if human_seat == Some(i) {
                Player::human(id, config.human_name.clone())
            } else {
                Player::ai(id, seat.display_name, seat.model, seat.color)
            }
        })
        .collect();

    let impostor = rng.random_range(0..players.len());
    let impostor_id = players[impostor].id().to_string();

    Ok(Game::new(id, players, secret.word, impostor_id)?
        .with_category(secret.category)
        .with_debate_duration_secs(config.debate_duration_secs))
}
