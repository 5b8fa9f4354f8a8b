//! Create Game use case
//!
//! Deals a secret word, seats the players and wires a [`GameController`]
//! for the new game. The game is returned in `SETUP`; nothing runs until
//! the controller is driven.

use crate::config::ControllerParams;
use crate::ports::broadcaster::{Broadcaster, NoBroadcast};
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::human_action::{HumanActionSender, human_action_channel};
use crate::ports::inference_client::InferenceClient;
use crate::ports::word_provider::WordProvider;
use crate::use_cases::game_controller::GameController;
use impostor_domain::{
    GameConfig, GameManager, GameSetupError, RosterEntry, SharedLeaderboard, assemble_game,
    default_pool,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Length of the short game id
const GAME_ID_LEN: usize = 8;

/// A seated game and the handle for its human input
pub struct PreparedGame<I: InferenceClient + 'static> {
    pub controller: GameController<I>,
    pub actions: HumanActionSender,
}

impl<I: InferenceClient + 'static> PreparedGame<I> {
    pub fn id(&self) -> &str {
        self.controller.game().id()
    }
}

/// Use case for creating games
pub struct CreateGameUseCase<I: InferenceClient + 'static> {
    inference: Arc<I>,
    words: Arc<dyn WordProvider>,
    broadcaster: Arc<dyn Broadcaster>,
    conversation_logger: Arc<dyn ConversationLogger>,
    pool: Vec<RosterEntry>,
    leaderboard: SharedLeaderboard,
    params: ControllerParams,
}

impl<I: InferenceClient + 'static> CreateGameUseCase<I> {
    pub fn new(
        inference: Arc<I>,
        words: Arc<dyn WordProvider>,
        leaderboard: SharedLeaderboard,
    ) -> Self {
        Self {
            inference,
            words,
            broadcaster: Arc::new(NoBroadcast),
            conversation_logger: Arc::new(NoConversationLogger),
            pool: default_pool(),
            leaderboard,
            params: ControllerParams::default(),
        }
    }

    pub fn with_broadcaster(mut self, broadcaster: Arc<dyn Broadcaster>) -> Self {
        self.broadcaster = broadcaster;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Roster pool the seats are drawn from
    pub fn with_pool(mut self, pool: Vec<RosterEntry>) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_params(mut self, params: ControllerParams) -> Self {
        self.params = params;
        self
    }

    pub fn leaderboard(&self) -> &SharedLeaderboard {
        &self.leaderboard
    }

    pub fn execute(&self, config: &GameConfig) -> Result<PreparedGame<I>, GameSetupError> {
        let secret = self
            .words
            .next_secret_word()
            .ok_or(GameSetupError::EmptyWordList)?;

        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(GAME_ID_LEN);

        let mut rng = match self.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let game = assemble_game(id, config, &self.pool, secret, &mut rng)?;

        info!(
            game = game.id(),
            players = game.players().len(),
            category = game.category().unwrap_or("-"),
            "Game created"
        );

        let manager = match self.params.seed {
            Some(seed) => GameManager::with_seed(game, self.leaderboard.clone(), seed),
            None => GameManager::new(game, self.leaderboard.clone()),
        };
        let (actions, receiver) = human_action_channel();
        let controller = GameController::new(
            manager,
            self.inference.clone(),
            self.broadcaster.clone(),
            receiver,
            self.params.clone(),
        )
        .with_conversation_logger(self.conversation_logger.clone());

        Ok(PreparedGame {
            controller,
            actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::word_provider::FixedWord;
    use crate::testing::ScriptedInference;
    use impostor_domain::{GamePhase, Leaderboard, SecretWord};

    struct EmptyWords;

    impl WordProvider for EmptyWords {
        fn next_secret_word(&self) -> Option<SecretWord> {
            None
        }
    }

    fn use_case(words: Arc<dyn WordProvider>) -> CreateGameUseCase<ScriptedInference> {
        let inference = Arc::new(ScriptedInference::new(|_, _| Ok("sand".to_string())));
        CreateGameUseCase::new(inference, words, Leaderboard::new().shared())
            .with_params(ControllerParams::default().with_seed(42))
    }

    #[test]
    fn test_creates_game_in_setup() {
        let use_case = use_case(Arc::new(FixedWord::new("playa", "places")));
        let prepared = use_case.execute(&GameConfig::default()).unwrap();
        let game = prepared.controller.game();

        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.id().len(), GAME_ID_LEN);
        assert!(game.id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(game.players().len(), 5);
        assert_eq!(game.secret_word(), "playa");
        assert_eq!(game.category(), Some("places"));
        assert_eq!(game.players().iter().filter(|p| p.is_impostor()).count(), 1);
    }

    #[test]
    fn test_registers_models_on_leaderboard() {
        let use_case = use_case(Arc::new(FixedWord::new("playa", "places")));
        use_case
            .execute(&GameConfig::default().with_player_count(4))
            .unwrap();

        let board = use_case.leaderboard().lock().unwrap();
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_human_seat() {
        let use_case = use_case(Arc::new(FixedWord::new("playa", "places")));
        let config = GameConfig::default()
            .with_human("Ana")
            .with_human_position(2);
        let prepared = use_case.execute(&config).unwrap();

        let human = prepared.controller.game().human().unwrap();
        assert_eq!(human.display_name(), "Ana");
        assert_eq!(human.id(), "player_2");
    }

    #[test]
    fn test_empty_word_list() {
        let use_case = use_case(Arc::new(EmptyWords));
        let result = use_case.execute(&GameConfig::default());
        assert!(matches!(result, Err(GameSetupError::EmptyWordList)));
    }

    #[test]
    fn test_invalid_player_count() {
        let use_case = use_case(Arc::new(FixedWord::new("playa", "places")));
        let result = use_case.execute(&GameConfig::default().with_player_count(9));
        assert!(matches!(
            result,
            Err(GameSetupError::InvalidPlayerCount { requested: 9, .. })
        ));
    }
}
