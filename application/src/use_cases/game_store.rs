//! Game store
//!
//! Registry of running games, owned by whatever composes the outer layer.
//! Each game runs its controller in its own tokio task; the store keeps the
//! handles needed to talk to it (human action sender, live snapshot) and
//! the join handle for its final state.

use crate::ports::human_action::{HumanAction, HumanActionSender};
use crate::ports::inference_client::InferenceClient;
use crate::use_cases::create_game::{CreateGameUseCase, PreparedGame};
use impostor_domain::{
    Game, GameConfig, GamePhase, GameSetupError, LeaderboardEntry, SharedLeaderboard,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Cheap, cloneable access to one running game
#[derive(Clone)]
pub struct GameHandle {
    id: String,
    actions: HumanActionSender,
    snapshot: watch::Receiver<Game>,
}

impl GameHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state of the game
    pub fn snapshot(&self) -> Game {
        self.snapshot.borrow().clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.snapshot.borrow().phase()
    }

    pub fn subscribe(&self) -> watch::Receiver<Game> {
        self.snapshot.clone()
    }

    /// Hand an action to the controller. `false` once the game has finished.
    pub fn submit(&self, action: HumanAction) -> bool {
        self.actions.send(action).is_ok()
    }

    /// Resolves once the game reaches `GAME_OVER` or its task ends
    pub async fn finished(&self) -> Game {
        let mut snapshot = self.snapshot.clone();
        if let Ok(game) = snapshot.wait_for(|game| game.phase().is_terminal()).await {
            return game.clone();
        }
        snapshot.borrow().clone()
    }
}

struct Entry {
    handle: GameHandle,
    task: Option<JoinHandle<Game>>,
}

/// Registry of games keyed by game id
pub struct GameStore<I: InferenceClient + 'static> {
    create_game: CreateGameUseCase<I>,
    games: Mutex<HashMap<String, Entry>>,
}

impl<I: InferenceClient + 'static> GameStore<I> {
    pub fn new(create_game: CreateGameUseCase<I>) -> Self {
        Self {
            create_game,
            games: Mutex::new(HashMap::new()),
        }
    }

    fn games(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.games
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a game and start playing it in the background
    pub fn create(&self, config: &GameConfig) -> Result<GameHandle, GameSetupError> {
        let PreparedGame {
            mut controller,
            actions,
        } = self.create_game.execute(config)?;

        let id = controller.game().id().to_string();
        let handle = GameHandle {
            id: id.clone(),
            actions,
            snapshot: controller.subscribe(),
        };
        let task = tokio::spawn(async move { controller.run().await });

        self.games().insert(
            id.clone(),
            Entry {
                handle: handle.clone(),
                task: Some(task),
            },
        );
        debug!(game = %id, "Game registered");
        Ok(handle)
    }

    pub fn get(&self, id: &str) -> Option<GameHandle> {
        self.games().get(id).map(|entry| entry.handle.clone())
    }

    pub fn snapshot(&self, id: &str) -> Option<Game> {
        self.get(id).map(|handle| handle.snapshot())
    }

    /// Handles of every registered game, oldest first
    pub fn list(&self) -> Vec<GameHandle> {
        let mut handles: Vec<GameHandle> = self
            .games()
            .values()
            .map(|entry| entry.handle.clone())
            .collect();
        handles.sort_by_key(|handle| handle.snapshot.borrow().created_at());
        handles
    }

    /// Forget a game. A game still in progress keeps running to the end.
    pub fn remove(&self, id: &str) -> Option<GameHandle> {
        self.games().remove(id).map(|entry| entry.handle)
    }

    /// Wait for a game's task and return its final state
    pub async fn join(&self, id: &str) -> Option<Game> {
        let (handle, task) = {
            let mut games = self.games();
            let entry = games.get_mut(id)?;
            (entry.handle.clone(), entry.task.take())
        };

        match task {
            Some(task) => match task.await {
                Ok(game) => Some(game),
                Err(e) => {
                    warn!(game = id, "Game task failed: {}", e);
                    Some(handle.snapshot())
                }
            },
            None => Some(handle.finished().await),
        }
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.shared_leaderboard()
            .lock()
            .map(|board| board.snapshot())
            .unwrap_or_else(|poisoned| poisoned.into_inner().snapshot())
    }

    pub fn shared_leaderboard(&self) -> &SharedLeaderboard {
        self.create_game.leaderboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ControllerParams, Pacing};
    use crate::ports::word_provider::FixedWord;
    use crate::testing::{ScriptedInference, last_request};
    use impostor_domain::Leaderboard;
    use std::sync::Arc;

    fn store() -> GameStore<ScriptedInference> {
        let inference = Arc::new(ScriptedInference::new(|_, messages| {
            let reply = if last_request(messages).contains("YOUR TURN: VOTE") {
                "I can't tell"
            } else {
                "sand"
            };
            Ok(reply.to_string())
        }));
        let create_game = CreateGameUseCase::new(
            inference,
            Arc::new(FixedWord::new("playa", "places")),
            Leaderboard::new().shared(),
        )
        .with_params(
            ControllerParams::default()
                .with_debate_rounds(1)
                .with_pacing(Pacing::none()),
        );
        GameStore::new(create_game)
    }

    #[tokio::test]
    async fn test_games_run_to_completion() {
        let store = store();
        let first = store.create(&GameConfig::default()).unwrap();
        let second = store
            .create(&GameConfig::default().with_player_count(4))
            .unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(store.list().len(), 2);

        let first = store.join(first.id()).await.unwrap();
        let second = store.join(second.id()).await.unwrap();
        assert_eq!(first.phase(), GamePhase::GameOver);
        assert_eq!(second.phase(), GamePhase::GameOver);

        // Each game's models played once; the first four models sat twice
        let board = store.leaderboard();
        let games_played: u32 = board.iter().map(|e| e.games_played).sum();
        assert_eq!(games_played, 9);
    }

    #[tokio::test]
    async fn test_snapshot_and_finished() {
        let store = store();
        let handle = store.create(&GameConfig::default()).unwrap();

        let game = handle.finished().await;
        assert!(game.phase().is_terminal());
        assert_eq!(store.snapshot(handle.id()).unwrap().phase(), GamePhase::GameOver);
        assert_eq!(store.join(handle.id()).await.unwrap().phase(), GamePhase::GameOver);
    }

    #[tokio::test]
    async fn test_remove_forgets_game() {
        let store = store();
        let handle = store.create(&GameConfig::default()).unwrap();

        assert!(store.remove(handle.id()).is_some());
        assert!(store.get(handle.id()).is_none());
        assert!(store.snapshot(handle.id()).is_none());
        assert!(store.join(handle.id()).await.is_none());

        // The game itself still plays out
        assert_eq!(handle.finished().await.phase(), GamePhase::GameOver);
    }

    #[tokio::test]
    async fn test_invalid_config_registers_nothing() {
        let store = store();
        let result = store.create(&GameConfig::default().with_player_count(2));
        assert!(result.is_err());
        assert!(store.list().is_empty());
    }
}
