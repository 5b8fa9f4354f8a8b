//! Interactive human player for the terminal.
//!
//! Each stdin line is read against the live game snapshot and turned into
//! the action that makes sense for the current phase:
//!
//! | Phase | Line | Action |
//! |-------|------|--------|
//! | word round (your turn) | `lighthouse` | submit the first word |
//! | debate | `Beta is too vague` | post the whole line |
//! | voting | `Beta` or `2` | vote by name or by list number |
//! | impostor guess (you are the impostor) | `beach` | guess the word |
//!
//! Anything else is rejected locally with a hint; the controller never
//! sees it.

use colored::Colorize;
use impostor_application::{GameHandle, HumanAction};
use impostor_domain::{Game, GamePhase, Player};
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::debug;

/// Why a line was not turned into an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRejected {
    Empty,
    NotYourTurn { current: String },
    Eliminated,
    AlreadyVoted,
    UnknownTarget(String),
    Waiting,
    GameOver,
}

impl std::fmt::Display for InputRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputRejected::Empty => write!(f, "Type something first."),
            InputRejected::NotYourTurn { current } => {
                write!(f, "Not your turn yet, {current} is speaking.")
            }
            InputRejected::Eliminated => write!(f, "You have been eliminated; enjoy the show."),
            InputRejected::AlreadyVoted => write!(f, "You already voted this round."),
            InputRejected::UnknownTarget(name) => {
                write!(f, "'{name}' is not someone you can vote for.")
            }
            InputRejected::Waiting => write!(f, "Nothing to do right now, hold on."),
            InputRejected::GameOver => write!(f, "The game is over."),
        }
    }
}

/// Players the human may vote for, in seat order
fn candidates<'a>(game: &'a Game, player_id: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
    game.active_players().filter(move |p| p.id() != player_id)
}

/// Turn one input line into an action for the player `player_id`
pub fn interpret(line: &str, player_id: &str, game: &Game) -> Result<HumanAction, InputRejected> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputRejected::Empty);
    }
    if game.phase().is_terminal() {
        return Err(InputRejected::GameOver);
    }
    let Some(me) = game.player(player_id) else {
        return Err(InputRejected::Waiting);
    };

    if game.phase() == GamePhase::ImpostorGuess {
        return if me.is_impostor() {
            Ok(HumanAction::SubmitGuess {
                player_id: player_id.to_string(),
                guess: line.to_string(),
            })
        } else {
            Err(InputRejected::Waiting)
        };
    }
    if me.is_eliminated() {
        return Err(InputRejected::Eliminated);
    }

    match game.phase() {
        GamePhase::WordRound => match game.current_player() {
            Some(current) if current.id() == player_id => Ok(HumanAction::SubmitWord {
                player_id: player_id.to_string(),
                word: line.split_whitespace().next().unwrap_or(line).to_string(),
            }),
            Some(current) => Err(InputRejected::NotYourTurn {
                current: current.display_name().to_string(),
            }),
            None => Err(InputRejected::Waiting),
        },
        GamePhase::Debate => Ok(HumanAction::SubmitDebateMessage {
            player_id: player_id.to_string(),
            message: line.to_string(),
        }),
        GamePhase::Voting => {
            if game.has_voted(player_id) {
                return Err(InputRejected::AlreadyVoted);
            }
            let target = match line.parse::<usize>() {
                Ok(n) if n >= 1 => candidates(game, player_id).nth(n - 1),
                _ => candidates(game, player_id)
                    .find(|p| p.display_name().eq_ignore_ascii_case(line)),
            };
            match target {
                Some(target) => Ok(HumanAction::CastVote {
                    player_id: player_id.to_string(),
                    target_id: target.id().to_string(),
                }),
                None => Err(InputRejected::UnknownTarget(line.to_string())),
            }
        }
        _ => Err(InputRejected::Waiting),
    }
}

/// What the human is expected to type in the current phase, if anything
pub fn prompt_for(game: &Game, player_id: &str) -> Option<String> {
    let me = game.player(player_id)?;
    match game.phase() {
        GamePhase::Debate if me.is_active() => {
            Some("Debate: type a message and press enter (optional).".to_string())
        }
        GamePhase::Voting if me.is_active() && !game.has_voted(player_id) => {
            let list: Vec<String> = candidates(game, player_id)
                .enumerate()
                .map(|(i, p)| format!("  {}. {}", i + 1, p.display_name()))
                .collect();
            Some(format!(
                "Vote: type a name or number.\n{}",
                list.join("\n")
            ))
        }
        GamePhase::ImpostorGuess if me.is_impostor() => {
            Some("You were caught! Guess the secret word:".to_string())
        }
        _ => None,
    }
}

/// Lines typed on stdin, read on a dedicated thread.
///
/// The thread ends at end of input; it never keeps the process alive.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (sender, receiver) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Forwards the human's typed lines to one game.
pub struct HumanConsole {
    player_id: String,
    game: GameHandle,
}

impl HumanConsole {
    pub fn new(player_id: impl Into<String>, game: GameHandle) -> Self {
        Self {
            player_id: player_id.into(),
            game,
        }
    }

    /// Run until the game ends or the input closes.
    pub async fn run(self, lines: &mut mpsc::UnboundedReceiver<String>) {
        let mut snapshot = self.game.subscribe();
        let mut last_phase = snapshot.borrow().phase();

        loop {
            tokio::select! {
                changed = snapshot.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let game = snapshot.borrow_and_update().clone();
                    if game.phase().is_terminal() {
                        break;
                    }
                    if game.phase() != last_phase {
                        last_phase = game.phase();
                        if let Some(prompt) = prompt_for(&game, &self.player_id) {
                            println!("{}", prompt.yellow());
                        }
                    }
                }
                line = lines.recv() => {
                    let Some(line) = line else {
                        debug!("Input closed, human console stopping");
                        break;
                    };
                    let game = snapshot.borrow().clone();
                    match interpret(&line, &self.player_id, &game) {
                        Ok(action) => {
                            debug!(action = action.kind(), "Human action");
                            if !self.game.submit(action) {
                                break;
                            }
                        }
                        Err(InputRejected::Empty) => {}
                        Err(rejected) => println!("{}", rejected.to_string().dimmed()),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impostor_domain::{GameManager, Leaderboard, Model};

    /// Alfa, Ana (human), Beta, Gamma; Beta is the impostor
    fn manager(impostor: &str) -> GameManager {
        let players = vec![
            Player::ai("player_0", "Alfa", Model::new("gemma3:4b"), "#FF6B6B"),
            Player::human("player_1", "Ana"),
            Player::ai("player_2", "Beta", Model::new("mistral:7b"), "#4ECDC4"),
            Player::ai("player_3", "Gamma", Model::new("qwen3:8b"), "#45B7D1"),
        ];
        let game = Game::new("game0001", players, "beach", impostor).unwrap();
        let mut manager = GameManager::with_seed(game, Leaderboard::new().shared(), 3);
        manager.start_game();
        manager.advance_to_word_round();
        manager
    }

    fn finish_word_round(manager: &mut GameManager) {
        while let Some(id) = manager.game().current_player().map(|p| p.id().to_string()) {
            if !manager.record_word(&id, "sand") {
                break;
            }
        }
    }

    #[test]
    fn test_word_only_on_own_turn() {
        let mut manager = manager("player_2");
        let human = "player_1";

        loop {
            let current = manager.game().current_player().unwrap().id().to_string();
            let result = interpret("  lighthouse keeper ", human, manager.game());
            if current == human {
                assert_eq!(
                    result,
                    Ok(HumanAction::SubmitWord {
                        player_id: human.into(),
                        word: "lighthouse".into(),
                    })
                );
                break;
            }
            assert!(matches!(result, Err(InputRejected::NotYourTurn { .. })));
            manager.record_word(&current, "sand");
        }
    }

    #[test]
    fn test_debate_line_is_posted_whole() {
        let mut manager = manager("player_2");
        finish_word_round(&mut manager);
        assert_eq!(manager.phase(), GamePhase::Debate);

        let action = interpret("Beta sounds unsure", "player_1", manager.game()).unwrap();
        assert_eq!(
            action,
            HumanAction::SubmitDebateMessage {
                player_id: "player_1".into(),
                message: "Beta sounds unsure".into(),
            }
        );
        assert!(prompt_for(manager.game(), "player_1").is_some());
    }

    #[test]
    fn test_vote_by_name_or_number() {
        let mut manager = manager("player_2");
        finish_word_round(&mut manager);
        manager.start_voting();

        let by_name = interpret("beta", "player_1", manager.game()).unwrap();
        // Candidates exclude the human: 1 Alfa, 2 Beta, 3 Gamma
        let by_number = interpret("2", "player_1", manager.game()).unwrap();
        let expected = HumanAction::CastVote {
            player_id: "player_1".into(),
            target_id: "player_2".into(),
        };
        assert_eq!(by_name, expected);
        assert_eq!(by_number, expected);

        assert_eq!(
            interpret("Ana", "player_1", manager.game()),
            Err(InputRejected::UnknownTarget("Ana".into()))
        );
        assert_eq!(
            interpret("9", "player_1", manager.game()),
            Err(InputRejected::UnknownTarget("9".into()))
        );

        let prompt = prompt_for(manager.game(), "player_1").unwrap();
        assert!(prompt.contains("2. Beta"));
        assert!(!prompt.contains("Ana"));
    }

    #[test]
    fn test_second_vote_is_rejected() {
        let mut manager = manager("player_2");
        finish_word_round(&mut manager);
        manager.start_voting();
        manager.record_vote("player_1", "player_2", "");

        assert_eq!(
            interpret("Alfa", "player_1", manager.game()),
            Err(InputRejected::AlreadyVoted)
        );
        assert!(prompt_for(manager.game(), "player_1").is_none());
    }

    #[test]
    fn test_impostor_human_may_guess_after_elimination() {
        let mut manager = manager("player_1");
        finish_word_round(&mut manager);
        manager.start_voting();
        for voter in ["player_0", "player_2", "player_3"] {
            manager.record_vote(voter, "player_1", "");
        }
        manager.record_vote("player_1", "player_0", "");
        manager.process_elimination();
        assert_eq!(manager.phase(), GamePhase::ImpostorGuess);

        assert_eq!(
            interpret("beach", "player_1", manager.game()),
            Ok(HumanAction::SubmitGuess {
                player_id: "player_1".into(),
                guess: "beach".into(),
            })
        );
        assert_eq!(
            interpret("beach", "player_0", manager.game()),
            Err(InputRejected::Waiting)
        );
    }

    #[test]
    fn test_empty_and_setup_lines() {
        let players = vec![
            Player::ai("player_0", "Alfa", Model::new("m"), "#000000"),
            Player::human("player_1", "Ana"),
            Player::ai("player_2", "Beta", Model::new("m"), "#000000"),
        ];
        let game = Game::new("g", players, "beach", "player_0").unwrap();

        assert_eq!(interpret("   ", "player_1", &game), Err(InputRejected::Empty));
        assert_eq!(interpret("hi", "player_1", &game), Err(InputRejected::Waiting));
    }
}
