//! Console narration of a game

use super::formatter::EventFormatter;
use colored::{ColoredString, Colorize};
use impostor_application::{FinalScore, GameEvent, GameEventKind, VoteCount};
use impostor_domain::game::entities::IMPOSTOR_MARKER;
use impostor_domain::{Game, GamePhase, LeaderboardEntry, Winner};
use std::collections::HashMap;

const RULE_WIDTH: usize = 60;

/// Renders game events as coloured text.
///
/// Player names are painted with the seat colour taken from the game the
/// formatter was built for.
#[derive(Debug, Default)]
pub struct ConsoleFormatter {
    seats: HashMap<String, Seat>,
}

#[derive(Debug)]
struct Seat {
    name: String,
    rgb: Option<(u8, u8, u8)>,
}

impl ConsoleFormatter {
    pub fn for_game(game: &Game) -> Self {
        let seats = game
            .players()
            .iter()
            .map(|p| {
                (
                    p.id().to_string(),
                    Seat {
                        name: p.display_name().to_string(),
                        rgb: parse_hex(p.color()),
                    },
                )
            })
            .collect();
        Self { seats }
    }

    /// Display name for a player id, falling back to the id itself
    pub fn name_of<'a>(&'a self, player_id: &'a str) -> &'a str {
        self.seats
            .get(player_id)
            .map(|s| s.name.as_str())
            .unwrap_or(player_id)
    }

    fn paint(&self, player_id: &str, name: &str) -> ColoredString {
        match self.seats.get(player_id).and_then(|s| s.rgb) {
            Some((r, g, b)) => name.truecolor(r, g, b).bold(),
            None => name.bold(),
        }
    }

    fn phase_header(phase: GamePhase, round: u32) -> Option<String> {
        let title = match phase {
            GamePhase::Setup | GamePhase::GameOver | GamePhase::Elimination => return None,
            GamePhase::WordReveal => "Dealing the secret word".to_string(),
            GamePhase::WordRound => format!("Round {round}: one word each"),
            GamePhase::Debate => format!("Round {round}: debate"),
            GamePhase::Voting => format!("Round {round}: voting"),
            GamePhase::ImpostorGuess => "The impostor's last chance".to_string(),
        };
        Some(format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40)))
    }

    fn word_reveal(category: Option<&str>, human_word: Option<&str>) -> String {
        let mut out = match category {
            Some(category) => format!("Category: {}", category.bold()),
            None => "The secret word has been dealt.".to_string(),
        };
        match human_word {
            Some(IMPOSTOR_MARKER) => {
                out.push_str(&format!(
                    "\n{}",
                    "You are the IMPOSTOR. Blend in and work out the word.".red().bold()
                ));
            }
            Some(word) => {
                out.push_str(&format!("\nYour word: {}", word.green().bold()));
            }
            None => {}
        }
        out
    }

    fn elimination(
        &self,
        player_id: &str,
        player_name: &str,
        was_impostor: bool,
        votes: &[VoteCount],
    ) -> String {
        let mut out = String::new();
        for count in votes {
            out.push_str(&format!(
                "  {:<12} {}\n",
                count.player_name,
                "#".repeat(count.votes).dimmed()
            ));
        }
        let verdict = if was_impostor {
            "They were the impostor!".green().bold()
        } else {
            "They were innocent.".red()
        };
        out.push_str(&format!(
            "{} is eliminated. {}",
            self.paint(player_id, player_name),
            verdict
        ));
        out
    }

    fn game_over(
        &self,
        winner: Winner,
        description: &str,
        secret_word: &str,
        impostor_id: &str,
        impostor_name: &str,
        scores: &[FinalScore],
    ) -> String {
        let line = "=".repeat(RULE_WIDTH);
        let headline = match winner {
            Winner::Innocents => description.green().bold(),
            Winner::Impostor => description.red().bold(),
        };

        let mut out = format!(
            "\n{}\n{:^width$}\n{}\n",
            line.cyan(),
            "GAME OVER",
            line.cyan(),
            width = RULE_WIDTH
        );
        out.push_str(&format!("{headline}\n"));
        out.push_str(&format!(
            "Secret word: {}   Impostor: {}\n\n",
            secret_word.bold(),
            self.paint(impostor_id, impostor_name)
        ));

        let mut ranked: Vec<&FinalScore> = scores.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        for score in ranked {
            let role = if score.is_impostor { "impostor" } else { "" };
            out.push_str(&format!(
                "  {:<12} {:>5}  {}\n",
                score.player_name,
                score.score,
                role.red()
            ));
        }
        out.push_str(&line.cyan().to_string());
        out
    }
}

impl EventFormatter for ConsoleFormatter {
    fn format_event(&self, event: &GameEvent) -> Option<String> {
        match &event.kind {
            GameEventKind::PhaseChange { phase, round, .. } => Self::phase_header(*phase, *round),
            GameEventKind::WordReveal {
                category,
                human_word,
                ..
            } => Some(Self::word_reveal(category.as_deref(), human_word.as_deref())),
            GameEventKind::PlayerTurn { is_human: true, .. } => Some(
                "Your turn: type one word related to the secret."
                    .yellow()
                    .to_string(),
            ),
            GameEventKind::PlayerTurn { .. } | GameEventKind::AiThinking { .. } => None,
            GameEventKind::PlayerWord {
                player_id,
                player_name,
                word,
            } => Some(format!("  {}: {}", self.paint(player_id, player_name), word)),
            GameEventKind::DebateRound { round, total } => {
                Some(format!("Exchange {round}/{total}").dimmed().to_string())
            }
            GameEventKind::NewDebateMessage {
                player_id,
                player_name,
                message,
            } => Some(format!("  {}: {}", self.paint(player_id, player_name), message)),
            GameEventKind::DebateEnded => Some("The debate is over.".dimmed().to_string()),
            GameEventKind::PlayerVoted {
                voter_id,
                voter_name,
                target_id,
                target_name,
                justification,
            } => {
                let mut line = format!(
                    "  {} votes for {}",
                    self.paint(voter_id, voter_name),
                    self.paint(target_id, target_name)
                );
                if !justification.trim().is_empty() {
                    line.push_str(&format!(" {}", format!("({justification})").dimmed()));
                }
                Some(line)
            }
            GameEventKind::VoteTie { tied, attempt } => Some(
                format!("Tie between {} (attempt {attempt}). Vote again!", tied.join(", "))
                    .yellow()
                    .bold()
                    .to_string(),
            ),
            GameEventKind::Elimination {
                player_id,
                player_name,
                was_impostor,
                votes,
            } => Some(self.elimination(player_id, player_name, *was_impostor, votes)),
            GameEventKind::ImpostorGuess {
                player_id,
                guess,
                correct,
                ..
            } => {
                let verdict = if *correct {
                    "Correct!".red().bold()
                } else {
                    "Wrong.".green().bold()
                };
                Some(format!(
                    "{} guesses \"{}\". {}",
                    self.paint(player_id, self.name_of(player_id)),
                    guess,
                    verdict
                ))
            }
            GameEventKind::GameOver {
                result,
                winner,
                secret_word,
                impostor_id,
                impostor_name,
                scores,
                ..
            } => Some(self.game_over(
                *winner,
                result.description(),
                secret_word,
                impostor_id,
                impostor_name,
                scores,
            )),
        }
    }
}

/// Lifetime standings, highest score first
pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut out = format!("{}\n", "Leaderboard".cyan().bold());
    out.push_str(&format!(
        "  {:<4}{:<14}{:>7}{:>7}{:>7}{:>9}{:>9}\n",
        "#", "Player", "Score", "Games", "Wins", "Impostor", "Accuracy"
    ));
    for (rank, entry) in entries.iter().enumerate() {
        let name = match parse_hex(&entry.color) {
            Some((r, g, b)) => entry.display_name.truecolor(r, g, b),
            None => entry.display_name.normal(),
        };
        out.push_str(&format!(
            "  {:<4}{:<14}{:>7}{:>7}{:>7}{:>9}{:>8.1}%\n",
            rank + 1,
            name,
            entry.score,
            entry.games_played,
            entry.wins(),
            entry.times_impostor,
            entry.vote_accuracy
        ));
    }
    out
}

/// `#RRGGBB` to an RGB triple
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use impostor_domain::{GameResult, Leaderboard, Model, Player};

    fn plain() {
        colored::control::set_override(false);
    }

    fn game() -> Game {
        let players = vec![
            Player::ai("player_0", "Alfa", Model::new("gemma3:4b"), "#FF6B6B"),
            Player::ai("player_1", "Beta", Model::new("mistral:7b"), "#4ECDC4"),
            Player::human("player_2", "Ana"),
        ];
        Game::new("game0001", players, "beach", "player_1").unwrap()
    }

    fn render(kind: GameEventKind) -> Option<String> {
        ConsoleFormatter::for_game(&game()).format_event(&GameEvent::new("game0001", kind))
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF6B6B"), Some((255, 107, 107)));
        assert_eq!(parse_hex("FF6B6B"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn test_word_reveal_shows_human_word() {
        plain();
        let text = render(GameEventKind::WordReveal {
            category: Some("places".into()),
            human_id: Some("player_2".into()),
            human_word: Some("beach".into()),
        })
        .unwrap();
        assert!(text.contains("Category: places"));
        assert!(text.contains("Your word: beach"));
    }

    #[test]
    fn test_word_reveal_for_impostor_hides_word() {
        plain();
        let text = render(GameEventKind::WordReveal {
            category: None,
            human_id: Some("player_2".into()),
            human_word: Some(IMPOSTOR_MARKER.into()),
        })
        .unwrap();
        assert!(text.contains("You are the IMPOSTOR"));
        assert!(!text.contains("Your word"));
    }

    #[test]
    fn test_ai_turn_and_thinking_are_silent() {
        assert!(
            render(GameEventKind::PlayerTurn {
                player_id: "player_0".into(),
                player_name: "Alfa".into(),
                is_human: false,
            })
            .is_none()
        );
        assert!(
            render(GameEventKind::AiThinking {
                player_id: "player_0".into(),
                thinking: true,
            })
            .is_none()
        );
        assert!(
            render(GameEventKind::PlayerTurn {
                player_id: "player_2".into(),
                player_name: "Ana".into(),
                is_human: true,
            })
            .is_some()
        );
    }

    #[test]
    fn test_vote_line() {
        plain();
        let text = render(GameEventKind::PlayerVoted {
            voter_id: "player_0".into(),
            voter_name: "Alfa".into(),
            target_id: "player_1".into(),
            target_name: "Beta".into(),
            justification: "too vague".into(),
        })
        .unwrap();
        assert_eq!(text, "  Alfa votes for Beta (too vague)");
    }

    #[test]
    fn test_elimination_lists_tally() {
        plain();
        let text = render(GameEventKind::Elimination {
            player_id: "player_1".into(),
            player_name: "Beta".into(),
            was_impostor: true,
            votes: vec![VoteCount {
                player_id: "player_1".into(),
                player_name: "Beta".into(),
                votes: 2,
            }],
        })
        .unwrap();
        assert!(text.contains("##"));
        assert!(text.ends_with("Beta is eliminated. They were the impostor!"));
    }

    #[test]
    fn test_impostor_guess_uses_seat_name() {
        plain();
        let text = render(GameEventKind::ImpostorGuess {
            player_id: "player_1".into(),
            guess: "sand".into(),
            correct: false,
            secret_word: "beach".into(),
        })
        .unwrap();
        assert_eq!(text, "Beta guesses \"sand\". Wrong.");
    }

    #[test]
    fn test_game_over_ranks_scores() {
        plain();
        let text = render(GameEventKind::GameOver {
            result: GameResult::InnocentsWin,
            winner: Winner::Innocents,
            secret_word: "beach".into(),
            impostor_id: "player_1".into(),
            impostor_name: "Beta".into(),
            impostor_guess: Some("sand".into()),
            scores: vec![
                FinalScore {
                    player_id: "player_1".into(),
                    player_name: "Beta".into(),
                    is_impostor: true,
                    score: 0,
                },
                FinalScore {
                    player_id: "player_0".into(),
                    player_name: "Alfa".into(),
                    is_impostor: false,
                    score: 15,
                },
            ],
            leaderboard: Vec::new(),
        })
        .unwrap();
        assert!(text.contains("The innocents caught the impostor"));
        assert!(text.contains("Secret word: beach"));
        let alfa = text.find("Alfa").unwrap();
        let beta_score = text.rfind("Beta").unwrap();
        assert!(alfa < beta_score);
    }

    #[test]
    fn test_leaderboard_table() {
        plain();
        let mut board = Leaderboard::new();
        let model = Model::new("gemma3:4b");
        board.register(&model, "gemma3", "#FF6B6B");
        board.add_points(&model, 15);

        let text = format_leaderboard(&board.snapshot());
        assert!(text.starts_with("Leaderboard"));
        assert!(text.contains("gemma3"));
        assert!(text.contains("15"));
    }
}
