//! Prompt templates for each turn of the game

use crate::core::model::Model;
use crate::game::entities::{Game, Player};
use crate::game::phase::GameResult;

/// Appended to every request sent to a model with built-in reasoning
pub const NO_THINK_DIRECTIVE: &str = "/no_think";

/// Debate lines and guesses only look this far back
pub const HISTORY_WINDOW: usize = 10;

const GAME_RULES: &str = r#"=== GAME RULES ===
- Every player except one knows a secret word. The odd one out is the IMPOSTOR.
- Each round, every player says ONE word related to the secret word.
- After the words, players debate who the impostor is, then vote.
- The most voted player is eliminated. If it was the impostor, they get one
  chance to guess the secret word.
- Innocents must hint at the word without making it obvious."#;

/// Templates for every request and game event sent to a model
pub struct GamePrompts;

impl GamePrompts {
    // ==================== Briefings ====================

    /// Private system briefing. Innocents learn the word, the impostor does not.
    pub fn briefing(game: &Game, player: &Player) -> String {
        if player.is_impostor() {
            format!(
                r#"You are {name}, a player in "Impostor Word".

{rules}

=== YOUR ROLE ===
You are the IMPOSTOR. You do NOT know the secret word.
- Watch the other players' words and work out the theme.
- Say words that fit the pattern you observe and act as if you know the word.
- Deflect suspicion onto other players during the debate.
- If you are caught, you will get one guess at the secret word.

Keep every answer short and never explain your reasoning."#,
                name = player.display_name(),
                rules = GAME_RULES,
            )
        } else {
            format!(
                r#"You are {name}, a player in "Impostor Word".

{rules}

=== YOUR ROLE ===
You are INNOCENT. The secret word is: "{word}"
- Say words that relate to "{word}" subtly, never the word itself.
- Find the impostor by looking for words that do not fit.
- Never write the secret word in the debate.

Keep every answer short and never explain your reasoning."#,
                name = player.display_name(),
                rules = GAME_RULES,
                word = game.secret_word(),
            )
        }
    }

    // ==================== Turn requests (persistent transcripts) ====================

    pub fn word_request(round: u32) -> String {
        format!(
            "=== YOUR TURN: WORD (round {round}) ===\n\
             Reply with ONE word only. No punctuation, no explanation."
        )
    }

    pub fn debate_request(debate_round: u32) -> String {
        format!(
            "=== YOUR TURN: DEBATE (exchange {debate_round}) ===\n\
             In one or two short sentences, say who you suspect and why, or defend yourself."
        )
    }

    pub fn vote_request(candidates: &[&str]) -> String {
        format!(
            "=== YOUR TURN: VOTE ===\n\
             You may vote for: {}\n\
             Answer in exactly this format:\n\
             VOTE: [player name]\n\
             REASON: [one short sentence]",
            candidates.join(", ")
        )
    }

    pub fn guess_request() -> String {
        "=== YOUR TURN: GUESS ===\n\
         You were caught. Based on everything you heard, what is the secret word?\n\
         Reply with ONE word only."
            .to_string()
    }

    // ==================== Full prompts (replay) ====================

    fn role_line(game: &Game, player: &Player) -> String {
        if player.is_impostor() {
            "You are the IMPOSTOR and do NOT know the secret word.".to_string()
        } else {
            format!("You are INNOCENT. The secret word is \"{}\".", game.secret_word())
        }
    }

    fn words_so_far(game: &Game) -> String {
        let lines: Vec<String> = game
            .players()
            .iter()
            .filter(|p| !p.words_said().is_empty())
            .map(|p| format!("  - {}: {}", p.display_name(), p.words_said().join(", ")))
            .collect();
        if lines.is_empty() {
            "  (nobody has spoken yet)".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn recent_debate(game: &Game) -> String {
        let messages = game.debate_messages();
        let start = messages.len().saturating_sub(HISTORY_WINDOW);
        if start == messages.len() {
            return "  (no debate yet)".to_string();
        }
        messages[start..]
            .iter()
            .map(|m| format!("  {}: \"{}\"", game.display_name_of(&m.player_id), m.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn full_word_prompt(game: &Game, player: &Player) -> String {
        format!(
            "You are {name}, playing \"Impostor Word\" (round {round}).\n{role}\n\n\
             Words said so far:\n{words}\n\n{request}",
            name = player.display_name(),
            round = game.round(),
            role = Self::role_line(game, player),
            words = Self::words_so_far(game),
            request = Self::word_request(game.round()),
        )
    }

    pub fn full_debate_prompt(game: &Game, player: &Player, debate_round: u32) -> String {
        let eliminated: Vec<&str> = game
            .eliminated()
            .iter()
            .map(|id| game.display_name_of(id))
            .collect();
        format!(
            "You are {name}, playing \"Impostor Word\".\n{role}\n\n\
             Words said so far:\n{words}\n\n\
             Eliminated: {eliminated}\n\n\
             Recent debate:\n{debate}\n\n{request}",
            name = player.display_name(),
            role = Self::role_line(game, player),
            words = Self::words_so_far(game),
            eliminated = if eliminated.is_empty() {
                "nobody".to_string()
            } else {
                eliminated.join(", ")
            },
            debate = Self::recent_debate(game),
            request = Self::debate_request(debate_round),
        )
    }

    pub fn full_vote_prompt(game: &Game, player: &Player, candidates: &[&str]) -> String {
        format!(
            "You are {name}, playing \"Impostor Word\".\n{role}\n\n\
             Words said so far:\n{words}\n\n\
             Debate:\n{debate}\n\n{request}",
            name = player.display_name(),
            role = Self::role_line(game, player),
            words = Self::words_so_far(game),
            debate = Self::recent_debate(game),
            request = Self::vote_request(candidates),
        )
    }

    pub fn full_guess_prompt(game: &Game, player: &Player) -> String {
        format!(
            "You are {name}, the IMPOSTOR in \"Impostor Word\".\n\n\
             Words said by every player:\n{words}\n\n\
             Debate:\n{debate}\n\n{request}",
            name = player.display_name(),
            words = Self::words_so_far(game),
            debate = Self::recent_debate(game),
            request = Self::guess_request(),
        )
    }

    // ==================== Game events ====================

    pub fn round_started(round: u32) -> String {
        format!("=== ROUND {round} ===\nEach player will now say one word.")
    }

    pub fn word_said(name: &str, word: &str) -> String {
        format!("[WORD] {name} says: \"{word}\"")
    }

    pub fn debate_started() -> String {
        "=== DEBATE ===\nDiscuss who the impostor might be.".to_string()
    }

    pub fn debate_line(name: &str, message: &str) -> String {
        format!("[DEBATE] {name}: \"{message}\"")
    }

    pub fn voting_started() -> String {
        "=== VOTING ===\nEvery player votes for the suspected impostor.".to_string()
    }

    pub fn vote_cast(voter: &str, target: &str, reason: &str) -> String {
        format!("[VOTE] {voter} votes for {target}: \"{reason}\"")
    }

    pub fn vote_tied() -> String {
        "[TIE] The vote is tied. Everyone votes again.".to_string()
    }

    pub fn eliminated(name: &str, was_impostor: bool) -> String {
        let role = if was_impostor { "the IMPOSTOR" } else { "innocent" };
        format!("[ELIMINATED] {name} was eliminated. They were {role}.")
    }

    pub fn game_result(result: GameResult, secret_word: &str, impostor_name: &str) -> String {
        format!(
            "=== GAME OVER ===\n{}. The impostor was {impostor_name}; the secret word was \"{secret_word}\".",
            result.description()
        )
    }

    /// Add the answer-directly directive for reasoning models
    pub fn for_model(model: &Model, content: String) -> String {
        if model.is_thinking_model() {
            format!("{content}\n{NO_THINK_DIRECTIVE}")
        } else {
            content
        }
    }
}
