//! Vote reply parsing
//!
//! Resolution order:
//!
//! 1. A `VOTE:` line naming a candidate, plus an optional `REASON:` line
//! 2. Any candidate name mentioned anywhere in the reply
//! 3. A word that is a prefix of a candidate name (or vice versa)
//!
//! Without an explicit reason, the text that follows the name is used.

use super::cleaning::clean_response;

const VOTE_LABELS: &[&str] = &["vote:", "voto:"];
const REASON_LABELS: &[&str] = &["reason:", "razon:", "razón:", "because:"];
const CONNECTIVES: &[&str] = &[
    "because", "since", "as", "porque", "ya que", "dado que", "pues", ".", ",", ":", "-",
];

/// A vote as read from a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVote {
    /// Candidate name exactly as supplied by the caller
    pub target: Option<String>,
    pub justification: String,
}

fn strip_label<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    let lower = line.trim_start().to_lowercase();
    let offset = line.len() - line.trim_start().len();
    labels.iter().find_map(|label| {
        lower
            .starts_with(label)
            .then(|| line[offset..].split_once(':').map(|(_, rest)| rest.trim()))
            .flatten()
    })
}

/// Byte range of the first case-insensitive occurrence of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let re = regex::RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()?;
    re.find(haystack).map(|m| (m.start(), m.end()))
}

fn mentioned<'a>(text: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .filter(|name| !name.is_empty())
        .find(|name| find_ignore_case(text, name).is_some())
}

fn prefix_match<'a>(text: &str, candidates: &[&'a str]) -> Option<&'a str> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() >= 3)
        .find_map(|word| {
            candidates.iter().copied().find(|name| {
                let name = name.to_lowercase();
                !name.is_empty() && (name.starts_with(&word) || word.starts_with(&name))
            })
        })
}

fn trailing_reason(text: &str, name: &str) -> String {
    let Some((_, end)) = find_ignore_case(text, name) else {
        return String::new();
    };
    let mut rest = text[end..].trim();
    loop {
        let lower = rest.to_lowercase();
        let Some(prefix) = CONNECTIVES.iter().find(|p| {
            lower.starts_with(**p)
                && (p.len() == 1
                    || !rest[p.len()..]
                        .chars()
                        .next()
                        .is_some_and(char::is_alphanumeric))
        }) else {
            break;
        };
        rest = rest[prefix.len()..].trim_start();
    }
    rest.trim().to_string()
}

/// Read a vote from `raw` given the names that may legally be voted for.
pub fn parse_vote_reply(raw: &str, candidates: &[&str]) -> ParsedVote {
    let text = clean_response(raw);

    let mut target = None;
    let mut justification = String::new();

    for line in text.lines() {
        if let Some(vote_part) = strip_label(line, VOTE_LABELS) {
            if target.is_none() {
                target = mentioned(vote_part, candidates);
            }
        } else if let Some(reason) = strip_label(line, REASON_LABELS)
            && justification.is_empty()
        {
            justification = reason.to_string();
        }
    }

    let target = target
        .or_else(|| mentioned(&text, candidates))
        .or_else(|| prefix_match(&text, candidates));

    if justification.is_empty()
        && let Some(name) = target
    {
        justification = trailing_reason(&text, name);
    }

    ParsedVote {
        target: target.map(str::to_string),
        justification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &["Alfa", "Beta", "Gamma"];

    #[test]
    fn test_structured_reply() {
        let vote = parse_vote_reply("VOTE: Gamma\nREASON: Their word was too vague.", NAMES);
        assert_eq!(vote.target.as_deref(), Some("Gamma"));
        assert_eq!(vote.justification, "Their word was too vague.");
    }

    #[test]
    fn test_spanish_labels() {
        let vote = parse_vote_reply("Voto: beta\nRazón: dudó mucho", NAMES);
        assert_eq!(vote.target.as_deref(), Some("Beta"));
        assert_eq!(vote.justification, "dudó mucho");
    }

    #[test]
    fn test_name_anywhere_with_trailing_reason() {
        let vote = parse_vote_reply("I pick Alfa because the word felt random", NAMES);
        assert_eq!(vote.target.as_deref(), Some("Alfa"));
        assert_eq!(vote.justification, "the word felt random");
    }

    #[test]
    fn test_prefix_match() {
        let vote = parse_vote_reply("gam", NAMES);
        assert_eq!(vote.target.as_deref(), Some("Gamma"));
    }

    #[test]
    fn test_short_words_do_not_prefix_match() {
        let vote = parse_vote_reply("a b", NAMES);
        assert_eq!(vote.target, None);
        assert!(vote.justification.is_empty());
    }

    #[test]
    fn test_reasoning_block_is_ignored() {
        let raw = "<think>Alfa seems fine, Beta too</think>VOTE: Gamma\nREASON: hesitant";
        let vote = parse_vote_reply(raw, NAMES);
        assert_eq!(vote.target.as_deref(), Some("Gamma"));
    }

    #[test]
    fn test_unresolvable_reply() {
        let vote = parse_vote_reply("I refuse to vote", NAMES);
        assert_eq!(vote.target, None);
    }
}
