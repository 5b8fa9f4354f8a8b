//! Post-processing of model replies.
//!
//! Pure text functions: no I/O and no game state beyond what is passed in.
//!
//! | Function | Use |
//! |----------|-----|
//! | [`clean_response`] | Drop reasoning blocks, markup and labels |
//! | [`word_from_reply`] | Reduce a reply to one playable word |
//! | [`redact_secret_word`] | Mask the secret word in debate lines |
//! | [`parse_vote_reply`] | Resolve a vote target and justification |
//! | [`words_match`] | Compare the impostor's guess with the secret |

mod cleaning;
mod matching;
mod vote;

pub use cleaning::{
    DEGENERATE_TOKENS, PLACEHOLDER_WORD, REDACTION, clean_response, extract_single_word,
    is_valid_word, redact_secret_word, word_from_reply,
};
pub use matching::{fold, words_match};
pub use vote::{ParsedVote, parse_vote_reply};
