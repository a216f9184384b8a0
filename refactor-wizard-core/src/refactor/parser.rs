// input parsing - turns raw pair text into an ordered refactor

use crate::error::{RefactorError, Result};
use crate::refactor::{Refactor, SubstitutionPair};

/// parse a space-separated pair string into a refactor
///
/// every `<source> <replacement>` pair yields two substitution pairs: the
/// capitalized-first-letter variant followed by the literal pair, so
/// capitalized occurrences are rewritten before literal ones.
pub fn parse_input(input: &str) -> Result<Refactor> {
    let chunks: Vec<&str> = input.split(' ').collect();
    if chunks.is_empty() || chunks.len() % 2 != 0 {
        return Err(RefactorError::Parse {
            input: input.to_string(),
            reason: format!("expected an even number of tokens, got {}", chunks.len()),
        });
    }
    if let Some(position) = chunks.iter().position(|chunk| chunk.is_empty()) {
        return Err(RefactorError::Parse {
            input: input.to_string(),
            reason: format!(
                "empty token at position {} (check for doubled or trailing spaces)",
                position + 1
            ),
        });
    }

    let mut pairs = Vec::with_capacity(chunks.len());
    for chunk in chunks.chunks(2) {
        // capitalized variant first so it wins over the literal pair
        pairs.push(SubstitutionPair {
            source: capitalize_first(chunk[0]),
            replacement: capitalize_first(chunk[1]),
        });
        pairs.push(SubstitutionPair {
            source: chunk[0].to_string(),
            replacement: chunk[1].to_string(),
        });
    }

    Ok(Refactor { pairs })
}

/// uppercase only the first character, leaving the rest unchanged
fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        // to_uppercase may expand to more than one character (e.g. ß)
        Some(first) => first.to_uppercase().chain(chars).collect(),
        // empty tokens are rejected before capitalization
        None => String::new(),
    }
}
