// session - process-lifetime history of refactors

use crate::refactor::Refactor;

/// one history entry: the raw pair text and the refactor parsed from it
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub input: String,
    pub refactor: Refactor,
}

/// ordered history of the refactors created during this process
///
/// owned by the flow and passed explicitly; no global state, no persistence
/// across processes.
#[derive(Debug, Default)]
pub struct RefactorSession {
    entries: Vec<SessionEntry>,
}

impl RefactorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// record a refactor; returns its stable history index
    pub fn push(&mut self, input: &str, refactor: Refactor) -> usize {
        self.entries.push(SessionEntry {
            input: input.to_string(),
            refactor,
        });
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&SessionEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// short menu labels for history selection, oldest first
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| truncate_label(&entry.input, 40))
            .collect()
    }
}

/// unicode-safe truncation for menu display
fn truncate_label(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }
    let mut end = max_length.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactor::parse_input;

    #[test]
    fn history_indexes_are_stable() {
        let mut session = RefactorSession::new();
        let first = session.push("a b", parse_input("a b").unwrap());
        let second = session.push("c d", parse_input("c d").unwrap());
        assert_eq!((first, second), (0, 1));
        assert_eq!(session.get(0).unwrap().input, "a b");
        assert_eq!(session.get(1).unwrap().input, "c d");
        assert_eq!(session.len(), 2);
        assert!(!session.is_empty());
    }

    #[test]
    fn labels_are_truncated_for_display() {
        let mut session = RefactorSession::new();
        let long = "averylongsourcetoken averylongreplacementtoken second pair";
        session.push(long, parse_input(long).unwrap());
        let labels = session.labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].len(), 40);
        assert!(labels[0].ends_with("..."));
    }

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_label("ge wk", 40), "ge wk");
    }
}
