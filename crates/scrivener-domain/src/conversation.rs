//! Conversation log - per-document chat history
//!
//! Turns are appended in strict chronological order and live for the
//! session's lifetime; nothing here is persisted.

use std::fmt;

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The human asking questions
    User,
    /// The answer synthesizer (or its fallback)
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        write!(f, "{}", s)
    }
}

/// One (role, message) pair in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    /// Who spoke
    pub role: Role,
    /// What was said
    pub message: String,
}

/// Ordered conversation history for a single document
///
/// Appended to only by the orchestrator, and only after an answer has been
/// computed, so the user turn and its assistant turn always arrive as an
/// adjacent pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn
    pub fn push_user(&mut self, message: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            message: message.into(),
        });
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, message: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            message: message.into(),
        });
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of turns recorded
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the log holds no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate over turns, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_turns_appended_in_order() {
        let mut log = ConversationLog::new();
        log.push_user("what is this about?");
        log.push_assistant("it is about chunking.");
        log.push_user("and retrieval?");
        log.push_assistant("that too.");

        assert_eq!(log.len(), 4);
        assert_eq!(log.turns()[0].role, Role::User);
        assert_eq!(log.turns()[1].role, Role::Assistant);
        assert_eq!(log.turns()[2].message, "and retrieval?");
        assert_eq!(log.turns()[3].role, Role::Assistant);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
