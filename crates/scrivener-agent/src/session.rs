//! Session context - the explicit home for interactive state
//!
//! The active document id and the per-document conversation logs live
//! here and are passed to the orchestrator explicitly; there are no
//! ambient globals. Logs persist for the lifetime of the session and are
//! dropped with it.

use scrivener_domain::{ConversationLog, DocumentId};
use std::collections::HashMap;

/// Interactive session state: active document plus conversation logs
#[derive(Debug, Default)]
pub struct SessionContext {
    current: Option<DocumentId>,
    conversations: HashMap<DocumentId, ConversationLog>,
}

impl SessionContext {
    /// Create an empty session with no active document
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the session's active document
    ///
    /// Ensures a conversation log exists for it; an earlier document's
    /// log is kept so switching back resumes the old conversation.
    pub fn select(&mut self, id: DocumentId) {
        self.current = Some(id);
        self.conversations.entry(id).or_default();
    }

    /// Drop the active-document selection (back to an unloaded session)
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// The currently active document, if any
    pub fn current(&self) -> Option<DocumentId> {
        self.current
    }

    /// Conversation log for a document, if one has been selected before
    pub fn log(&self, id: DocumentId) -> Option<&ConversationLog> {
        self.conversations.get(&id)
    }

    /// Mutable conversation log for a document, created on first use
    pub fn log_mut(&mut self, id: DocumentId) -> &mut ConversationLog {
        self.conversations.entry(id).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_selection() {
        let session = SessionContext::new();
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_select_creates_empty_log() {
        let mut session = SessionContext::new();
        let id = DocumentId::new();

        session.select(id);

        assert_eq!(session.current(), Some(id));
        assert!(session.log(id).unwrap().is_empty());
    }

    #[test]
    fn test_switching_documents_keeps_old_log() {
        let mut session = SessionContext::new();
        let first = DocumentId::new();
        let second = DocumentId::new();

        session.select(first);
        session.log_mut(first).push_user("hello first");

        session.select(second);
        assert_eq!(session.current(), Some(second));

        // The first conversation survives the switch
        session.select(first);
        assert_eq!(session.log(first).unwrap().len(), 1);
    }

    #[test]
    fn test_clear_selection() {
        let mut session = SessionContext::new();
        let id = DocumentId::new();

        session.select(id);
        session.clear_selection();

        assert_eq!(session.current(), None);
        // Log survives deselection
        assert!(session.log(id).is_some());
    }

    #[test]
    fn test_log_for_unknown_document() {
        let session = SessionContext::new();
        assert!(session.log(DocumentId::new()).is_none());
    }
}
