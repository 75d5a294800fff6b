//! Session collection and current-session tracking.
//!
//! The store owns every session seen in this process plus the single
//! "current" one. A freshly started session only enters the collection once
//! it receives its first message; until then it exists only as the current
//! session and is silently discarded if another session is started.

use super::entities::{Message, Session};

/// In-memory collection of diagnosis sessions.
///
/// Mutation is single-writer: callers are expected to serialize access (the
/// application layer holds the store behind a mutex).
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh empty session and make it current.
    ///
    /// Always yields a new session; a prior current session that never
    /// received a message is dropped (it was never in the collection).
    pub fn start_session(&mut self) -> &Session {
        self.current = Some(Session::new());
        self.current.as_ref().expect("current was just set")
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Append a message to the current session, starting one implicitly if
    /// none exists. Returns the id of the session that received the message.
    ///
    /// The mutated session is upserted into the collection by id: replaced if
    /// already present, appended otherwise, so the collection never holds two
    /// entries with the same id.
    pub fn add_message(&mut self, message: Message) -> String {
        if self.current.is_none() {
            self.start_session();
        }
        let current = self.current.as_mut().expect("current exists");
        current.append(message);
        let snapshot = current.clone();
        let id = snapshot.id().to_string();
        self.upsert(snapshot);
        id
    }

    /// Append a message to a specific session by id.
    ///
    /// Targets the current session when its id matches, otherwise the entry
    /// in the collection. An unknown id falls back to the current session,
    /// matching the original append-to-whatever-is-current behavior.
    pub fn add_message_to(&mut self, session_id: &str, message: Message) -> String {
        if self
            .current
            .as_ref()
            .is_some_and(|s| s.id() == session_id)
        {
            return self.add_message(message);
        }
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id() == session_id) {
            session.append(message);
            return session_id.to_string();
        }
        self.add_message(message)
    }

    /// Make the session with the given id current. Unknown ids are a silent
    /// no-op: the current session is left untouched.
    pub fn load_session(&mut self, id: &str) -> bool {
        match self.sessions.iter().find(|s| s.id() == id) {
            Some(session) => {
                self.current = Some(session.clone());
                true
            }
            None => false,
        }
    }

    /// Sessions ordered most recent first, for history listing.
    pub fn history(&self) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self.sessions.iter().collect();
        sessions.sort_by(|a, b| b.date().cmp(&a.date()));
        sessions
    }

    /// Merge sessions fetched from the backend into the collection.
    ///
    /// Upserts by id; the current session reference is left untouched.
    pub fn absorb(&mut self, sessions: Vec<Session>) {
        for session in sessions {
            self.upsert(session);
        }
    }

    /// Drop all local state. Used when the authenticated user changes.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.current = None;
    }

    fn upsert(&mut self, session: Session) {
        match self.sessions.iter_mut().find(|s| s.id() == session.id()) {
            Some(existing) => *existing = session,
            None => self.sessions.push(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::{Diagnosis, Message};

    #[test]
    fn add_message_synthesizes_exactly_one_session() {
        let mut store = SessionStore::new();
        assert!(store.current().is_none());
        assert!(store.sessions().is_empty());

        store.add_message(Message::user_text("hello"));

        assert_eq!(store.sessions().len(), 1);
        let current = store.current().unwrap();
        assert_eq!(current.messages().len(), 1);
        assert!(current.thumbnail().is_none());
    }

    #[test]
    fn messages_preserve_call_order() {
        let mut store = SessionStore::new();
        for i in 0..5 {
            store.add_message(Message::user_text(format!("msg {i}")));
        }

        let current = store.current().unwrap();
        assert_eq!(current.messages().len(), 5);
        for (i, message) in current.messages().iter().enumerate() {
            assert_eq!(message.text(), Some(format!("msg {i}").as_str()));
        }
        // Still one session, upserted in place
        assert_eq!(store.sessions().len(), 1);
    }

    #[test]
    fn image_message_sets_thumbnail() {
        let mut store = SessionStore::new();
        store.add_message(Message::user_image("data:image/png;base64,AAAA", None));

        assert_eq!(
            store.current().unwrap().thumbnail(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn upsert_keeps_collection_in_sync_with_current() {
        let mut store = SessionStore::new();
        let id = store.add_message(Message::user_text("first"));
        store.add_message(Message::user_text("second"));

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.messages().len(), 2);
    }

    #[test]
    fn load_session_switches_current() {
        let mut store = SessionStore::new();
        let first = store.add_message(Message::user_text("in first"));
        store.start_session();
        store.add_message(Message::user_text("in second"));

        assert!(store.load_session(&first));
        assert_eq!(store.current().unwrap().id(), first);
        assert_eq!(
            store.current().unwrap().messages()[0].text(),
            Some("in first")
        );
    }

    #[test]
    fn load_unknown_session_is_a_silent_noop() {
        let mut store = SessionStore::new();
        let id = store.add_message(Message::user_text("hello"));

        assert!(!store.load_session("does-not-exist"));
        assert_eq!(store.current().unwrap().id(), id);
    }

    #[test]
    fn start_session_discards_uncommitted_current() {
        let mut store = SessionStore::new();
        let first = store.start_session().id().to_string();
        let second = store.start_session().id().to_string();

        assert_ne!(first, second);
        assert_eq!(store.current().unwrap().id(), second);
        // Neither empty session ever entered the collection
        assert!(store.sessions().is_empty());
    }

    #[test]
    fn add_message_to_targets_a_non_current_session() {
        let mut store = SessionStore::new();
        let first = store.add_message(Message::user_text("analyzing this"));
        store.start_session();
        store.add_message(Message::user_text("meanwhile, elsewhere"));

        let diagnosis = Diagnosis::new("Early Blight", vec!["spots".into()], vec![]);
        store.add_message_to(&first, Message::ai_diagnosis(diagnosis));

        let target = store.get(&first).unwrap();
        assert_eq!(target.messages().len(), 2);
        assert!(target.messages()[1].diagnosis().is_some());
        // The other session did not receive the result
        assert_eq!(store.current().unwrap().messages().len(), 1);
    }

    #[test]
    fn add_message_to_unknown_id_falls_back_to_current() {
        let mut store = SessionStore::new();
        store.add_message(Message::user_text("hello"));

        store.add_message_to("ghost", Message::ai_text("fallback"));
        assert_eq!(store.current().unwrap().messages().len(), 2);
    }

    #[test]
    fn history_sorts_most_recent_first() {
        let mut store = SessionStore::new();
        store.add_message(Message::user_text("older"));
        store.start_session();
        store.add_message(Message::user_text("newer"));

        let history = store.history();
        assert_eq!(history.len(), 2);
        assert!(history[0].date() >= history[1].date());
        assert_eq!(history[0].messages()[0].text(), Some("newer"));
    }

    #[test]
    fn absorb_upserts_without_touching_current() {
        let mut store = SessionStore::new();
        let current_id = store.add_message(Message::user_text("mine"));

        let remote = Session::new();
        let remote_id = remote.id().to_string();
        store.absorb(vec![remote]);

        assert_eq!(store.sessions().len(), 2);
        assert!(store.get(&remote_id).is_some());
        assert_eq!(store.current().unwrap().id(), current_id);
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = SessionStore::new();
        store.add_message(Message::user_text("hello"));
        store.clear();

        assert!(store.sessions().is_empty());
        assert!(store.current().is_none());
    }
}
