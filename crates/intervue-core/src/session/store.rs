//! Session store
//!
//! Handles session creation, lookup, and mutation. All state is in-process
//! memory with a process lifetime: sessions are never deleted, and nothing
//! is persisted.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use intervue_types::chat::{ChatMessage, ContextUpdate, Session};

/// In-memory mapping from session id to conversation state.
///
/// Backed by a [`DashMap`], which locks per entry: concurrent mutations of
/// the same session serialize on its shard guard, and mutations of
/// different sessions do not contend. Guards are held only for the duration
/// of a synchronous mutation -- never across an await point.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl SessionStore {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Return the given id if a session with it exists; otherwise create a
    /// fresh session (empty messages, default context, current timestamps)
    /// under a new id and return that.
    ///
    /// Never fails. An unknown non-empty id does NOT resurrect a session
    /// under that id -- the caller gets a new one.
    pub fn get_or_create(&self, session_id: Option<Uuid>) -> Uuid {
        if let Some(id) = session_id {
            if self.sessions.contains_key(&id) {
                return id;
            }
        }

        let id = Uuid::now_v7();
        self.sessions.insert(id, Session::new(id));
        id
    }

    /// Look up a session by id, returning a cloned snapshot.
    ///
    /// Pure lookup: no mutation, no error on miss.
    pub fn get(&self, session_id: &Uuid) -> Option<Session> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    /// Append a message to a session and refresh its `updated_at`.
    ///
    /// Unknown ids are tolerated: the call is a no-op and returns `false`.
    /// Callers that need to distinguish a missing session must check with
    /// [`get`](Self::get) or [`contains`](Self::contains) explicitly.
    pub fn append_message(&self, session_id: &Uuid, message: ChatMessage) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.messages.push(message);
                session.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Merge a partial context update into a session and refresh its
    /// `updated_at`. Only the fields set on the update are overwritten.
    ///
    /// Unknown ids are tolerated the same way as in
    /// [`append_message`](Self::append_message): no-op, `false`.
    pub fn update_context(&self, session_id: &Uuid, update: ContextUpdate) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.context.apply(update);
                session.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Whether a session with this id exists.
    pub fn contains(&self, session_id: &Uuid) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Total session count.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
