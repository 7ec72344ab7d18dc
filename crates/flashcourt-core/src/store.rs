//! Sessions keyed by id, one per player.

use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

use crate::level::QuizMode;
use crate::session::QuizSession;

/// In-memory session store. Sessions never share state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, QuizSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its id.
    pub fn create<R: Rng + ?Sized>(&mut self, mode: QuizMode, rng: &mut R) -> Uuid {
        let session = QuizSession::new(mode, rng);
        let id = session.id();
        tracing::debug!(%id, %mode, "session created");
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&QuizSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut QuizSession> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<QuizSession> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
