use crate::games::engine::WagerEngine;
use crate::games::types::AccountId;
use crate::session::flow::SessionFlow;
use crate::session::render::Reply;
use crate::session::state::{Input, SessionState};
use dashmap::DashMap;
use std::sync::Arc;

/// Conversation state for every account that has talked to the chat front-end.
///
/// A session is created on first use and kept for the life of the process.
/// The entry guard is held for one whole turn, so turns for the same account
/// are applied one at a time.
pub struct SessionRegistry {
    sessions: DashMap<AccountId, SessionFlow>,
    engine: Arc<WagerEngine>,
}

impl SessionRegistry {
    pub fn new(engine: Arc<WagerEngine>) -> Self {
        Self {
            sessions: DashMap::new(),
            engine,
        }
    }

    pub fn engine(&self) -> &Arc<WagerEngine> {
        &self.engine
    }

    /// Feed one turn of input to the account's session.
    ///
    /// Returns the state the turn left the session in, read under the same
    /// entry guard as the turn itself.
    pub fn dispatch(&self, id: &AccountId, input: Input) -> (SessionState, Reply) {
        let mut session = self
            .sessions
            .entry(id.clone())
            .or_insert_with(|| SessionFlow::new(id.clone()));
        let reply = session.handle(input, &self.engine);
        (session.state(), reply)
    }

    /// Current step for an account, `None` if it never chatted
    pub fn state_of(&self, id: &AccountId) -> Option<SessionState> {
        self.sessions.get(id).map(|session| session.state())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
