//! Wiring of the shared ledger, engine and chat sessions
//!
//! Both front-ends must hold the same instances, so they are built once here
//! and handed out by `Arc`.

use crate::{
    accounts::AccountStore,
    config::GameConfig,
    games::{OutcomeSource, RandomOutcome, WagerEngine},
    session::SessionRegistry,
};
use std::sync::Arc;

/// Everything a front-end needs to reach the core
#[derive(Clone)]
pub struct Services {
    pub accounts: Arc<AccountStore>,
    pub engine: Arc<WagerEngine>,
    pub sessions: Arc<SessionRegistry>,
}

impl Services {
    /// Production wiring with the thread RNG
    pub fn new(config: &GameConfig) -> Self {
        Self::with_outcomes(config, Arc::new(RandomOutcome))
    }

    /// Wiring with an injected outcome source
    pub fn with_outcomes(config: &GameConfig, outcomes: Arc<dyn OutcomeSource>) -> Self {
        let accounts = Arc::new(AccountStore::with_starting_balance(config.starting_balance));
        let engine = Arc::new(WagerEngine::with_outcomes(accounts.clone(), outcomes));
        let sessions = Arc::new(SessionRegistry::new(engine.clone()));

        Self {
            accounts,
            engine,
            sessions,
        }
    }
}
