//! colorwheel - color and number wager service
//!
//! One in-memory ledger behind two front-ends: a turn-based chat dialogue
//! (`session`) and a stateless web API (`api`). Wagers are validated, drawn
//! and settled by `games::WagerEngine`, atomically per account.

pub mod accounts;
pub mod api;
pub mod config;
pub mod console;
pub mod errors;
pub mod factory;
pub mod games;
pub mod session;

pub use accounts::{Account, AccountStore};
pub use config::{ColorwheelConfig, ConfigLoader};
pub use errors::{ColorwheelError, ColorwheelResult, WagerRejection};
pub use factory::Services;
pub use games::{AccountId, AccountSnapshot, Color, Draw, Number, WagerEngine, WagerOutcome};
pub use session::{Action, Input, Reply, SessionFlow, SessionRegistry, SessionState};
