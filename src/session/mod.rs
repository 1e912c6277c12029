//! Turn-based bet construction for the conversational front-end.

pub mod flow;
pub mod registry;
pub mod render;
pub mod state;

pub use flow::SessionFlow;
pub use registry::SessionRegistry;
pub use render::{Button, Reply};
pub use state::{Action, Input, PendingWager, SessionState};
