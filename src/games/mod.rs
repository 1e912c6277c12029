pub mod engine;
pub mod outcome;
pub mod types;

pub use engine::WagerEngine;
pub use outcome::{OutcomeSource, RandomOutcome, ScriptedOutcome};
pub use types::*;
