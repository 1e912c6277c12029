//! HTTP adapter
//!
//! Exposes the stateless web front-end and a JSON chat endpoint over one
//! shared ledger.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use server::{build_app, ApiServer};
