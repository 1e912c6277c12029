//! Request Handlers
//!
//! Thin translation between HTTP payloads and the wager core. The stateless
//! web front-end calls the engine directly; the chat endpoint goes through
//! the session registry.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::{
    games::{
        engine::WagerEngine,
        types::{AccountId, AccountSnapshot, Catalogue},
    },
    session::SessionRegistry,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub engine: Arc<WagerEngine>,
    pub sessions: Arc<SessionRegistry>,
    pub version: String,
}

impl AppState {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self {
            engine: sessions.engine().clone(),
            sessions,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check handler
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
        accounts: state.engine.accounts().len(),
        sessions: state.sessions.len(),
    })
}

/// Fixed color and number sets
/// GET /api/catalogue
pub async fn catalogue_handler() -> Json<Catalogue> {
    Json(Catalogue::standard())
}

/// Read-only account projection
/// GET /api/accounts/:account_id
pub async fn account_handler(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<AccountSnapshot> {
    Json(state.engine.snapshot(&AccountId::from(account_id)))
}

/// Stateless front-end: data query, spin, or credit in one call
/// POST /webapp
pub async fn webapp_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebAppRequest>, JsonRejection>,
) -> Result<Json<WebAppResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(request_id.0.clone(), e.body_text()))?;
    let id = request.user_id;

    let response = match request.action {
        WebAppAction::GetData => WebAppResponse::Data(AccountData::new(state.engine.snapshot(&id))),
        WebAppAction::Spin { bet, color, number } => {
            let outcome = state
                .engine
                .place_wager(&id, bet, color, number)
                .map_err(|rejection| ApiError::rejected(request_id.0.clone(), rejection))?;
            WebAppResponse::Spin(outcome.into())
        }
        WebAppAction::TakeCredit => {
            let snapshot = state.engine.grant_credit(&id);
            WebAppResponse::Credit(CreditResponse {
                message: "Credit approved!".to_string(),
                new_balance: snapshot.balance,
            })
        }
    };

    Ok(Json(response))
}

/// Conversational front-end: one turn for one account
/// POST /chat/:account_id
pub async fn chat_handler(
    Extension(request_id): Extension<RequestId>,
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(request_id.0.clone(), e.body_text()))?;
    let input = request
        .into_input()
        .ok_or_else(|| ApiError::bad_request(request_id.0.clone(), "Unknown command".to_string()))?;

    let id = AccountId::from(account_id);
    let (session, reply) = state.sessions.dispatch(&id, input);

    Ok(Json(ChatResponse { session, reply }))
}
