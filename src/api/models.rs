//! API Request and Response Models

use crate::games::types::{AccountId, AccountSnapshot, Catalogue, Color, ColorEntry, Number, WagerOutcome};
use crate::session::{Action, Input, Reply, SessionState};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub accounts: usize,
    pub sessions: usize,
}

/// Body of `POST /webapp`
#[derive(Debug, Clone, Deserialize)]
pub struct WebAppRequest {
    pub user_id: AccountId,
    #[serde(flatten)]
    pub action: WebAppAction,
}

/// What the web front-end asks for, keyed by the `action` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebAppAction {
    GetData,
    Spin {
        bet: i64,
        color: Color,
        number: Number,
    },
    TakeCredit,
}

/// Reply to `POST /webapp`; the shape depends on the action
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WebAppResponse {
    Data(AccountData),
    Spin(SpinResponse),
    Credit(CreditResponse),
}

/// Balance plus everything needed to draw the betting UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub balance: i64,
    #[serde(rename = "credit_taken")]
    pub credit_granted: bool,
    pub colors: Vec<ColorEntry>,
    pub numbers: Vec<u8>,
}

impl AccountData {
    pub fn new(snapshot: AccountSnapshot) -> Self {
        let Catalogue { colors, numbers } = Catalogue::standard();
        Self {
            balance: snapshot.balance,
            credit_granted: snapshot.credit_granted,
            colors,
            numbers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinResponse {
    pub result: SpinResult,
    pub win: bool,
    pub new_balance: i64,
}

/// The drawn pair, with the display strings the UI shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinResult {
    pub color: Color,
    pub number: Number,
    pub color_name: String,
    pub emoji: String,
}

impl From<WagerOutcome> for SpinResponse {
    fn from(outcome: WagerOutcome) -> Self {
        let color = outcome.result.color;
        Self {
            result: SpinResult {
                color,
                number: outcome.result.number,
                color_name: color.display_name(),
                emoji: color.glyph().to_string(),
            },
            win: outcome.won,
            new_balance: outcome.balance_after,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditResponse {
    pub message: String,
    pub new_balance: i64,
}

/// Body of `POST /chat/:account_id`: exactly one of the three keys
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRequest {
    /// A slash command without the slash, e.g. `"start"`
    Command(String),
    /// A button token, e.g. `"color_red"`
    Action(Action),
    /// Free text typed by the player
    Text(String),
}

impl ChatRequest {
    /// Translate into a session input; `None` for unknown commands
    pub fn into_input(self) -> Option<Input> {
        match self {
            ChatRequest::Command(command) => match command.trim_start_matches('/') {
                "start" => Some(Input::Start),
                _ => None,
            },
            ChatRequest::Action(action) => Some(Input::Action(action)),
            ChatRequest::Text(text) => Some(Input::Text(text)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session: SessionState,
    pub reply: Reply,
}
