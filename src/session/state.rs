use crate::games::types::{Color, Number};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where one player is in the bet-construction dialogue.
///
/// The pending wager lives inside the variants, so a state that needs an
/// amount or a color cannot exist without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    MainMenu,
    AwaitingBet,
    AwaitingColor { amount: i64 },
    AwaitingNumber { amount: i64, color: Color },
}

impl SessionState {
    /// The partially built wager carried by this state
    pub fn pending(&self) -> PendingWager {
        match *self {
            SessionState::MainMenu | SessionState::AwaitingBet => PendingWager::default(),
            SessionState::AwaitingColor { amount } => PendingWager {
                amount: Some(amount),
                ..PendingWager::default()
            },
            SessionState::AwaitingNumber { amount, color } => PendingWager {
                amount: Some(amount),
                color: Some(color),
                number: None,
            },
        }
    }
}

/// Read-only view of the in-progress wager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWager {
    pub amount: Option<i64>,
    pub color: Option<Color>,
    pub number: Option<Number>,
}

impl PendingWager {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.color.is_none() && self.number.is_none()
    }
}

/// Button tokens understood by the dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    NewGame,
    TakeCredit,
    PickColor(Color),
    PickNumber(Number),
    BackToMenu,
    BackToColor,
}

const NEW_GAME: &str = "new_game";
const TAKE_CREDIT: &str = "take_credit";
const BACK_TO_MENU: &str = "back_to_menu";
const BACK_TO_COLOR: &str = "back_to_color";
const COLOR_PREFIX: &str = "color_";
const NUMBER_PREFIX: &str = "number_";

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NewGame => f.write_str(NEW_GAME),
            Action::TakeCredit => f.write_str(TAKE_CREDIT),
            Action::PickColor(color) => write!(f, "{}{}", COLOR_PREFIX, color.key()),
            Action::PickNumber(number) => write!(f, "{}{}", NUMBER_PREFIX, number),
            Action::BackToMenu => f.write_str(BACK_TO_MENU),
            Action::BackToColor => f.write_str(BACK_TO_COLOR),
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownAction(token.to_string());

        match token {
            NEW_GAME => Ok(Action::NewGame),
            TAKE_CREDIT => Ok(Action::TakeCredit),
            BACK_TO_MENU => Ok(Action::BackToMenu),
            BACK_TO_COLOR => Ok(Action::BackToColor),
            _ => {
                if let Some(key) = token.strip_prefix(COLOR_PREFIX) {
                    key.parse().map(Action::PickColor).map_err(|_| unknown())
                } else if let Some(value) = token.strip_prefix(NUMBER_PREFIX) {
                    value.parse().map(Action::PickNumber).map_err(|_| unknown())
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl TryFrom<String> for Action {
    type Error = UnknownAction;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action token: {0}")]
pub struct UnknownAction(pub String);

/// One turn of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The `/start` command; re-enters the menu from anywhere
    Start,
    /// A button press
    Action(Action),
    /// Free text, only meaningful while a stake is expected
    Text(String),
}

impl From<Action> for Input {
    fn from(action: Action) -> Self {
        Input::Action(action)
    }
}
