//! Message text and button layouts for each dialogue step.
//!
//! Everything here is plain data; the chat transport decides how to draw it.

use crate::errors::WagerRejection;
use crate::games::types::{AccountSnapshot, Color, Number, WagerOutcome};
use crate::session::state::Action;
use serde::{Deserialize, Serialize};

const NUMBERS_PER_ROW: usize = 3;

/// A clickable option carrying its action token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// What the player sees after one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<WagerOutcome>,
}

impl Reply {
    fn new(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
            outcome: None,
        }
    }

    /// Every action offered, row by row
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.keyboard.iter().flatten().map(|button| button.action)
    }

    pub fn offers(&self, action: Action) -> bool {
        self.actions().any(|offered| offered == action)
    }
}

fn new_game_button(label: &str) -> Vec<Button> {
    vec![Button::new(label, Action::NewGame)]
}

fn take_credit_button() -> Vec<Button> {
    vec![Button::new("🛎 Take credit", Action::TakeCredit)]
}

fn menu_keyboard(snapshot: &AccountSnapshot) -> Vec<Vec<Button>> {
    let mut keyboard = vec![new_game_button("🎮 New game")];
    if snapshot.credit_offer_due() {
        keyboard.push(take_credit_button());
    }
    keyboard
}

/// Greeting shown on `/start`
pub fn welcome(snapshot: &AccountSnapshot) -> Reply {
    Reply::new(
        format!(
            "🎰 Welcome to the casino!\n💰 Your balance: {} coins\n\nChoose an action:",
            snapshot.balance
        ),
        menu_keyboard(snapshot),
    )
}

/// Menu after abandoning a round or a stray input
pub fn menu(snapshot: &AccountSnapshot) -> Reply {
    Reply::new(
        format!("💰 Your balance: {} coins\n\nChoose an action:", snapshot.balance),
        menu_keyboard(snapshot),
    )
}

pub fn bet_prompt() -> Reply {
    Reply::new(
        "💰 Enter your stake (a whole number):",
        vec![vec![Button::new("🔙 Back", Action::BackToMenu)]],
    )
}

pub fn not_a_number() -> Reply {
    Reply::new("❌ Enter a valid number!", vec![vec![Button::new("🔙 Back", Action::BackToMenu)]])
}

pub fn stake_not_positive() -> Reply {
    Reply::new(
        "❌ Stake must be greater than 0! Try again:",
        vec![vec![Button::new("🔙 Back", Action::BackToMenu)]],
    )
}

/// The stake is larger than the account can cover right now
/// Stake exceeds the balance and no credit has been taken yet
pub fn credit_offer(amount: i64, snapshot: &AccountSnapshot) -> Reply {
    Reply::new(
        format!(
            "❌ Not enough coins: stake {} but balance is {}.\n🛎 Take credit to keep playing with a negative balance.",
            amount, snapshot.balance
        ),
        vec![take_credit_button(), new_game_button("🎮 New game")],
    )
}

pub fn color_prompt(amount: i64) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = Color::ALL
        .into_iter()
        .map(|color| vec![Button::new(color.display_name(), Action::PickColor(color))])
        .collect();
    keyboard.push(vec![Button::new("🔙 Back", Action::BackToMenu)]);

    Reply::new(
        format!("💰 Stake: {} coins\n🎨 Choose a color:", amount),
        keyboard,
    )
}

pub fn number_prompt(amount: i64, color: Color) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = Number::ALL
        .chunks(NUMBERS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|number| Button::new(number.to_string(), Action::PickNumber(*number)))
                .collect()
        })
        .collect();
    keyboard.push(vec![Button::new("🔙 Back to colors", Action::BackToColor)]);

    Reply::new(
        format!(
            "💰 Stake: {} coins\n🎨 Color: {}\n🔢 Choose a number:",
            amount,
            color.display_name()
        ),
        keyboard,
    )
}

/// Settled round, with the post-round menu
pub fn outcome(outcome: WagerOutcome, snapshot: &AccountSnapshot) -> Reply {
    let verdict = if outcome.won {
        "🎉 Congratulations! You won!"
    } else {
        "❌ Unfortunately, you lost."
    };
    let text = format!(
        "🎰 Result: {} {}\n📌 Your bet: {} {}\n{}\n💰 New balance: {} coins",
        outcome.result.color.display_name(),
        outcome.result.number,
        outcome.chosen.color.display_name(),
        outcome.chosen.number,
        verdict,
        outcome.balance_after
    );

    let mut keyboard = Vec::new();
    if snapshot.credit_offer_due() {
        keyboard.push(take_credit_button());
    }
    keyboard.push(new_game_button("🔄 Play again"));

    Reply {
        text,
        keyboard,
        outcome: Some(outcome),
    }
}

/// The engine refused the wager at resolution time
pub fn rejected(rejection: WagerRejection, snapshot: &AccountSnapshot) -> Reply {
    Reply::new(
        format!("❌ Bet refused: {}\n💰 Your balance: {} coins", rejection, snapshot.balance),
        menu_keyboard(snapshot),
    )
}

pub fn credit_granted(snapshot: &AccountSnapshot) -> Reply {
    Reply::new(
        format!(
            "🛎 Credit approved! You can now play with a negative balance.\n💰 Your balance: {} coins\nStart a new game!",
            snapshot.balance
        ),
        vec![new_game_button("🎮 New game")],
    )
}

/// Prefix a re-rendered prompt with a hint that the input was not understood
pub fn with_hint(mut reply: Reply) -> Reply {
    reply.text = format!("⚠️ Please use the buttons below.\n\n{}", reply.text);
    reply
}
