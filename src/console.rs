//! Interactive terminal front-end for the chat dialogue.
//!
//! Reads one line per turn from stdin and prints the reply with its buttons
//! numbered. Shares the session registry (and so the ledger) with the HTTP
//! server running in the same process.

use crate::errors::ColorwheelResult;
use crate::games::types::AccountId;
use crate::session::{Action, Input, Reply, SessionRegistry};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// What one typed line means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Quit,
    Turn(Input),
    /// `#n` that does not match a button on screen
    NoSuchButton(usize),
}

/// Interpret a line against the buttons currently on screen.
///
/// `/start` and `/quit` are commands, `#n` presses the n-th button, a raw
/// action token presses that button, anything else is free text.
pub fn parse_line(line: &str, on_screen: &Reply) -> ConsoleLine {
    let line = line.trim();

    match line {
        "/quit" | "/exit" => return ConsoleLine::Quit,
        "/start" => return ConsoleLine::Turn(Input::Start),
        _ => {}
    }

    if let Some(index) = line.strip_prefix('#').and_then(|n| n.parse::<usize>().ok()) {
        return match index.checked_sub(1).and_then(|i| on_screen.actions().nth(i)) {
            Some(action) => ConsoleLine::Turn(Input::Action(action)),
            None => ConsoleLine::NoSuchButton(index),
        };
    }

    match line.parse::<Action>() {
        Ok(action) => ConsoleLine::Turn(Input::Action(action)),
        Err(_) => ConsoleLine::Turn(Input::Text(line.to_string())),
    }
}

fn print_reply(reply: &Reply) {
    println!("\n{}", reply.text);
    let mut index = 1;
    for row in &reply.keyboard {
        let labels: Vec<String> = row
            .iter()
            .map(|button| {
                let label = format!("[#{} {}]", index, button.label);
                index += 1;
                label
            })
            .collect();
        println!("  {}", labels.join(" "));
    }
}

/// Run the terminal dialogue for one account until `/quit` or end of input
pub async fn run_console(sessions: Arc<SessionRegistry>, account: AccountId) -> ColorwheelResult<()> {
    info!(account = %account, "console session started");
    println!("Type a stake, press a button with #n, /start to reset, /quit to leave.");

    let (_, mut on_screen) = sessions.dispatch(&account, Input::Start);
    print_reply(&on_screen);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line, &on_screen) {
            ConsoleLine::Quit => break,
            ConsoleLine::NoSuchButton(index) => println!("No button #{}", index),
            ConsoleLine::Turn(input) => {
                (_, on_screen) = sessions.dispatch(&account, input);
                print_reply(&on_screen);
            }
        }
    }

    info!(account = %account, "console session ended");
    Ok(())
}
