use crate::games::engine::WagerEngine;
use crate::games::types::{AccountId, AccountSnapshot, Color, Number};
use crate::session::render::{self, Reply};
use crate::session::state::{Action, Input, PendingWager, SessionState};
use tracing::debug;

/// Bet-construction dialogue for one account.
///
/// Cycles `MainMenu -> AwaitingBet -> AwaitingColor -> AwaitingNumber ->
/// MainMenu`. Inputs that do not fit the current state re-prompt without
/// touching the pending wager or the account.
#[derive(Debug, Clone)]
pub struct SessionFlow {
    account_id: AccountId,
    state: SessionState,
}

impl SessionFlow {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            state: SessionState::MainMenu,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pending(&self) -> PendingWager {
        self.state.pending()
    }

    /// Apply one turn of input and return what to show the player
    pub fn handle(&mut self, input: Input, engine: &WagerEngine) -> Reply {
        use SessionState::*;

        let (next, reply) = match (self.state, input) {
            (_, Input::Start) => (MainMenu, render::welcome(&self.snapshot(engine))),

            // Restart the round from any step
            (_, Input::Action(Action::NewGame)) => (AwaitingBet, render::bet_prompt()),

            (MainMenu, Input::Action(Action::TakeCredit)) => {
                let snapshot = engine.grant_credit(&self.account_id);
                (MainMenu, render::credit_granted(&snapshot))
            }

            (AwaitingBet, Input::Text(text)) => self.accept_stake(&text, engine),

            (AwaitingBet | AwaitingColor { .. }, Input::Action(Action::BackToMenu)) => {
                (MainMenu, render::menu(&self.snapshot(engine)))
            }

            (AwaitingColor { amount }, Input::Action(Action::PickColor(color))) => (
                AwaitingNumber { amount, color },
                render::number_prompt(amount, color),
            ),

            (AwaitingNumber { amount, color }, Input::Action(Action::PickNumber(number))) => {
                self.resolve(amount, color, number, engine)
            }

            (AwaitingNumber { amount, .. }, Input::Action(Action::BackToColor)) => {
                (AwaitingColor { amount }, render::color_prompt(amount))
            }

            (state, _) => (state, render::with_hint(self.prompt(state, engine))),
        };

        if next != self.state {
            debug!(account = %self.account_id, from = ?self.state, to = ?next, "session transition");
        }
        self.state = next;
        reply
    }

    /// Parse the free-text stake and pre-check it against the known balance.
    ///
    /// Only an account that could still take credit is turned back here; the
    /// engine's funds check at resolution is the authoritative one.
    fn accept_stake(&self, text: &str, engine: &WagerEngine) -> (SessionState, Reply) {
        let amount = match text.trim().parse::<i64>() {
            Ok(amount) => amount,
            Err(_) => return (SessionState::AwaitingBet, render::not_a_number()),
        };
        if amount <= 0 {
            return (SessionState::AwaitingBet, render::stake_not_positive());
        }

        let snapshot = self.snapshot(engine);
        if !snapshot.can_cover(amount) && !snapshot.credit_granted {
            return (SessionState::MainMenu, render::credit_offer(amount, &snapshot));
        }

        (SessionState::AwaitingColor { amount }, render::color_prompt(amount))
    }

    fn resolve(
        &self,
        amount: i64,
        color: Color,
        number: Number,
        engine: &WagerEngine,
    ) -> (SessionState, Reply) {
        let reply = match engine.place_wager(&self.account_id, amount, color, number) {
            Ok(outcome) => render::outcome(outcome, &self.snapshot(engine)),
            Err(rejection) => render::rejected(rejection, &self.snapshot(engine)),
        };
        (SessionState::MainMenu, reply)
    }

    /// Re-render the prompt that belongs to `state`
    fn prompt(&self, state: SessionState, engine: &WagerEngine) -> Reply {
        match state {
            SessionState::MainMenu => render::menu(&self.snapshot(engine)),
            SessionState::AwaitingBet => render::bet_prompt(),
            SessionState::AwaitingColor { amount } => render::color_prompt(amount),
            SessionState::AwaitingNumber { amount, color } => render::number_prompt(amount, color),
        }
    }

    fn snapshot(&self, engine: &WagerEngine) -> AccountSnapshot {
        engine.snapshot(&self.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountStore;
    use crate::games::outcome::ScriptedOutcome;
    use crate::games::types::Draw;
    use std::sync::Arc;

    fn n(value: u8) -> Number {
        Number::new(value).unwrap()
    }

    fn engine_drawing(draw: Draw) -> WagerEngine {
        WagerEngine::with_outcomes(
            Arc::new(AccountStore::new()),
            Arc::new(ScriptedOutcome::always(draw)),
        )
    }

    fn text(value: &str) -> Input {
        Input::Text(value.to_string())
    }

    #[test]
    fn test_full_round_loses_stake() {
        let engine = engine_drawing(Draw::new(Color::Black, n(3)));
        let mut flow = SessionFlow::new(AccountId::from(10));

        flow.handle(Input::Start, &engine);
        flow.handle(Action::NewGame.into(), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingBet);

        flow.handle(text("100"), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 100 });

        flow.handle(Action::PickColor(Color::Red).into(), &engine);
        assert_eq!(
            flow.state(),
            SessionState::AwaitingNumber { amount: 100, color: Color::Red }
        );

        let reply = flow.handle(Action::PickNumber(n(3)).into(), &engine);
        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(flow.pending().is_empty());

        let outcome = reply.outcome.expect("round should settle");
        assert!(!outcome.won);
        assert_eq!(outcome.balance_after, 900);
        assert_eq!(engine.snapshot(flow.account_id()).balance, 900);
    }

    #[test]
    fn test_bad_stake_text_reprompts() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let mut flow = SessionFlow::new(AccountId::from(11));
        flow.handle(Action::NewGame.into(), &engine);

        for input in ["abc", "", "12.5", "-5", "0", "99999999999999999999"] {
            flow.handle(text(input), &engine);
            assert_eq!(flow.state(), SessionState::AwaitingBet, "input {input:?}");
        }

        flow.handle(text(" 25 "), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 25 });
        assert_eq!(engine.snapshot(flow.account_id()).balance, 1000);
    }

    #[test]
    fn test_uncovered_stake_offers_credit() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let id = AccountId::from(12);
        engine.accounts().set_balance(&id, 0);
        let mut flow = SessionFlow::new(id.clone());

        flow.handle(Action::NewGame.into(), &engine);
        let reply = flow.handle(text("50"), &engine);

        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(reply.offers(Action::TakeCredit));

        let reply = flow.handle(Action::TakeCredit.into(), &engine);
        assert!(reply.text.contains("Credit approved"));
        assert!(engine.snapshot(&id).credit_granted);
        assert_eq!(engine.snapshot(&id).balance, 0);

        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("50"), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 50 });
    }

    #[test]
    fn test_back_from_color_returns_to_menu() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let mut flow = SessionFlow::new(AccountId::from(13));
        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("30"), &engine);

        flow.handle(Action::BackToMenu.into(), &engine);

        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(flow.pending().is_empty());
    }

    #[test]
    fn test_back_from_number_keeps_amount() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let mut flow = SessionFlow::new(AccountId::from(14));
        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("30"), &engine);
        flow.handle(Action::PickColor(Color::White).into(), &engine);

        let reply = flow.handle(Action::BackToColor.into(), &engine);

        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 30 });
        assert_eq!(flow.pending().color, None);
        assert!(reply.offers(Action::PickColor(Color::Black)));
    }

    #[test]
    fn test_out_of_place_input_changes_nothing() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let mut flow = SessionFlow::new(AccountId::from(15));

        // Number press before any stake
        flow.handle(Action::PickNumber(n(2)).into(), &engine);
        assert_eq!(flow.state(), SessionState::MainMenu);

        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("30"), &engine);

        // Text and number presses while choosing a color
        flow.handle(text("40"), &engine);
        flow.handle(Action::PickNumber(n(2)).into(), &engine);
        flow.handle(Action::TakeCredit.into(), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 30 });

        flow.handle(Action::PickColor(Color::Red).into(), &engine);
        flow.handle(Action::PickColor(Color::Black).into(), &engine);
        assert_eq!(
            flow.state(),
            SessionState::AwaitingNumber { amount: 30, color: Color::Red }
        );
        assert_eq!(engine.snapshot(flow.account_id()).balance, 1000);
        assert!(!engine.snapshot(flow.account_id()).credit_granted);
    }

    #[test]
    fn test_start_abandons_round() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let mut flow = SessionFlow::new(AccountId::from(16));
        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("30"), &engine);
        flow.handle(Action::PickColor(Color::Red).into(), &engine);

        let reply = flow.handle(Input::Start, &engine);

        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(reply.text.contains("1000 coins"));
    }

    #[test]
    fn test_rejection_at_resolution_returns_to_menu() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let id = AccountId::from(17);
        let mut flow = SessionFlow::new(id.clone());
        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("800"), &engine);
        flow.handle(Action::PickColor(Color::Red).into(), &engine);

        // The other front-end spends the money meanwhile
        engine.accounts().set_balance(&id, 100);

        let reply = flow.handle(Action::PickNumber(n(1)).into(), &engine);
        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(reply.outcome.is_none());
        assert!(reply.text.contains("Bet refused"));
        assert_eq!(engine.snapshot(&id).balance, 100);
    }

    #[test]
    fn test_short_stake_with_credit_is_refused_at_resolution() {
        let engine = engine_drawing(Draw::new(Color::Red, n(1)));
        let id = AccountId::from(19);
        engine.accounts().set_balance(&id, 10);
        engine.grant_credit(&id);
        let mut flow = SessionFlow::new(id.clone());

        flow.handle(Action::NewGame.into(), &engine);
        flow.handle(text("50"), &engine);
        assert_eq!(flow.state(), SessionState::AwaitingColor { amount: 50 });

        flow.handle(Action::PickColor(Color::Red).into(), &engine);
        let reply = flow.handle(Action::PickNumber(n(1)).into(), &engine);

        assert_eq!(flow.state(), SessionState::MainMenu);
        assert!(reply.outcome.is_none());
        assert!(reply.text.contains("Bet refused"));
        assert_eq!(engine.snapshot(&id).balance, 10);
    }

    #[test]
    fn test_awaiting_number_always_has_amount_and_color() {
        let engine = engine_drawing(Draw::new(Color::White, n(6)));
        let mut flow = SessionFlow::new(AccountId::from(18));
        let inputs = [
            Input::Start,
            Action::PickColor(Color::Red).into(),
            Action::NewGame.into(),
            Action::BackToColor.into(),
            text("10"),
            Action::BackToColor.into(),
            Action::PickColor(Color::White).into(),
            Action::BackToColor.into(),
            Action::PickColor(Color::Black).into(),
            Action::PickNumber(n(6)).into(),
            Action::PickColor(Color::Red).into(),
            Action::NewGame.into(),
            text("5"),
            Action::BackToMenu.into(),
            Action::PickNumber(n(1)).into(),
        ];

        for input in inputs {
            flow.handle(input, &engine);
            if let SessionState::AwaitingNumber { .. } = flow.state() {
                let pending = flow.pending();
                assert!(pending.amount.is_some_and(|amount| amount > 0));
                assert!(pending.color.is_some());
            }
        }
    }
}
