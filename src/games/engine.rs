use crate::accounts::AccountStore;
use crate::errors::WagerRejection;
use crate::games::outcome::{OutcomeSource, RandomOutcome};
use crate::games::types::{AccountId, AccountSnapshot, Color, Draw, Number, WagerOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Validates, draws and settles wagers against the shared ledger
pub struct WagerEngine {
    accounts: Arc<AccountStore>,
    outcomes: Arc<dyn OutcomeSource>,
}

impl WagerEngine {
    /// Create an engine drawing from the thread RNG
    pub fn new(accounts: Arc<AccountStore>) -> Self {
        Self::with_outcomes(accounts, Arc::new(RandomOutcome))
    }

    pub fn with_outcomes(accounts: Arc<AccountStore>, outcomes: Arc<dyn OutcomeSource>) -> Self {
        Self { accounts, outcomes }
    }

    pub fn accounts(&self) -> &Arc<AccountStore> {
        &self.accounts
    }

    pub fn snapshot(&self, id: &AccountId) -> AccountSnapshot {
        self.accounts.snapshot(id)
    }

    /// Check the stake, spin, and commit the new balance in one step.
    ///
    /// The balance check, the draw and the write all happen under the
    /// account's lock; a rejected wager leaves the account untouched.
    pub fn place_wager(
        &self,
        id: &AccountId,
        amount: i64,
        color: Color,
        number: Number,
    ) -> Result<WagerOutcome, WagerRejection> {
        let chosen = Draw::new(color, number);

        let settled = self.accounts.with_account(id, |account| {
            if amount <= 0 {
                return Err(WagerRejection::InvalidAmount);
            }
            if !account.can_cover(amount) {
                return Err(WagerRejection::InsufficientFunds {
                    balance: account.balance,
                    amount,
                });
            }

            let result = self.outcomes.draw();
            let won = result == chosen;
            account.balance = if won {
                account.balance.saturating_add(amount)
            } else {
                account.balance.saturating_sub(amount)
            };

            Ok((result, won, account.balance))
        });

        match settled {
            Ok((result, won, balance_after)) => {
                info!(
                    account = %id,
                    amount,
                    chosen = %format!("{} {}", chosen.color, chosen.number),
                    result = %format!("{} {}", result.color, result.number),
                    won,
                    balance_after,
                    "wager settled"
                );
                Ok(WagerOutcome {
                    account_id: id.clone(),
                    amount,
                    chosen,
                    result,
                    won,
                    balance_after,
                })
            }
            Err(rejection) => {
                warn!(account = %id, amount, %rejection, "wager rejected");
                Err(rejection)
            }
        }
    }

    /// Turn on the overdraft for an account. Idempotent; balance is untouched.
    pub fn grant_credit(&self, id: &AccountId) -> AccountSnapshot {
        let (snapshot, newly_granted) = self.accounts.with_account(id, |account| {
            let newly_granted = !account.credit_granted();
            account.grant_credit();
            (account.snapshot(), newly_granted)
        });

        if newly_granted {
            info!(account = %id, balance = snapshot.balance, "credit granted");
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::outcome::ScriptedOutcome;

    fn n(value: u8) -> Number {
        Number::new(value).unwrap()
    }

    fn engine_with(draws: Vec<Draw>) -> WagerEngine {
        WagerEngine::with_outcomes(
            Arc::new(AccountStore::new()),
            Arc::new(ScriptedOutcome::new(draws)),
        )
    }

    #[test]
    fn test_losing_wager_on_fresh_account() {
        let engine = engine_with(vec![Draw::new(Color::Black, n(3))]);
        let id = AccountId::from(1);

        let outcome = engine.place_wager(&id, 100, Color::Red, n(3)).unwrap();

        assert!(!outcome.won);
        assert_eq!(outcome.result, Draw::new(Color::Black, n(3)));
        assert_eq!(outcome.balance_after, 900);
        assert_eq!(engine.snapshot(&id).balance, 900);
    }

    #[test]
    fn test_winning_wager_doubles_all_in_stake() {
        let engine = engine_with(vec![Draw::new(Color::White, n(6))]);
        let id = AccountId::from(2);

        let outcome = engine.place_wager(&id, 1000, Color::White, n(6)).unwrap();

        assert!(outcome.won);
        assert_eq!(outcome.balance_after, 2000);
    }

    #[test]
    fn test_color_match_alone_is_a_loss() {
        let engine = engine_with(vec![Draw::new(Color::Red, n(4))]);
        let id = AccountId::from(3);

        let outcome = engine.place_wager(&id, 10, Color::Red, n(3)).unwrap();

        assert!(!outcome.won);
        assert_eq!(outcome.result.color, Color::Red);
        assert_eq!(outcome.balance_after, 990);
    }

    #[test]
    fn test_non_positive_stake_is_invalid() {
        let engine = engine_with(vec![]);
        let id = AccountId::from(4);

        for amount in [0, -1, i64::MIN] {
            assert_eq!(
                engine.place_wager(&id, amount, Color::Red, n(1)),
                Err(WagerRejection::InvalidAmount)
            );
        }
        assert_eq!(engine.snapshot(&id).balance, 1000);
    }

    #[test]
    fn test_invalid_amount_checked_before_funds() {
        let engine = engine_with(vec![]);
        let id = AccountId::from(5);
        engine.accounts().set_balance(&id, 0);

        assert_eq!(
            engine.place_wager(&id, 0, Color::Red, n(1)),
            Err(WagerRejection::InvalidAmount)
        );
    }

    #[test]
    fn test_overdraft_only_after_credit() {
        let engine = engine_with(vec![Draw::new(Color::Black, n(2))]);
        let id = AccountId::from(6);
        engine.accounts().set_balance(&id, 0);

        assert_eq!(
            engine.place_wager(&id, 50, Color::Red, n(1)),
            Err(WagerRejection::InsufficientFunds { balance: 0, amount: 50 })
        );
        assert_eq!(engine.snapshot(&id).balance, 0);

        let snapshot = engine.grant_credit(&id);
        assert_eq!(snapshot.balance, 0);
        assert!(snapshot.credit_granted);

        let outcome = engine.place_wager(&id, 50, Color::Red, n(1)).unwrap();
        assert_eq!(outcome.balance_after, -50);

        // Still negative and covered, stake is never capped
        let outcome = engine.place_wager(&id, 500, Color::Red, n(1)).unwrap();
        assert_eq!(outcome.balance_after, -550);
        assert!(engine.snapshot(&id).credit_granted);
    }

    #[test]
    fn test_credit_does_not_cover_positive_shortfall() {
        let engine = engine_with(vec![]);
        let id = AccountId::from(7);
        engine.accounts().set_balance(&id, 10);
        engine.grant_credit(&id);

        assert_eq!(
            engine.place_wager(&id, 50, Color::Red, n(1)),
            Err(WagerRejection::InsufficientFunds { balance: 10, amount: 50 })
        );
    }

    #[test]
    fn test_grant_credit_is_idempotent() {
        let engine = engine_with(vec![]);
        let id = AccountId::from(8);

        let first = engine.grant_credit(&id);
        let second = engine.grant_credit(&id);

        assert_eq!(first, second);
        assert_eq!(first.balance, 1000);
    }

    #[test]
    fn test_balance_equals_sum_of_deltas() {
        let draws = vec![
            Draw::new(Color::Red, n(1)),
            Draw::new(Color::Black, n(1)),
            Draw::new(Color::Red, n(1)),
            Draw::new(Color::White, n(5)),
        ];
        let engine = engine_with(draws);
        let id = AccountId::from(9);

        let mut expected = 1000;
        for amount in [100, 40, 7, 300] {
            let outcome = engine.place_wager(&id, amount, Color::Red, n(1)).unwrap();
            expected += if outcome.won { amount } else { -amount };
            assert_eq!(outcome.balance_after, expected);
        }
        assert_eq!(engine.snapshot(&id).balance, 1000 + 100 - 40 + 7 - 300);
    }

    #[test]
    fn test_concurrent_wagers_on_one_account_never_overdraw() {
        for round in 0..200 {
            let engine = Arc::new(engine_with(vec![Draw::new(Color::Black, n(3))]));
            let id = AccountId::from(round);
            engine.accounts().set_balance(&id, 100);

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let engine = engine.clone();
                    let id = id.clone();
                    std::thread::spawn(move || engine.place_wager(&id, 100, Color::Red, n(1)))
                })
                .collect();
            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            let accepted = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(accepted, 1, "round {round}");
            assert!(results.contains(&Err(WagerRejection::InsufficientFunds {
                balance: 0,
                amount: 100
            })));
            assert_eq!(engine.snapshot(&id).balance, 0);
        }
    }
}
