//! In-memory account ledger shared by both front-ends.

use crate::games::types::{AccountId, AccountSnapshot};
use dashmap::DashMap;

/// Balance given to every account on first touch unless configured otherwise
pub const DEFAULT_STARTING_BALANCE: i64 = 1000;

/// Balance and overdraft flag for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub balance: i64,
    credit_granted: bool,
}

impl Account {
    fn fresh(starting_balance: i64) -> Self {
        Self {
            balance: starting_balance,
            credit_granted: false,
        }
    }

    pub fn credit_granted(&self) -> bool {
        self.credit_granted
    }

    /// One-way switch; there is no way back to `false`
    pub fn grant_credit(&mut self) {
        self.credit_granted = true;
    }

    pub fn can_cover(&self, amount: i64) -> bool {
        self.snapshot().can_cover(amount)
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            balance: self.balance,
            credit_granted: self.credit_granted,
        }
    }
}

/// Thread-safe map of accounts with per-key exclusion.
///
/// Every mutation goes through the entry guard of the account it touches,
/// so concurrent read-modify-write on one account cannot lose updates while
/// other accounts proceed on other shards.
#[derive(Debug)]
pub struct AccountStore {
    accounts: DashMap<AccountId, Account>,
    starting_balance: i64,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::with_starting_balance(DEFAULT_STARTING_BALANCE)
    }

    pub fn with_starting_balance(starting_balance: i64) -> Self {
        Self {
            accounts: DashMap::new(),
            starting_balance,
        }
    }

    pub fn starting_balance(&self) -> i64 {
        self.starting_balance
    }

    /// Current state of the account, creating it on first reference
    pub fn get_or_create(&self, id: &AccountId) -> Account {
        self.with_account(id, |account| *account)
    }

    pub fn snapshot(&self, id: &AccountId) -> AccountSnapshot {
        self.get_or_create(id).snapshot()
    }

    pub fn set_balance(&self, id: &AccountId, balance: i64) {
        self.with_account(id, |account| account.balance = balance);
    }

    pub fn set_credit_granted(&self, id: &AccountId) {
        self.with_account(id, Account::grant_credit);
    }

    /// Run `f` against the account while holding its lock.
    ///
    /// `f` must not call back into this store for the same shard.
    pub fn with_account<R>(&self, id: &AccountId, f: impl FnOnce(&mut Account) -> R) -> R {
        let mut entry = self
            .accounts
            .entry(id.clone())
            .or_insert_with(|| Account::fresh(self.starting_balance));
        f(entry.value_mut())
    }

    /// Number of accounts touched so far
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
