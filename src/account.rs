//! # Account
//!
//! `account` is a module providing the stateful bank account: a mutable
//! entity encapsulating a balance, an overdraft limit, and an append-only
//! transaction log.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{policy, AccountError, AccountOps};

/// Kind of balance-changing operation recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// The balance the account was opened with
    #[serde(rename = "initial deposit")]
    InitialDeposit,
    /// Funds added to the balance
    Deposit,
    /// Funds removed from the balance
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::InitialDeposit => "initial deposit",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        };
        f.write_str(label)
    }
}

/// Record of a single successful operation and its effect on the balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Kind of operation
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Magnitude of the operation, always positive
    pub amount: Decimal,
    /// Moment the operation was recorded
    pub timestamp: DateTime<Utc>,
    /// Balance immediately after the operation was applied
    pub resulting_balance: Decimal,
}

/// Stateful bank account
pub struct Account {
    /// Current balance, never below `-overdraft_limit`
    balance: Decimal,
    /// Maximum allowed negative balance as a non-negative magnitude
    overdraft_limit: Decimal,
    /// History of successful operations, insertion order is chronological
    history: Vec<Transaction>,
}

impl Account {
    /// Open a new account
    ///
    /// Fails with [`AccountError::InvalidArgument`] if `initial_balance` is
    /// negative. A negative `overdraft_limit` is clamped to zero. An initial
    /// balance greater than zero is recorded as an "initial deposit"
    /// transaction.
    pub fn new(initial_balance: Decimal, overdraft_limit: Decimal) -> Result<Self, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::InvalidArgument(
                "initial balance cannot be negative",
            ));
        }
        let mut account = Self {
            balance: initial_balance,
            overdraft_limit: overdraft_limit.max(Decimal::ZERO),
            history: Vec::new(),
        };
        if initial_balance > Decimal::ZERO {
            account.record(TransactionKind::InitialDeposit, initial_balance);
        }
        Ok(account)
    }

    /// Deposit funds into the account, returning the new balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        policy::require_positive(amount, "deposit amount must be positive")?;
        self.balance += amount;
        self.record(TransactionKind::Deposit, amount);
        Ok(self.balance)
    }

    /// Withdraw funds from the account, returning the new balance
    ///
    /// The balance may go negative down to the overdraft limit; a withdrawal
    /// past it fails with [`AccountError::OverdraftExceeded`] and leaves the
    /// account untouched.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        policy::require_positive(amount, "withdrawal amount must be positive")?;
        self.balance = policy::checked_withdrawal(self.balance, amount, self.overdraft_limit)?;
        self.record(TransactionKind::Withdrawal, amount);
        Ok(self.balance)
    }

    /// Get the current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Get the overdraft limit
    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    /// Get a copy of the ordered transaction history
    ///
    /// Mutating the returned vector does not affect the account.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.history.clone()
    }

    /// Get the number of recorded transactions
    pub fn transaction_count(&self) -> usize {
        self.history.len()
    }

    /// Append a transaction for an operation that already updated the balance
    fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.history.push(Transaction {
            kind,
            amount,
            timestamp: Utc::now(),
            resulting_balance: self.balance,
        });
    }
}

impl AccountOps for Account {
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        Account::deposit(self, amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        Account::withdraw(self, amount)
    }

    fn balance(&self) -> Decimal {
        Account::balance(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_records_initial_deposit() {
        let account = Account::new(dec!(100), dec!(200)).unwrap();
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.overdraft_limit(), dec!(200));
        let history = account.transaction_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::InitialDeposit);
        assert_eq!(history[0].amount, dec!(100));
        assert_eq!(history[0].resulting_balance, dec!(100));
    }

    #[test]
    fn new_with_zero_balance_records_nothing() {
        let account = Account::new(dec!(0), dec!(0)).unwrap();
        assert_eq!(account.balance(), dec!(0));
        assert_eq!(account.transaction_count(), 0);
    }

    #[test]
    fn new_negative_balance_fails() {
        assert!(matches!(
            Account::new(dec!(-1), dec!(0)),
            Err(AccountError::InvalidArgument(_))
        ));
    }

    #[test]
    fn new_clamps_negative_overdraft_limit() {
        let account = Account::new(dec!(0), dec!(-50)).unwrap();
        assert_eq!(account.overdraft_limit(), dec!(0));
    }

    #[test]
    fn deposit_positive_works() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        assert_eq!(account.deposit(dec!(50)), Ok(dec!(150)));
        assert_eq!(account.balance(), dec!(150));
        let history = account.transaction_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].kind, TransactionKind::Deposit);
        assert_eq!(history[1].amount, dec!(50));
        assert_eq!(history[1].resulting_balance, dec!(150));
    }

    #[test]
    fn deposit_nonpositive_fails() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        assert!(matches!(
            account.deposit(dec!(0)),
            Err(AccountError::InvalidArgument(_))
        ));
        assert!(matches!(
            account.deposit(dec!(-50)),
            Err(AccountError::InvalidArgument(_))
        ));
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.transaction_count(), 1);
    }

    #[test]
    fn withdraw_positive_works() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        assert_eq!(account.withdraw(dec!(30)), Ok(dec!(70)));
        assert_eq!(account.balance(), dec!(70));
        let history = account.transaction_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].kind, TransactionKind::Withdrawal);
        assert_eq!(history[1].amount, dec!(30));
        assert_eq!(history[1].resulting_balance, dec!(70));
    }

    #[test]
    fn withdraw_nonpositive_fails() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        assert!(matches!(
            account.withdraw(dec!(0)),
            Err(AccountError::InvalidArgument(_))
        ));
        assert!(matches!(
            account.withdraw(dec!(-30)),
            Err(AccountError::InvalidArgument(_))
        ));
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.transaction_count(), 1);
    }

    #[test]
    fn withdraw_into_overdraft_works() {
        let mut account = Account::new(dec!(100), dec!(200)).unwrap();
        assert_eq!(account.withdraw(dec!(250)), Ok(dec!(-150)));
    }

    #[test]
    fn withdraw_to_exact_limit_works() {
        let mut account = Account::new(dec!(100), dec!(200)).unwrap();
        assert_eq!(account.withdraw(dec!(300)), Ok(dec!(-200)));
    }

    #[test]
    fn withdraw_past_limit_fails_without_mutation() {
        let mut account = Account::new(dec!(100), dec!(200)).unwrap();
        assert_eq!(
            account.withdraw(dec!(350)),
            Err(AccountError::OverdraftExceeded { limit: dec!(200) })
        );
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.transaction_count(), 1);
    }

    #[test]
    fn withdraw_without_overdraft_cannot_go_negative() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        assert_eq!(
            account.withdraw(dec!(100.01)),
            Err(AccountError::OverdraftExceeded { limit: dec!(0) })
        );
        assert_eq!(account.withdraw(dec!(100)), Ok(dec!(0)));
    }

    #[test]
    fn history_preserves_operation_order() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        account.deposit(dec!(50)).unwrap();
        account.withdraw(dec!(30)).unwrap();
        let kinds: Vec<_> = account
            .transaction_history()
            .into_iter()
            .map(|tx| tx.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::InitialDeposit,
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
            ]
        );
        assert_eq!(account.transaction_count(), 3);
    }

    #[test]
    fn history_copy_is_defensive() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        let mut copy = account.transaction_history();
        copy.clear();
        assert_eq!(account.transaction_count(), 1);
        assert_eq!(account.transaction_history().len(), 1);
        // repeated reads without mutation are identical
        assert_eq!(account.transaction_history(), account.transaction_history());
        account.deposit(dec!(1)).unwrap();
        assert_eq!(account.transaction_count(), 2);
    }

    #[test]
    fn history_timestamps_never_decrease() {
        let mut account = Account::new(dec!(100), dec!(0)).unwrap();
        account.deposit(dec!(50)).unwrap();
        account.withdraw(dec!(30)).unwrap();
        let history = account.transaction_history();
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn transaction_kind_labels() {
        assert_eq!(TransactionKind::InitialDeposit.to_string(), "initial deposit");
        assert_eq!(TransactionKind::Deposit.to_string(), "deposit");
        assert_eq!(TransactionKind::Withdrawal.to_string(), "withdrawal");
    }
}
