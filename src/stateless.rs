//! # Stateless
//!
//! `stateless` is a module providing the bank account semantics as pure
//! functions over an explicit balance value. Nothing is mutated and no
//! history is kept; the caller threads the balance (and overdraft limit)
//! across calls.

use rust_decimal::Decimal;

use crate::{policy, AccountError};

/// Deposit `amount` into `balance`, returning the new balance
pub fn deposit(balance: Decimal, amount: Decimal) -> Result<Decimal, AccountError> {
    policy::require_positive(amount, "deposit amount must be positive")?;
    Ok(balance + amount)
}

/// Withdraw `amount` from `balance`, returning the new balance
///
/// The caller must pass a non-negative `overdraft_limit`; unlike
/// [`Account::new`](crate::Account::new), a negative value is not clamped
/// here.
pub fn withdraw(
    balance: Decimal,
    amount: Decimal,
    overdraft_limit: Decimal,
) -> Result<Decimal, AccountError> {
    policy::require_positive(amount, "withdrawal amount must be positive")?;
    policy::checked_withdrawal(balance, amount, overdraft_limit)
}

/// Get the current balance, unchanged
pub fn balance(balance: Decimal) -> Decimal {
    balance
}
