//! # Policy
//!
//! `policy` is a module holding the numeric rules shared by the stateful and
//! stateless implementations, so the two cannot drift apart.

use rust_decimal::Decimal;

use crate::AccountError;

/// Validate an operation amount, which must be strictly positive
pub(crate) fn require_positive(
    amount: Decimal,
    message: &'static str,
) -> Result<(), AccountError> {
    if amount <= Decimal::ZERO {
        return Err(AccountError::InvalidArgument(message));
    }
    Ok(())
}

/// Compute the balance after a withdrawal, enforcing the overdraft rule: the
/// resulting balance may equal `-overdraft_limit` exactly but never go below
/// it
pub(crate) fn checked_withdrawal(
    balance: Decimal,
    amount: Decimal,
    overdraft_limit: Decimal,
) -> Result<Decimal, AccountError> {
    let new_balance = balance - amount;
    if new_balance < -overdraft_limit {
        return Err(AccountError::OverdraftExceeded {
            limit: overdraft_limit,
        });
    }
    Ok(new_balance)
}
