//! # Bank Account Simulator
//!
//! `bank_account_sim` is a library implementing one set of bank account
//! semantics twice: as a stateful [`Account`] entity that mutates in place and
//! keeps a transaction history, and as the pure functions in [`stateless`]
//! that take a balance and return a new one, leaving the caller to carry
//! state across calls. Both share the validation rules in `policy`, so
//! switching between them mid-session is always consistent.

use rust_decimal::Decimal;
use thiserror::Error;

mod account;
mod policy;
pub mod stateless;

pub use account::{Account, Transaction, TransactionKind};

/// Error returned by account operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountError {
    /// A non-positive operation amount, or a negative opening balance
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Withdrawal would push the balance below the negated overdraft limit
    #[error("withdrawal would exceed overdraft limit of {limit}")]
    OverdraftExceeded {
        /// The overdraft limit in force for the rejected withdrawal
        limit: Decimal,
    },
}

/// Operations common to both implementations, letting a shell drive either
/// one through a single interface
pub trait AccountOps {
    /// Deposit funds, returning the new balance
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError>;
    /// Withdraw funds, returning the new balance
    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError>;
    /// Get the current balance
    fn balance(&self) -> Decimal;
}
