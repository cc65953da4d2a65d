// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account management.
//!
//! An [`Account`] holds a balance and owns its [`History`]. Plain accounts
//! only check positivity and balance; checking accounts also cap the value
//! of a single withdrawal and the number of withdrawals ever recorded.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bank_simulator::{Account, AccountNumber, DocumentNumber, Transaction};
//!
//! let mut account = Account::new(AccountNumber(1), DocumentNumber::from("111"));
//! Transaction::deposit(dec!(100.00)).register(&mut account).unwrap();
//! assert_eq!(account.balance(), dec!(100.00));
//! assert_eq!(account.agency(), "0001");
//! ```

use crate::TransactionError;
use crate::base::{AGENCY, AccountNumber, DocumentNumber};
use crate::history::History;
use crate::transaction::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Limits enforced by a checking account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckingLimits {
    /// Largest value accepted for a single withdrawal.
    pub limit: Decimal,
    /// Maximum number of withdrawals the account will ever record.
    pub limit_withdrawals: usize,
}

impl CheckingLimits {
    pub const DEFAULT_LIMIT: Decimal = dec!(100.0);
    pub const DEFAULT_LIMIT_WITHDRAWALS: usize = 3;

    pub fn new(limit: Decimal, limit_withdrawals: usize) -> Self {
        Self {
            limit,
            limit_withdrawals,
        }
    }
}

impl Default for CheckingLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::DEFAULT_LIMIT_WITHDRAWALS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    Plain,
    Checking(CheckingLimits),
}

/// Bank account.
///
/// Agency, number and owner are fixed at construction. Balance and history
/// only change through [`Transaction::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    owner: DocumentNumber,
    balance: Decimal,
    history: History,
    kind: AccountKind,
}

impl Account {
    /// Opens a plain account with a zero balance and an empty history.
    pub fn new(number: AccountNumber, owner: DocumentNumber) -> Self {
        Self::with_kind(number, owner, AccountKind::Plain)
    }

    /// Opens a checking account with a zero balance and an empty history.
    pub fn checking(number: AccountNumber, owner: DocumentNumber, limits: CheckingLimits) -> Self {
        Self::with_kind(number, owner, AccountKind::Checking(limits))
    }

    fn with_kind(number: AccountNumber, owner: DocumentNumber, kind: AccountKind) -> Self {
        Self {
            number,
            owner,
            balance: Decimal::ZERO,
            history: History::new(),
            kind,
        }
    }

    pub fn agency(&self) -> &'static str {
        AGENCY
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Document number of the owning customer.
    pub fn owner(&self) -> &DocumentNumber {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Limits when this is a checking account.
    pub fn checking_limits(&self) -> Option<CheckingLimits> {
        match self.kind {
            AccountKind::Checking(limits) => Some(limits),
            AccountKind::Plain => None,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    /// Increases the balance. Recording the movement is the caller's job.
    pub(crate) fn deposit(&mut self, value: Decimal) -> Result<(), TransactionError> {
        if value <= Decimal::ZERO {
            return Err(TransactionError::InvalidValue);
        }
        self.balance += value;
        self.assert_invariants();
        Ok(())
    }

    /// Decreases the balance after the account-kind rules pass.
    ///
    /// Checking accounts reject, in order: too many recorded withdrawals,
    /// then a value above the per-withdrawal limit. Both block the
    /// operation before the base balance rule runs.
    pub(crate) fn withdraw(&mut self, value: Decimal) -> Result<(), TransactionError> {
        if let AccountKind::Checking(limits) = self.kind {
            if self.history.count(TransactionKind::Withdraw) >= limits.limit_withdrawals {
                return Err(TransactionError::WithdrawalCountExceeded);
            }
            if value > limits.limit {
                return Err(TransactionError::LimitExceeded);
            }
        }
        self.withdraw_from_balance(value)
    }

    fn withdraw_from_balance(&mut self, value: Decimal) -> Result<(), TransactionError> {
        if value > self.balance {
            return Err(TransactionError::InsufficientFunds);
        }
        if value <= Decimal::ZERO {
            return Err(TransactionError::InvalidValue);
        }
        self.balance -= value;
        self.assert_invariants();
        Ok(())
    }

    pub(crate) fn record(&mut self, transaction: Transaction) {
        self.history.add_transaction(transaction);
    }

    /// Listing view, with the holder's name resolved by the caller.
    pub fn summary(&self, owner_name: &str) -> AccountSummary {
        AccountSummary {
            agency: AGENCY,
            number: self.number,
            owner_name: owner_name.to_owned(),
        }
    }
}

/// One row of an account listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub agency: &'static str,
    pub number: AccountNumber,
    pub owner_name: String,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agency:\t\t{}", self.agency)?;
        writeln!(f, "Account:\t{}", self.number)?;
        write!(f, "Holder:\t\t{}", self.owner_name)
    }
}
