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

//! Transaction records.
//!
//! A [`Transaction`] is immutable once built: its value and timestamp never
//! change. It either ends up in an account's [`History`](crate::History)
//! through [`Transaction::register`] or is dropped.

use crate::TransactionError;
use crate::account::Account;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.write_str("Deposit"),
            Self::Withdraw => f.write_str("Withdraw"),
        }
    }
}

/// A monetary movement against one account.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    value: Decimal,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Builds a transaction stamped with the current UTC time.
    pub fn new(kind: TransactionKind, value: Decimal) -> Self {
        Self::at(kind, value, Utc::now())
    }

    /// Builds a transaction with an explicit timestamp.
    pub(crate) fn at(kind: TransactionKind, value: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            value,
            timestamp,
        }
    }

    pub fn deposit(value: Decimal) -> Self {
        Self::new(TransactionKind::Deposit, value)
    }

    pub fn withdraw(value: Decimal) -> Self {
        Self::new(TransactionKind::Withdraw, value)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Applies the movement to `account` and, if the account accepts it,
    /// appends this transaction to the account's history.
    ///
    /// The account alone decides whether the movement is allowed; a rejected
    /// transaction is discarded and leaves the account untouched.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::OutOfOrder`] - The transaction is older than the
    ///   last entry already in the history.
    /// - Whatever rule the account rejected the movement with, see
    ///   [`TransactionError`].
    pub fn register(self, account: &mut Account) -> Result<(), TransactionError> {
        if account
            .history()
            .last()
            .is_some_and(|last| last.timestamp > self.timestamp)
        {
            return Err(TransactionError::OutOfOrder);
        }
        match self.kind {
            TransactionKind::Deposit => account.deposit(self.value)?,
            TransactionKind::Withdraw => account.withdraw(self.value)?,
        }
        account.record(self);
        Ok(())
    }
}
