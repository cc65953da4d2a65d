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

//! Error types for account operations and customer management.
//!
//! Every variant is an expected business outcome. A rejected operation never
//! changes balance or history.

use serde::Serialize;
use thiserror::Error;

/// Reasons a deposit or withdrawal is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    /// Amount is zero or negative
    #[error("invalid value (must be positive)")]
    InvalidValue,

    /// Withdrawal would exceed the current balance
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Withdrawal exceeds the per-transaction limit of a checking account
    #[error("withdrawal value exceeds the limit")]
    LimitExceeded,

    /// Checking account already recorded its maximum number of withdrawals
    #[error("maximum number of withdrawals exceeded")]
    WithdrawalCountExceeded,

    /// Timestamp is earlier than the last entry in the account history
    #[error("transaction predates the last recorded transaction")]
    OutOfOrder,
}

/// Failures at the customer/bank layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("a customer with this document number already exists")]
    DuplicateCustomer,

    /// Customer exists but has not opened any account yet
    #[error("customer has no account")]
    NoAccount,

    #[error("account not found")]
    AccountNotFound,

    /// Account belongs to a different customer
    #[error("account is owned by another customer")]
    OwnerMismatch,

    /// Every account number has been handed out
    #[error("no account numbers left")]
    AccountNumbersExhausted,

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Non-blocking notices raised while a transaction is carried out.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    #[error("daily transaction limit of {limit} exceeded")]
    DailyTransactionLimitExceeded { limit: usize },
}
