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

//! # Bank Simulator
//!
//! This library models a small retail bank held entirely in memory:
//! customers open checking accounts, deposit and withdraw money, and read
//! statements built from each account's append-only history.
//!
//! ## Core Components
//!
//! - [`Bank`]: Customer registry and the operations offered to a shell
//! - [`Customer`]: Account holder applying the daily transaction policy
//! - [`Account`]: Balance plus [`History`], with plain and checking rules
//! - [`Transaction`]: Immutable deposit or withdrawal that registers itself
//! - [`TransactionError`] / [`BankError`]: Reasons an operation is rejected
//!
//! ## Example
//!
//! ```
//! use bank_simulator::{Bank, DocumentNumber, TransactionError, BankError};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let mut bank = Bank::new();
//! let document = DocumentNumber::from("111");
//! let birth_date = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
//! bank.open_customer(document.clone(), "Ana Souza", birth_date, "Rua A, 10").unwrap();
//! bank.open_checking_account(&document).unwrap();
//!
//! bank.deposit(&document, dec!(200.00)).unwrap();
//! bank.withdraw(&document, dec!(50.00)).unwrap();
//!
//! // Checking accounts cap a single withdrawal at 100.00 by default
//! let result = bank.withdraw(&document, dec!(150.00));
//! assert_eq!(result, Err(BankError::Transaction(TransactionError::LimitExceeded)));
//!
//! let statement = bank.statement(&document).unwrap();
//! assert_eq!(statement.balance, dec!(150.00));
//! assert_eq!(statement.lines.len(), 2);
//! ```
//!
//! ## Rejections
//!
//! A rejected deposit or withdrawal never changes the balance and is never
//! written to the history.

pub mod account;
mod bank;
mod base;
mod customer;
pub mod error;
mod history;
mod statement;
mod transaction;

pub use account::{Account, AccountKind, AccountSummary, CheckingLimits};
pub use bank::{Bank, BankConfig};
pub use base::{AGENCY, AccountNumber, DocumentNumber};
pub use customer::{Customer, Receipt};
pub use error::{Advisory, BankError, TransactionError};
pub use history::History;
pub use statement::{Statement, StatementLine};
pub use transaction::{Transaction, TransactionKind};
