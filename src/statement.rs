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

//! Account statements.

use crate::account::Account;
use crate::base::AccountNumber;
use crate::transaction::{Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// One ledger entry as shown on a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub value: Decimal,
}

impl From<&Transaction> for StatementLine {
    fn from(transaction: &Transaction) -> Self {
        Self {
            timestamp: transaction.timestamp(),
            kind: transaction.kind(),
            value: transaction.value(),
        }
    }
}

/// Snapshot of an account's ledger and balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub account: AccountNumber,
    pub lines: Vec<StatementLine>,
    pub balance: Decimal,
}

impl Statement {
    pub fn of(account: &Account) -> Self {
        Self {
            account: account.number(),
            lines: account
                .history()
                .generate_report(None)
                .map(StatementLine::from)
                .collect(),
            balance: account.balance(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "No transactions recorded.")?;
        }
        for line in &self.lines {
            writeln!(
                f,
                "{}\t{}\t{:.2}",
                line.timestamp.format("%d/%m/%Y"),
                line.kind,
                line.value
            )?;
        }
        write!(f, "\nBalance:\t{:.2}", self.balance)
    }
}
