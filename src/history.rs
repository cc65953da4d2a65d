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

//! Append-only transaction ledger owned by a single account.
//!
//! Insertion order is chronological order. Entries are never removed or
//! changed once appended.

use crate::transaction::{Transaction, TransactionKind};
use chrono::{NaiveDate, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    transactions: Vec<Transaction>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction to the end of the ledger.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// The full ledger in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Most recently recorded entry.
    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Walks the ledger in order, optionally keeping only one kind.
    ///
    /// The iterator is lazy and borrows the ledger; call again for a fresh
    /// pass from the start.
    pub fn generate_report(
        &self,
        kind: Option<TransactionKind>,
    ) -> impl Iterator<Item = &Transaction> + Clone + '_ {
        self.transactions
            .iter()
            .filter(move |transaction| kind.is_none_or(|kind| transaction.kind() == kind))
    }

    /// Number of recorded entries of `kind`.
    pub fn count(&self, kind: TransactionKind) -> usize {
        self.generate_report(Some(kind)).count()
    }

    /// Entries whose UTC calendar date is `date`.
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.timestamp().date_naive() == date)
            .collect()
    }

    /// Entries recorded on the current UTC date.
    pub fn todays_transactions(&self) -> Vec<&Transaction> {
        self.transactions_on(Utc::now().date_naive())
    }
}
