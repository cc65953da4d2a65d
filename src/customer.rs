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

//! Customers and the transaction registration policy.
//!
//! A [`Customer`] owns its accounts and is the entry point for moving money:
//! [`Customer::carry_out_transaction`] checks the daily transaction count
//! (a soft limit that only raises an [`Advisory`]) and then hands the
//! transaction to the account through [`Transaction::register`].

use crate::account::{Account, AccountSummary, CheckingLimits};
use crate::base::{AccountNumber, DocumentNumber};
use crate::error::{Advisory, BankError};
use crate::transaction::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of a registered transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub account: AccountNumber,
    /// Balance right after the transaction was applied.
    pub balance: Decimal,
    /// Soft-limit notice raised before the transaction ran, if any.
    pub advisory: Option<Advisory>,
}

/// A natural person holding zero or more accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    document_number: DocumentNumber,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<Account>,
    daily_transaction_limit: usize,
}

impl Customer {
    pub const DEFAULT_DAILY_TRANSACTION_LIMIT: usize = 10;

    pub fn new(
        document_number: DocumentNumber,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: impl Into<String>,
    ) -> Self {
        Self {
            document_number,
            name: name.into(),
            birth_date,
            address: address.into(),
            accounts: Vec::new(),
            daily_transaction_limit: Self::DEFAULT_DAILY_TRANSACTION_LIMIT,
        }
    }

    /// Overrides how many transactions per UTC day an account may record
    /// before an advisory is raised.
    pub fn with_daily_transaction_limit(mut self, limit: usize) -> Self {
        self.daily_transaction_limit = limit;
        self
    }

    pub fn document_number(&self) -> &DocumentNumber {
        &self.document_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn daily_transaction_limit(&self) -> usize {
        self.daily_transaction_limit
    }

    /// Accounts in the order they were opened.
    pub fn accounts(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number() == number)
    }

    /// The account opened first, used when no account number is given.
    pub fn first_account(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn account_summaries(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|account| account.summary(&self.name))
            .collect()
    }

    /// Appends an already built account.
    ///
    /// # Errors
    ///
    /// [`BankError::OwnerMismatch`] if the account was built for someone else.
    pub fn add_account(&mut self, account: Account) -> Result<(), BankError> {
        if account.owner() != &self.document_number {
            return Err(BankError::OwnerMismatch);
        }
        self.push_owned(account);
        Ok(())
    }

    /// Opens a plain account under `number` for this customer.
    pub fn open_account(&mut self, number: AccountNumber) -> &Account {
        let account = Account::new(number, self.document_number.clone());
        self.push_owned(account)
    }

    /// Opens a checking account under `number` for this customer.
    pub fn open_checking_account(
        &mut self,
        number: AccountNumber,
        limits: CheckingLimits,
    ) -> &Account {
        let account = Account::checking(number, self.document_number.clone(), limits);
        self.push_owned(account)
    }

    fn push_owned(&mut self, account: Account) -> &Account {
        info!(
            customer = %self.document_number,
            account = %account.number(),
            "account opened"
        );
        self.accounts.push(account);
        &self.accounts[self.accounts.len() - 1]
    }

    /// Runs `transaction` against one of this customer's accounts.
    ///
    /// Reaching the daily transaction limit is reported but does not stop
    /// the transaction. Whether the money moves is up to the account.
    ///
    /// # Errors
    ///
    /// - [`BankError::AccountNotFound`] - The customer owns no account `number`.
    /// - [`BankError::Transaction`] - The account rejected the movement.
    pub fn carry_out_transaction(
        &mut self,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<Receipt, BankError> {
        let limit = self.daily_transaction_limit;
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.number() == number)
            .ok_or(BankError::AccountNotFound)?;

        let advisory = if account.history().todays_transactions().len() >= limit {
            warn!(account = %number, limit, "daily transaction limit exceeded");
            Some(Advisory::DailyTransactionLimitExceeded { limit })
        } else {
            None
        };

        match transaction.register(account) {
            Ok(()) => {
                debug!(
                    account = %number,
                    kind = %transaction.kind(),
                    value = %transaction.value(),
                    balance = %account.balance(),
                    "transaction registered"
                );
                Ok(Receipt {
                    account: number,
                    balance: account.balance(),
                    advisory,
                })
            }
            Err(error) => {
                debug!(
                    account = %number,
                    kind = %transaction.kind(),
                    value = %transaction.value(),
                    %error,
                    "transaction rejected"
                );
                Err(error.into())
            }
        }
    }
}
