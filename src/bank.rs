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

//! Customer registry and the operations offered to the shell.
//!
//! The [`Bank`] owns every customer for the lifetime of one run and hands
//! out account numbers. All state is in memory and single-threaded.
//!
//! # Operations
//!
//! - **Customers**: registered once per document number.
//! - **Accounts**: numbered sequentially across the whole bank.
//! - **Deposits / withdrawals**: routed through the owning customer so the
//!   daily-limit advisory and the account rules both apply.
//! - **Statements / listings**: read-only views.

use crate::account::{AccountSummary, CheckingLimits};
use crate::base::{AccountNumber, DocumentNumber};
use crate::customer::{Customer, Receipt};
use crate::error::BankError;
use crate::statement::Statement;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::info;

/// Tunable policies applied to new customers and checking accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankConfig {
    /// Limits for checking accounts opened without explicit limits.
    pub checking: CheckingLimits,
    /// Transactions per account per UTC day before an advisory is raised.
    pub daily_transaction_limit: usize,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            checking: CheckingLimits::default(),
            daily_transaction_limit: Customer::DEFAULT_DAILY_TRANSACTION_LIMIT,
        }
    }
}

/// In-memory bank holding customers and their accounts.
///
/// # Invariants
///
/// - Document numbers are unique across customers.
/// - Account numbers are unique across the bank and never reused.
#[derive(Debug)]
pub struct Bank {
    config: BankConfig,
    /// Customers in registration order.
    customers: Vec<Customer>,
    /// Position in `customers` by document number.
    index: HashMap<DocumentNumber, usize>,
    next_account: AccountNumber,
}

impl Bank {
    /// Creates an empty bank with default policies.
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    pub fn with_config(config: BankConfig) -> Self {
        Bank {
            config,
            customers: Vec::new(),
            index: HashMap::new(),
            next_account: AccountNumber(1),
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Registers a new customer.
    ///
    /// # Errors
    ///
    /// [`BankError::DuplicateCustomer`] if the document number is taken.
    pub fn open_customer(
        &mut self,
        document_number: DocumentNumber,
        name: impl Into<String>,
        birth_date: NaiveDate,
        address: impl Into<String>,
    ) -> Result<&Customer, BankError> {
        if self.index.contains_key(&document_number) {
            return Err(BankError::DuplicateCustomer);
        }

        let customer = Customer::new(document_number.clone(), name, birth_date, address)
            .with_daily_transaction_limit(self.config.daily_transaction_limit);
        info!(customer = %document_number, "customer registered");

        let position = self.customers.len();
        self.customers.push(customer);
        self.index.insert(document_number, position);
        Ok(&self.customers[position])
    }

    pub fn customer(&self, document_number: &DocumentNumber) -> Option<&Customer> {
        self.index
            .get(document_number)
            .map(|&position| &self.customers[position])
    }

    /// Customers in registration order.
    pub fn customers(&self) -> std::slice::Iter<'_, Customer> {
        self.customers.iter()
    }

    /// Total number of accounts opened so far.
    pub fn account_count(&self) -> usize {
        self.customers
            .iter()
            .map(|customer| customer.accounts().len())
            .sum()
    }

    fn position(&self, document_number: &DocumentNumber) -> Result<usize, BankError> {
        self.index
            .get(document_number)
            .copied()
            .ok_or(BankError::CustomerNotFound)
    }

    fn customer_mut(&mut self, document_number: &DocumentNumber) -> Result<&mut Customer, BankError> {
        let position = self.position(document_number)?;
        Ok(&mut self.customers[position])
    }

    /// Hands out the next account number. `u32::MAX` itself is never
    /// assigned, it only marks the end of the range.
    fn allocate_account_number(&mut self) -> Result<AccountNumber, BankError> {
        let number = self.next_account;
        self.next_account = number.next().ok_or(BankError::AccountNumbersExhausted)?;
        Ok(number)
    }

    /// Opens a plain account for an existing customer.
    ///
    /// # Errors
    ///
    /// - [`BankError::CustomerNotFound`] - No customer has this document number.
    /// - [`BankError::AccountNumbersExhausted`] - No account number is left.
    pub fn open_account(&mut self, document_number: &DocumentNumber) -> Result<AccountNumber, BankError> {
        let position = self.position(document_number)?;
        let number = self.allocate_account_number()?;
        self.customers[position].open_account(number);
        Ok(number)
    }

    /// Opens a checking account with the configured default limits.
    pub fn open_checking_account(
        &mut self,
        document_number: &DocumentNumber,
    ) -> Result<AccountNumber, BankError> {
        let limits = self.config.checking;
        self.open_checking_account_with(document_number, limits)
    }

    /// Opens a checking account with explicit limits.
    ///
    /// # Errors
    ///
    /// - [`BankError::CustomerNotFound`] - No customer has this document number.
    /// - [`BankError::AccountNumbersExhausted`] - No account number is left.
    pub fn open_checking_account_with(
        &mut self,
        document_number: &DocumentNumber,
        limits: CheckingLimits,
    ) -> Result<AccountNumber, BankError> {
        let position = self.position(document_number)?;
        let number = self.allocate_account_number()?;
        self.customers[position].open_checking_account(number, limits);
        Ok(number)
    }

    /// Deposits into the customer's first account.
    ///
    /// # Errors
    ///
    /// - [`BankError::CustomerNotFound`] - Unknown document number.
    /// - [`BankError::NoAccount`] - The customer has no account yet.
    /// - [`BankError::Transaction`] - The account rejected the deposit.
    pub fn deposit(
        &mut self,
        document_number: &DocumentNumber,
        value: Decimal,
    ) -> Result<Receipt, BankError> {
        let number = self.first_account_number(document_number)?;
        self.deposit_to(document_number, number, value)
    }

    pub fn deposit_to(
        &mut self,
        document_number: &DocumentNumber,
        number: AccountNumber,
        value: Decimal,
    ) -> Result<Receipt, BankError> {
        self.customer_mut(document_number)?
            .carry_out_transaction(number, Transaction::deposit(value))
    }

    /// Withdraws from the customer's first account.
    ///
    /// # Errors
    ///
    /// Same as [`Bank::deposit`], with the withdrawal rules of the account.
    pub fn withdraw(
        &mut self,
        document_number: &DocumentNumber,
        value: Decimal,
    ) -> Result<Receipt, BankError> {
        let number = self.first_account_number(document_number)?;
        self.withdraw_from(document_number, number, value)
    }

    pub fn withdraw_from(
        &mut self,
        document_number: &DocumentNumber,
        number: AccountNumber,
        value: Decimal,
    ) -> Result<Receipt, BankError> {
        self.customer_mut(document_number)?
            .carry_out_transaction(number, Transaction::withdraw(value))
    }

    /// Statement of the customer's first account.
    pub fn statement(&self, document_number: &DocumentNumber) -> Result<Statement, BankError> {
        let number = self.first_account_number(document_number)?;
        self.statement_for(document_number, number)
    }

    pub fn statement_for(
        &self,
        document_number: &DocumentNumber,
        number: AccountNumber,
    ) -> Result<Statement, BankError> {
        let customer = self
            .customer(document_number)
            .ok_or(BankError::CustomerNotFound)?;
        let account = customer.account(number).ok_or(BankError::AccountNotFound)?;
        Ok(Statement::of(account))
    }

    /// Agency, number and holder of each of the customer's accounts.
    pub fn list_accounts(
        &self,
        document_number: &DocumentNumber,
    ) -> Result<Vec<AccountSummary>, BankError> {
        let customer = self
            .customer(document_number)
            .ok_or(BankError::CustomerNotFound)?;
        Ok(customer.account_summaries())
    }

    fn first_account_number(&self, document_number: &DocumentNumber) -> Result<AccountNumber, BankError> {
        let customer = self
            .customer(document_number)
            .ok_or(BankError::CustomerNotFound)?;
        customer
            .first_account()
            .map(|account| account.number())
            .ok_or(BankError::NoAccount)
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}
