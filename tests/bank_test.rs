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

//! Bank public API integration tests.

use bank_simulator::{
    AccountNumber, Bank, BankConfig, BankError, CheckingLimits, DocumentNumber, TransactionError,
    TransactionKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
}

fn bank_with_customer(document: &str) -> (Bank, DocumentNumber) {
    let mut bank = Bank::new();
    let document = DocumentNumber::from(document);
    bank.open_customer(document.clone(), "Ana Souza", birth_date(), "Rua A, 10")
        .unwrap();
    (bank, document)
}

#[test]
fn open_customer_registers_once() {
    let (mut bank, document) = bank_with_customer("111");
    let result = bank.open_customer(document.clone(), "Other", birth_date(), "Rua B");
    assert_eq!(result.err(), Some(BankError::DuplicateCustomer));
    assert_eq!(bank.customers().len(), 1);
    assert_eq!(bank.customer(&document).unwrap().name(), "Ana Souza");
}

#[test]
fn customers_keep_registration_order() {
    let mut bank = Bank::new();
    for document in ["333", "111", "222"] {
        bank.open_customer(DocumentNumber::from(document), "X", birth_date(), "Y")
            .unwrap();
    }
    let documents: Vec<_> = bank
        .customers()
        .map(|customer| customer.document_number().as_str().to_owned())
        .collect();
    assert_eq!(documents, vec!["333", "111", "222"]);
}

#[test]
fn unknown_customer_everywhere() {
    let mut bank = Bank::new();
    let missing = DocumentNumber::from("999");
    assert_eq!(bank.open_account(&missing), Err(BankError::CustomerNotFound));
    assert_eq!(bank.deposit(&missing, dec!(1)), Err(BankError::CustomerNotFound));
    assert_eq!(bank.withdraw(&missing, dec!(1)), Err(BankError::CustomerNotFound));
    assert_eq!(bank.statement(&missing), Err(BankError::CustomerNotFound));
    assert_eq!(bank.list_accounts(&missing), Err(BankError::CustomerNotFound));
}

#[test]
fn operations_need_an_account() {
    let (mut bank, document) = bank_with_customer("111");
    assert_eq!(bank.deposit(&document, dec!(1)), Err(BankError::NoAccount));
    assert_eq!(bank.withdraw(&document, dec!(1)), Err(BankError::NoAccount));
    assert_eq!(bank.statement(&document), Err(BankError::NoAccount));
    assert_eq!(bank.list_accounts(&document), Ok(vec![]));
}

#[test]
fn account_numbers_are_sequential_across_customers() {
    let (mut bank, first) = bank_with_customer("111");
    let second = DocumentNumber::from("222");
    bank.open_customer(second.clone(), "Bruno", birth_date(), "Rua B")
        .unwrap();

    assert_eq!(bank.open_checking_account(&first), Ok(AccountNumber(1)));
    assert_eq!(bank.open_account(&second), Ok(AccountNumber(2)));
    assert_eq!(bank.open_checking_account(&first), Ok(AccountNumber(3)));
    assert_eq!(bank.account_count(), 3);
}

#[test]
fn failed_opening_does_not_consume_a_number() {
    let (mut bank, document) = bank_with_customer("111");
    let _ = bank.open_account(&DocumentNumber::from("999"));
    assert_eq!(bank.open_account(&document), Ok(AccountNumber(1)));
}

#[test]
fn scenario_deposit_then_capped_withdrawals() {
    let (mut bank, document) = bank_with_customer("111");
    bank.open_checking_account(&document).unwrap();

    let receipt = bank.deposit(&document, dec!(200)).unwrap();
    assert_eq!(receipt.balance, dec!(200));

    for _ in 0..3 {
        bank.withdraw(&document, dec!(50)).unwrap();
    }
    assert_eq!(
        bank.withdraw(&document, dec!(10)),
        Err(BankError::Transaction(TransactionError::WithdrawalCountExceeded))
    );

    let statement = bank.statement(&document).unwrap();
    assert_eq!(statement.balance, dec!(50));
    let kinds: Vec<_> = statement.lines.iter().map(|line| line.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Deposit,
            TransactionKind::Withdraw,
            TransactionKind::Withdraw,
            TransactionKind::Withdraw,
        ]
    );
}

#[test]
fn scenario_negative_deposit_on_fresh_account() {
    let (mut bank, document) = bank_with_customer("111");
    bank.open_checking_account(&document).unwrap();

    assert_eq!(
        bank.deposit(&document, dec!(-5)),
        Err(BankError::Transaction(TransactionError::InvalidValue))
    );
    let statement = bank.statement(&document).unwrap();
    assert_eq!(statement.balance, Decimal::ZERO);
    assert!(statement.lines.is_empty());
}

#[test]
fn scenario_withdrawal_above_limit() {
    let (mut bank, document) = bank_with_customer("111");
    bank.open_checking_account(&document).unwrap();
    bank.deposit(&document, dec!(500)).unwrap();

    assert_eq!(
        bank.withdraw(&document, dec!(150)),
        Err(BankError::Transaction(TransactionError::LimitExceeded))
    );
    assert_eq!(bank.statement(&document).unwrap().balance, dec!(500));
}

#[test]
fn default_operations_use_first_account() {
    let (mut bank, document) = bank_with_customer("111");
    let first = bank.open_account(&document).unwrap();
    let second = bank.open_account(&document).unwrap();

    bank.deposit(&document, dec!(10)).unwrap();
    bank.deposit_to(&document, second, dec!(25)).unwrap();
    bank.withdraw_from(&document, second, dec!(5)).unwrap();

    assert_eq!(bank.statement_for(&document, first).unwrap().balance, dec!(10));
    assert_eq!(bank.statement_for(&document, second).unwrap().balance, dec!(20));
    assert_eq!(
        bank.statement_for(&document, AccountNumber(42)),
        Err(BankError::AccountNotFound)
    );
    assert_eq!(
        bank.deposit_to(&document, AccountNumber(42), dec!(1)),
        Err(BankError::AccountNotFound)
    );
}

#[test]
fn accounts_of_other_customers_are_not_reachable() {
    let (mut bank, first) = bank_with_customer("111");
    let second = DocumentNumber::from("222");
    bank.open_customer(second.clone(), "Bruno", birth_date(), "Rua B")
        .unwrap();
    let number = bank.open_account(&first).unwrap();

    assert_eq!(
        bank.deposit_to(&second, number, dec!(1)),
        Err(BankError::AccountNotFound)
    );
}

#[test]
fn list_accounts_summaries() {
    let (mut bank, document) = bank_with_customer("111");
    bank.open_checking_account(&document).unwrap();
    bank.open_checking_account(&document).unwrap();

    let summaries = bank.list_accounts(&document).unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|summary| summary.agency == "0001"));
    assert!(summaries.iter().all(|summary| summary.owner_name == "Ana Souza"));
    assert_eq!(summaries[1].number, AccountNumber(2));
}

#[test]
fn config_applies_to_new_accounts_and_customers() {
    let mut bank = Bank::with_config(BankConfig {
        checking: CheckingLimits::new(dec!(500), 1),
        daily_transaction_limit: 2,
    });
    let document = DocumentNumber::from("111");
    bank.open_customer(document.clone(), "Ana", birth_date(), "Rua A")
        .unwrap();
    bank.open_checking_account(&document).unwrap();

    assert_eq!(bank.customer(&document).unwrap().daily_transaction_limit(), 2);

    bank.deposit(&document, dec!(1000)).unwrap();
    bank.withdraw(&document, dec!(400)).unwrap();
    assert_eq!(
        bank.withdraw(&document, dec!(1)),
        Err(BankError::Transaction(TransactionError::WithdrawalCountExceeded))
    );

    let receipt = bank.deposit(&document, dec!(1)).unwrap();
    assert!(receipt.advisory.is_some());
}

#[test]
fn explicit_limits_override_config() {
    let (mut bank, document) = bank_with_customer("111");
    let number = bank
        .open_checking_account_with(&document, CheckingLimits::new(dec!(1000), 5))
        .unwrap();
    bank.deposit(&document, dec!(900)).unwrap();
    bank.withdraw_from(&document, number, dec!(900)).unwrap();
    assert_eq!(bank.statement(&document).unwrap().balance, Decimal::ZERO);
}
