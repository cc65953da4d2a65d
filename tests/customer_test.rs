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

//! Customer public API integration tests.

use bank_simulator::{
    Account, AccountNumber, Advisory, BankError, CheckingLimits, Customer, DocumentNumber,
    Transaction, TransactionError, TransactionKind,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn make_customer(document: &str) -> Customer {
    Customer::new(
        DocumentNumber::from(document),
        "Ana Souza",
        NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        "Rua A, 10 - Centro - Recife/PE",
    )
}

#[test]
fn customer_attributes() {
    let customer = make_customer("111");
    assert_eq!(customer.document_number().as_str(), "111");
    assert_eq!(customer.name(), "Ana Souza");
    assert_eq!(customer.address(), "Rua A, 10 - Centro - Recife/PE");
    assert_eq!(customer.birth_date(), NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
}

#[test]
fn opened_accounts_belong_to_customer() {
    let mut customer = make_customer("111");
    let account = customer.open_checking_account(AccountNumber(1), CheckingLimits::default());
    assert_eq!(account.owner().as_str(), "111");
    assert_eq!(customer.accounts().len(), 1);
}

#[test]
fn foreign_account_is_not_added() {
    let mut customer = make_customer("111");
    let foreign = Account::new(AccountNumber(1), DocumentNumber::from("222"));
    assert_eq!(customer.add_account(foreign), Err(BankError::OwnerMismatch));
}

#[test]
fn accounts_iterate_in_opening_order() {
    let mut customer = make_customer("111");
    customer.open_account(AccountNumber(3));
    customer.open_account(AccountNumber(1));
    customer
        .add_account(Account::new(AccountNumber(2), DocumentNumber::from("111")))
        .unwrap();

    let numbers: Vec<_> = customer.accounts().map(|account| account.number().0).collect();
    assert_eq!(numbers, vec![3, 1, 2]);
}

#[test]
fn scenario_checking_withdrawal_cap() {
    let mut customer = make_customer("111");
    let number = AccountNumber(1);
    customer.open_checking_account(number, CheckingLimits::new(dec!(100), 3));

    let receipt = customer
        .carry_out_transaction(number, Transaction::deposit(dec!(200)))
        .unwrap();
    assert_eq!(receipt.balance, dec!(200));

    for _ in 0..3 {
        customer
            .carry_out_transaction(number, Transaction::withdraw(dec!(50)))
            .unwrap();
    }

    let result = customer.carry_out_transaction(number, Transaction::withdraw(dec!(10)));
    assert_eq!(
        result,
        Err(BankError::Transaction(TransactionError::WithdrawalCountExceeded))
    );

    let account = customer.account(number).unwrap();
    assert_eq!(account.balance(), dec!(50));
    assert_eq!(account.history().count(TransactionKind::Withdraw), 3);
    assert_eq!(account.history().count(TransactionKind::Deposit), 1);
}

#[test]
fn daily_limit_warns_but_registers() {
    let mut customer = make_customer("111");
    let number = AccountNumber(1);
    customer.open_account(number);

    for _ in 0..10 {
        let receipt = customer
            .carry_out_transaction(number, Transaction::deposit(dec!(1)))
            .unwrap();
        assert_eq!(receipt.advisory, None);
    }

    let receipt = customer
        .carry_out_transaction(number, Transaction::deposit(dec!(1)))
        .unwrap();
    assert_eq!(
        receipt.advisory,
        Some(Advisory::DailyTransactionLimitExceeded { limit: 10 })
    );
    assert_eq!(customer.account(number).unwrap().balance(), dec!(11));
}
