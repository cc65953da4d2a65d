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

use anyhow::{Context, Result};
use bank_simulator::{
    Bank, BankConfig, BankError, CheckingLimits, DocumentNumber, Statement, TransactionError,
};
use chrono::NaiveDate;
use clap::Parser;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use std::fmt::{Debug, Display};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write, stderr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Target of the events written to the audit log.
const AUDIT_TARGET: &str = "audit";

const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

const STATEMENT_CSV_HEADER: [&str; 3] = ["timestamp", "kind", "value"];

const MENU: &str = "
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[x]\tStatement (CSV)
[nc]\tNew account
[lc]\tList accounts
[nu]\tNew customer
[q]\tQuit
=> ";

/// Bank Simulator - Interactive in-memory bank
///
/// Register customers, open checking accounts, deposit, withdraw and print
/// statements. Nothing is kept after the session ends.
#[derive(Parser, Debug)]
#[command(name = "bank-simulator")]
#[command(about = "An interactive in-memory bank simulator", long_about = None)]
struct Args {
    /// Largest value accepted for a single checking account withdrawal
    #[arg(long, default_value = "100.0")]
    limit: Decimal,

    /// Maximum number of withdrawals per checking account
    #[arg(long, default_value_t = CheckingLimits::DEFAULT_LIMIT_WITHDRAWALS)]
    limit_withdrawals: usize,

    /// Transactions per account per day before a warning is shown
    #[arg(long, default_value_t = bank_simulator::Customer::DEFAULT_DAILY_TRANSACTION_LIMIT)]
    daily_limit: usize,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Append a timestamped record of every operation to this file
    #[arg(long, value_name = "FILE")]
    audit_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level, args.audit_log.as_deref())?;

    let mut bank = Bank::with_config(BankConfig {
        checking: CheckingLimits::new(args.limit, args.limit_withdrawals),
        daily_transaction_limit: args.daily_limit,
    });

    run_session(&mut bank, io::stdin().lock(), io::stdout().lock())
}

fn setup_logging(level: LevelFilter, audit_log: Option<&Path>) -> Result<()> {
    // Prompts go to stdout, so diagnostics use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(
            Targets::new()
                .with_default(level)
                .with_target(AUDIT_TARGET, LevelFilter::OFF),
        );

    let audit_log = match audit_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening audit log '{}'", path.display()))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_filter(Targets::new().with_target(AUDIT_TARGET, LevelFilter::INFO));
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(terminal_log)
        .with(audit_log)
        .init();

    Ok(())
}

/// Records an operation's arguments and outcome on the audit target.
fn audited<A: Debug, T: Debug>(operation: &str, arguments: A, run: impl FnOnce() -> T) -> T {
    info!(target: AUDIT_TARGET, operation, arguments = ?arguments, "execute");
    let result = run();
    info!(target: AUDIT_TARGET, operation, result = ?result, "result");
    result
}

/// Drives the menu loop until `q` or end of input.
///
/// # Errors
///
/// Only I/O and CSV write failures end the session; rejected operations are
/// reported to the operator and the menu is shown again.
pub fn run_session<R: BufRead, W: Write>(bank: &mut Bank, input: R, output: W) -> Result<()> {
    Shell {
        bank,
        input,
        output,
    }
    .run()
}

struct Shell<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            let Some(option) = self.prompt(MENU)? else {
                break;
            };
            match option.as_str() {
                "d" => self.deposit()?,
                "s" => self.withdraw()?,
                "e" => self.display_statement()?,
                "x" => self.export_statement()?,
                "nc" => self.create_account()?,
                "lc" => self.list_accounts()?,
                "nu" => self.create_customer()?,
                "q" => break,
                _ => self.fail("Invalid option, please select again.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Shows `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn success(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "\n=== {message} ===")?;
        Ok(())
    }

    fn fail(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "\n@@@ {message} @@@")?;
        Ok(())
    }

    /// Asks for a document number and checks the customer exists.
    fn request_customer(&mut self) -> Result<Option<DocumentNumber>> {
        let Some(document) = self.prompt("Document number (digits only): ")? else {
            return Ok(None);
        };
        let document = DocumentNumber(document);
        if self.bank.customer(&document).is_none() {
            self.fail(BankError::CustomerNotFound)?;
            return Ok(None);
        }
        Ok(Some(document))
    }

    /// Like [`Shell::request_customer`], also requiring at least one account.
    fn request_account_holder(&mut self) -> Result<Option<DocumentNumber>> {
        let Some(document) = self.request_customer()? else {
            return Ok(None);
        };
        let has_accounts = self
            .bank
            .customer(&document)
            .is_some_and(|customer| customer.has_accounts());
        if !has_accounts {
            self.fail(BankError::NoAccount)?;
            return Ok(None);
        }
        Ok(Some(document))
    }

    fn request_value(&mut self, label: &str) -> Result<Option<Decimal>> {
        let Some(value) = self.prompt(label)? else {
            return Ok(None);
        };
        match Decimal::from_str(&value) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.fail(format_args!("Operation failed! {}", TransactionError::InvalidValue))?;
                Ok(None)
            }
        }
    }

    fn deposit(&mut self) -> Result<()> {
        let Some(document) = self.request_account_holder()? else {
            return Ok(());
        };
        let Some(value) = self.request_value("Deposit value: ")? else {
            return Ok(());
        };
        let bank = &mut *self.bank;
        let result = audited("deposit", (&document, value), || bank.deposit(&document, value));
        self.report(result, "Deposit completed")
    }

    fn withdraw(&mut self) -> Result<()> {
        let Some(document) = self.request_account_holder()? else {
            return Ok(());
        };
        let Some(value) = self.request_value("Withdrawal value: ")? else {
            return Ok(());
        };
        let bank = &mut *self.bank;
        let result = audited("withdraw", (&document, value), || bank.withdraw(&document, value));
        self.report(result, "Withdrawal completed")
    }

    fn report(
        &mut self,
        result: Result<bank_simulator::Receipt, BankError>,
        done: &str,
    ) -> Result<()> {
        match result {
            Ok(receipt) => {
                if let Some(advisory) = receipt.advisory {
                    self.fail(advisory)?;
                }
                self.success(format_args!("{done}! Balance: {:.2}", receipt.balance))
            }
            Err(error) => self.fail(format_args!("Operation failed! {error}")),
        }
    }

    fn statement(&mut self) -> Result<Option<Statement>> {
        let Some(document) = self.request_account_holder()? else {
            return Ok(None);
        };
        match self.bank.statement(&document) {
            Ok(statement) => Ok(Some(statement)),
            Err(error) => {
                self.fail(error)?;
                Ok(None)
            }
        }
    }

    fn display_statement(&mut self) -> Result<()> {
        let Some(statement) = self.statement()? else {
            return Ok(());
        };
        writeln!(self.output, "\n================ STATEMENT ================")?;
        writeln!(self.output, "{statement}")?;
        writeln!(self.output, "===========================================")?;
        Ok(())
    }

    fn export_statement(&mut self) -> Result<()> {
        let Some(statement) = self.statement()? else {
            return Ok(());
        };
        write_statement(&statement, &mut self.output)?;
        Ok(())
    }

    fn create_account(&mut self) -> Result<()> {
        let Some(document) = self.request_customer()? else {
            return Ok(());
        };
        let bank = &mut *self.bank;
        let result = audited("create_account", &document, || {
            bank.open_checking_account(&document)
        });
        match result {
            Ok(number) => self.success(format_args!("Account {number} created successfully!")),
            Err(error) => self.fail(error),
        }
    }

    fn list_accounts(&mut self) -> Result<()> {
        let Some(document) = self.request_customer()? else {
            return Ok(());
        };
        match self.bank.list_accounts(&document) {
            Ok(summaries) => {
                for summary in summaries {
                    writeln!(self.output, "{}", "=".repeat(100))?;
                    writeln!(self.output, "{summary}")?;
                }
                Ok(())
            }
            Err(error) => self.fail(error),
        }
    }

    fn create_customer(&mut self) -> Result<()> {
        let Some(document) = self.prompt("Document number (digits only): ")? else {
            return Ok(());
        };
        let document = DocumentNumber(document);
        if self.bank.customer(&document).is_some() {
            return self.fail(BankError::DuplicateCustomer);
        }

        let Some(name) = self.prompt("Full name: ")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompt("Birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let Ok(birth_date) = NaiveDate::parse_from_str(&birth_date, BIRTH_DATE_FORMAT) else {
            return self.fail("Invalid birth date, expected dd-mm-yyyy.");
        };
        let Some(address) = self.prompt("Address (street, number - district - city/state): ")?
        else {
            return Ok(());
        };

        let bank = &mut *self.bank;
        let result = audited("create_customer", (&document, &name, birth_date), || {
            bank.open_customer(document.clone(), name.as_str(), birth_date, address.as_str())
                .map(|_| ())
        });
        match result {
            Ok(()) => self.success("Customer created successfully!"),
            Err(error) => self.fail(error),
        }
    }
}

/// Writes a statement's lines as CSV.
///
/// # CSV Format
///
/// Columns: `timestamp, kind, value`. The header is written even when the
/// statement has no lines.
///
/// ```csv
/// timestamp,kind,value
/// 2024-01-15T09:30:00Z,deposit,200
/// 2024-01-15T09:31:00Z,withdraw,50
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_statement<W: Write>(statement: &Statement, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(STATEMENT_CSV_HEADER)?;

    for line in &statement.lines {
        wtr.serialize(line)?;
    }

    wtr.flush()?;
    Ok(())
}
