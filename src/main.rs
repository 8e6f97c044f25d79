//! MPS7 Reader CLI
//!
//! Decodes an MPS7 transaction log and prints aggregate totals and the
//! balance of a fixed user.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- txnlog.dat
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `MPS7_AMOUNT_UNIT`: `major` (default) or `minor`; how raw amounts are scaled for display

use log::warn;
use mps7_reader::{
    format_total, try_aggregate, try_balance_for, CurrencyUnit, Mps7Error, Mps7Reader, Result,
};
use std::env;
use std::io::{self, Write};
use std::process;

/// User whose balance is reported.
const BALANCE_USER_ID: u64 = 2456938384156277127;

const AMOUNT_UNIT_VAR: &str = "MPS7_AMOUNT_UNIT";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let input_path = args.next().ok_or(Mps7Error::MissingArgument)?;
    if let Some(extra) = args.next() {
        return Err(Mps7Error::UnexpectedArgument(extra));
    }

    let unit = amount_unit();
    let mut reader = Mps7Reader::open_path(&input_path)?;

    let summary = try_aggregate(reader.records())?;
    reader.reset()?;
    let balance = try_balance_for(reader.records(), BALANCE_USER_ID)?;
    reader.close()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "total debits: {}", format_total(summary.total_debits, unit)?)?;
    writeln!(out, "total credits: {}", format_total(summary.total_credits, unit)?)?;
    writeln!(out, "autopays started: {}", summary.autopay_starts)?;
    writeln!(out, "autopays ended: {}", summary.autopay_ends)?;
    writeln!(out, "balance for {}: {}", BALANCE_USER_ID, balance)?;
    out.flush()?;

    Ok(())
}

/// Reads the display unit from the environment, defaulting to whole units.
fn amount_unit() -> CurrencyUnit {
    match env::var(AMOUNT_UNIT_VAR) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("{}: {}, using {}", AMOUNT_UNIT_VAR, e, CurrencyUnit::default());
            CurrencyUnit::default()
        }),
        Err(_) => CurrencyUnit::default(),
    }
}
