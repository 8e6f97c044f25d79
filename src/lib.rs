//! # MPS7 Reader
//!
//! Decodes MPS7 v1 transaction logs into typed records and computes
//! aggregate totals and per-user balances.
//!
//! ## Design Principles
//!
//! - **Strict validation**: the magic token and version are checked before any record is trusted
//! - **Streaming decoding**: records are decoded lazily, one per cursor advance
//! - **Replayable passes**: the cursor rewinds its source for each independent pass
//! - **No silent recovery**: truncation and unknown record kinds abort the pass
//!
//! ## Format
//!
//! A 9-byte header (`MPS7`, version `1`, big-endian `u32` record count) is
//! followed by that many packed records: a kind tag, a `u32` timestamp, a
//! `u64` user id and, for debits and credits only, a `u64` amount.
//!
//! ## Example
//!
//! ```no_run
//! use mps7_reader::{try_aggregate, try_balance_for, Mps7Reader};
//!
//! let mut reader = Mps7Reader::open_path("txnlog.dat")?;
//! let summary = try_aggregate(reader.records())?;
//! reader.reset()?;
//! let balance = try_balance_for(reader.records(), 2456938384156277127)?;
//! reader.close()?;
//! println!("{} debited, balance {}", summary.total_debits, balance);
//! # Ok::<(), mps7_reader::Mps7Error>(())
//! ```

pub mod currency;
pub mod error;
pub mod header;
pub mod reader;
pub mod record;
pub mod summary;
mod wire;

pub use currency::{format_currency, format_total, CurrencyUnit};
pub use error::{Mps7Error, Result};
pub use header::{validate_header, HEADER_LEN, MAGIC, SUPPORTED_VERSION};
pub use reader::{CursorState, Mps7Reader, Records};
pub use record::{decode_one, Activity, Record, RecordKind};
pub use summary::{aggregate, balance_for, try_aggregate, try_balance_for, Summary};
