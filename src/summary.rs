//! Streaming reductions over a record sequence.
//!
//! Both passes read every record once, in order, without holding the
//! sequence in memory. The `try_` variants consume the fallible iterator
//! produced by [`Mps7Reader::records`](crate::Mps7Reader::records) and
//! discard any partial result when an error is hit.

use crate::record::{Activity, Record};
use std::borrow::Borrow;

/// Totals across every record of a stream.
///
/// Amount totals are `u128` so that summing up to `u32::MAX` records of
/// `u64` amounts cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_debits: u128,
    pub total_credits: u128,
    pub autopay_starts: u64,
    pub autopay_ends: u64,
}

impl Summary {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the tally.
    pub fn add(&mut self, record: &Record) {
        match record.activity {
            Activity::Debit(amount) => self.total_debits += u128::from(amount),
            Activity::Credit(amount) => self.total_credits += u128::from(amount),
            Activity::StartAutopay => self.autopay_starts += 1,
            Activity::EndAutopay => self.autopay_ends += 1,
        }
    }
}

/// Computes the [`Summary`] of a record sequence in a single pass.
pub fn aggregate<I>(records: I) -> Summary
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    records.into_iter().fold(Summary::new(), |mut summary, record| {
        summary.add(record.borrow());
        summary
    })
}

/// Like [`aggregate`], but stops at the first error and returns it.
pub fn try_aggregate<I, E>(records: I) -> Result<Summary, E>
where
    I: IntoIterator<Item = Result<Record, E>>,
{
    records.into_iter().try_fold(Summary::new(), |mut summary, record| {
        summary.add(&record?);
        Ok(summary)
    })
}

/// Signed effect of one record on `user_id`'s balance.
fn balance_delta(record: &Record, user_id: u64) -> i128 {
    if record.user_id != user_id {
        return 0;
    }

    match record.activity {
        Activity::Debit(amount) => -i128::from(amount),
        Activity::Credit(amount) => i128::from(amount),
        Activity::StartAutopay | Activity::EndAutopay => 0,
    }
}

/// Computes the balance of `user_id`: credits minus debits.
///
/// Autopay records and other users' records are ignored. The result may be
/// negative.
pub fn balance_for<I>(records: I, user_id: u64) -> i128
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    records
        .into_iter()
        .map(|record| balance_delta(record.borrow(), user_id))
        .sum()
}

/// Like [`balance_for`], but stops at the first error and returns it.
pub fn try_balance_for<I, E>(records: I, user_id: u64) -> Result<i128, E>
where
    I: IntoIterator<Item = Result<Record, E>>,
{
    records.into_iter().try_fold(0i128, |balance, record| {
        Ok(balance + balance_delta(&record?, user_id))
    })
}
