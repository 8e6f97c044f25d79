//! Record model and single-record decoding.

use crate::error::{Mps7Error, Result};
use crate::wire::read_field;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::io::Read;

/// The four record kinds an MPS7 v1 stream can contain.
///
/// Backed by the single-byte tag written before every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordKind {
    /// Money leaving the user's account.
    Debit = 0,

    /// Money entering the user's account.
    Credit = 1,

    /// The user enabled autopay. Carries no amount.
    StartAutopay = 2,

    /// The user disabled autopay. Carries no amount.
    EndAutopay = 3,
}

impl RecordKind {
    /// Returns `true` for the kinds that carry an 8-byte amount field.
    pub fn has_amount(self) -> bool {
        matches!(self, RecordKind::Debit | RecordKind::Credit)
    }
}

impl TryFrom<u8> for RecordKind {
    type Error = Mps7Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(RecordKind::Debit),
            1 => Ok(RecordKind::Credit),
            2 => Ok(RecordKind::StartAutopay),
            3 => Ok(RecordKind::EndAutopay),
            _ => Err(Mps7Error::UnknownRecordKind { tag }),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Debit => "Debit",
            RecordKind::Credit => "Credit",
            RecordKind::StartAutopay => "StartAutopay",
            RecordKind::EndAutopay => "EndAutopay",
        };
        f.write_str(name)
    }
}

/// What a record did, with the amount carried by the kinds that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Money leaving the user's account.
    Debit(u64),

    /// Money entering the user's account.
    Credit(u64),

    /// The user enabled autopay.
    StartAutopay,

    /// The user disabled autopay.
    EndAutopay,
}

impl Activity {
    /// The wire tag this activity is written with.
    pub fn kind(self) -> RecordKind {
        match self {
            Activity::Debit(_) => RecordKind::Debit,
            Activity::Credit(_) => RecordKind::Credit,
            Activity::StartAutopay => RecordKind::StartAutopay,
            Activity::EndAutopay => RecordKind::EndAutopay,
        }
    }

    /// The amount of a debit or credit; `None` for autopay events.
    pub fn amount(self) -> Option<u64> {
        match self {
            Activity::Debit(amount) | Activity::Credit(amount) => Some(amount),
            Activity::StartAutopay | Activity::EndAutopay => None,
        }
    }
}

/// A single decoded record.
///
/// The amount lives inside [`Activity`], so a debit or credit without an
/// amount, or an autopay event with one, cannot be built. The unit of the
/// amount is not defined by the format and is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Kind of record and, for debits and credits, its amount.
    pub activity: Activity,

    /// Seconds since the Unix epoch. Zone interpretation is a presentation concern.
    pub timestamp: DateTime<Utc>,

    /// User the record belongs to.
    pub user_id: u64,
}

impl Record {
    /// Size of the fields shared by every record: tag, timestamp and user id.
    pub const FIXED_LEN: u64 = 1 + 4 + 8;

    /// Size of the optional amount field.
    pub const AMOUNT_LEN: u64 = 8;

    pub fn new(activity: Activity, timestamp: DateTime<Utc>, user_id: u64) -> Self {
        Record {
            activity,
            timestamp,
            user_id,
        }
    }

    pub fn debit(timestamp: DateTime<Utc>, user_id: u64, amount: u64) -> Self {
        Self::new(Activity::Debit(amount), timestamp, user_id)
    }

    pub fn credit(timestamp: DateTime<Utc>, user_id: u64, amount: u64) -> Self {
        Self::new(Activity::Credit(amount), timestamp, user_id)
    }

    pub fn start_autopay(timestamp: DateTime<Utc>, user_id: u64) -> Self {
        Self::new(Activity::StartAutopay, timestamp, user_id)
    }

    pub fn end_autopay(timestamp: DateTime<Utc>, user_id: u64) -> Self {
        Self::new(Activity::EndAutopay, timestamp, user_id)
    }

    pub fn kind(&self) -> RecordKind {
        self.activity.kind()
    }

    /// Present if and only if the record is a debit or credit.
    pub fn amount(&self) -> Option<u64> {
        self.activity.amount()
    }

    /// Number of bytes this record occupies on the wire.
    pub fn encoded_len(&self) -> u64 {
        if self.kind().has_amount() {
            Self::FIXED_LEN + Self::AMOUNT_LEN
        } else {
            Self::FIXED_LEN
        }
    }
}

/// Converts raw epoch seconds into a UTC timestamp.
fn timestamp_from_epoch(seconds: u32) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(i64::from(seconds), 0)
        .single()
        .ok_or(Mps7Error::TimestampOutOfRange { seconds })
}

/// Decodes one record from the current position of `source`.
///
/// Reads the tag, timestamp and user id, then the amount only for debits and
/// credits. A tag outside 0..=3 is rejected before any further byte is read,
/// since the tag decides how wide the record is.
///
/// # Errors
///
/// - [`Mps7Error::UnknownRecordKind`] for an unrecognized tag
/// - [`Mps7Error::Truncated`] if the stream ends inside any field
pub fn decode_one<R: Read>(source: &mut R) -> Result<Record> {
    let [tag] = read_field::<1, _>(source, "record type")?;
    let kind = RecordKind::try_from(tag)?;

    let seconds = u32::from_be_bytes(read_field(source, "timestamp")?);
    let timestamp = timestamp_from_epoch(seconds)?;
    let user_id = u64::from_be_bytes(read_field(source, "user id")?);

    let activity = match kind {
        RecordKind::Debit => Activity::Debit(read_amount(source)?),
        RecordKind::Credit => Activity::Credit(read_amount(source)?),
        RecordKind::StartAutopay => Activity::StartAutopay,
        RecordKind::EndAutopay => Activity::EndAutopay,
    };

    Ok(Record::new(activity, timestamp, user_id))
}

fn read_amount<R: Read>(source: &mut R) -> Result<u64> {
    Ok(u64::from_be_bytes(read_field(source, "amount")?))
}
