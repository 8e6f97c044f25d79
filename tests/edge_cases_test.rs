//! Edge case tests for decoding and reducing MPS7 streams through the public API.

use chrono::{TimeZone, Utc};
use mps7_reader::{
    aggregate, balance_for, try_aggregate, try_balance_for, Activity, CursorState, Mps7Error,
    Mps7Reader, Record, RecordKind,
};
use std::io::Cursor;

fn header(version: u8, count: u32) -> Vec<u8> {
    let mut bytes = b"MPS7".to_vec();
    bytes.push(version);
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes
}

fn push_record(bytes: &mut Vec<u8>, tag: u8, seconds: u32, user_id: u64, amount: Option<u64>) {
    bytes.push(tag);
    bytes.extend_from_slice(&seconds.to_be_bytes());
    bytes.extend_from_slice(&user_id.to_be_bytes());
    if let Some(amount) = amount {
        bytes.extend_from_slice(&amount.to_be_bytes());
    }
}

fn open(bytes: Vec<u8>) -> mps7_reader::Result<Mps7Reader<Cursor<Vec<u8>>>> {
    Mps7Reader::from_source(Cursor::new(bytes))
}

// ==================== CONCRETE SCENARIO ====================

const SINGLE_DEBIT: [u8; 30] = [
    0x4D, 0x50, 0x53, 0x37, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x64, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x64,
];

#[test]
fn test_single_debit_stream_decodes() {
    let mut reader = open(SINGLE_DEBIT.to_vec()).unwrap();
    assert_eq!(reader.record_count(), 1);

    let record = reader.advance().unwrap().unwrap();
    assert_eq!(record.kind(), RecordKind::Debit);
    assert_eq!(record.timestamp, Utc.timestamp_opt(100, 0).unwrap());
    assert_eq!(record.user_id, 7);
    assert_eq!(record.amount(), Some(100));
    assert_eq!(record.activity, Activity::Debit(100));

    assert!(reader.advance().unwrap().is_none());
}

#[test]
fn test_single_debit_stream_totals() {
    let mut reader = open(SINGLE_DEBIT.to_vec()).unwrap();
    let summary = try_aggregate(reader.records()).unwrap();
    assert_eq!(summary.total_debits, 100);
    assert_eq!(summary.total_credits, 0);

    reader.reset().unwrap();
    assert_eq!(try_balance_for(reader.records(), 7).unwrap(), -100);
}

// ==================== HEADER EDGE CASES ====================

#[test]
fn test_bad_magic_fails_before_any_record() {
    let mut bytes = b"MPS8".to_vec();
    bytes.push(1);
    bytes.extend_from_slice(&1u32.to_be_bytes());
    push_record(&mut bytes, 0, 1, 1, Some(1));

    assert!(matches!(open(bytes), Err(Mps7Error::UnrecognizedFormat)));
}

#[test]
fn test_lowercase_magic_is_rejected() {
    let mut bytes = b"mps7".to_vec();
    bytes.extend_from_slice(&[1, 0, 0, 0, 0]);
    assert!(matches!(open(bytes), Err(Mps7Error::UnrecognizedFormat)));
}

#[test]
fn test_every_other_version_is_rejected() {
    for version in [0u8, 2, 7, 255] {
        let mut bytes = header(version, 1);
        push_record(&mut bytes, 0, 1, 1, Some(1));

        match open(bytes) {
            Err(Mps7Error::UnsupportedVersion { expected, actual }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, version);
            }
            other => panic!("Expected UnsupportedVersion for {}, got {:?}", version, other),
        }
    }
}

#[test]
fn test_version_error_message() {
    let err = open(header(2, 0)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Input data reports an unsupported version; expected version 1, got version 2"
    );
}

#[test]
fn test_header_only_stream_has_no_records() {
    let mut reader = open(header(1, 0)).unwrap();
    assert_eq!(reader.records().count(), 0);
    assert_eq!(reader.state(), CursorState::Exhausted);
}

// ==================== RECORD EDGE CASES ====================

#[test]
fn test_full_pass_yields_declared_count() {
    let mut bytes = header(1, 5);
    push_record(&mut bytes, 0, 1, 1, Some(10));
    push_record(&mut bytes, 1, 2, 1, Some(20));
    push_record(&mut bytes, 2, 3, 1, None);
    push_record(&mut bytes, 3, 4, 1, None);
    push_record(&mut bytes, 1, 5, 2, Some(30));

    let mut reader = open(bytes).unwrap();
    let records: Vec<Record> = reader.records().collect::<mps7_reader::Result<_>>().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(reader.consumed(), 5);
}

#[test]
fn test_unknown_tag_never_yields_partial_record() {
    let mut bytes = header(1, 1);
    push_record(&mut bytes, 4, 1, 1, Some(1));

    let mut reader = open(bytes).unwrap();
    assert!(matches!(
        reader.advance(),
        Err(Mps7Error::UnknownRecordKind { tag: 4 })
    ));
}

#[test]
fn test_missing_amount_is_truncation_not_end() {
    // Header declares one debit but only its 13 fixed bytes follow
    let mut bytes = header(1, 1);
    push_record(&mut bytes, 0, 100, 7, None);

    let mut reader = open(bytes).unwrap();
    assert!(matches!(
        reader.advance(),
        Err(Mps7Error::Truncated { field: "amount" })
    ));
}

#[test]
fn test_partial_amount_is_truncation() {
    let mut bytes = header(1, 1);
    push_record(&mut bytes, 1, 100, 7, Some(u64::MAX));
    bytes.truncate(bytes.len() - 4);

    let mut reader = open(bytes).unwrap();
    assert!(matches!(
        reader.advance(),
        Err(Mps7Error::Truncated { field: "amount" })
    ));
}

#[test]
fn test_count_larger_than_data_is_truncation() {
    let mut bytes = header(1, 10);
    push_record(&mut bytes, 2, 1, 1, None);

    let mut reader = open(bytes).unwrap();
    let results: Vec<_> = reader.records().collect();
    assert_eq!(results.len(), 2);
    assert!(matches!(
        results[1],
        Err(Mps7Error::Truncated {
            field: "record type"
        })
    ));
}

#[test]
fn test_max_timestamp_decodes() {
    let mut bytes = header(1, 1);
    push_record(&mut bytes, 2, u32::MAX, 1, None);

    let mut reader = open(bytes).unwrap();
    let record = reader.advance().unwrap().unwrap();
    assert_eq!(record.timestamp.timestamp(), i64::from(u32::MAX));
}

#[test]
fn test_decoded_amount_matches_kind() {
    let mut bytes = header(1, 4);
    push_record(&mut bytes, 0, 1, 1, Some(10));
    push_record(&mut bytes, 1, 2, 1, Some(20));
    push_record(&mut bytes, 2, 3, 1, None);
    push_record(&mut bytes, 3, 4, 1, None);

    let mut reader = open(bytes).unwrap();
    for record in reader.records() {
        let record = record.unwrap();
        assert_eq!(record.amount().is_some(), record.kind().has_amount());
    }
}

// ==================== MULTI-PASS ====================

#[test]
fn test_replay_after_reset_is_identical() {
    let mut bytes = header(1, 4);
    push_record(&mut bytes, 1, 10, 7, Some(100));
    push_record(&mut bytes, 0, 11, 7, Some(40));
    push_record(&mut bytes, 2, 12, 9, None);
    push_record(&mut bytes, 1, 13, 9, Some(1000));

    let mut reader = open(bytes).unwrap();
    let first: Vec<Record> = reader.records().collect::<mps7_reader::Result<_>>().unwrap();
    reader.reset().unwrap();
    let second: Vec<Record> = reader.records().collect::<mps7_reader::Result<_>>().unwrap();

    assert_eq!(first, second);
    assert_eq!(balance_for(&first, 7), 60);
    assert_eq!(balance_for(&first, 9), 1000);
    assert_eq!(balance_for(&first, 1), 0);

    let summary = aggregate(&second);
    assert_eq!(summary.total_credits, 1100);
    assert_eq!(summary.total_debits, 40);
    assert_eq!(summary.autopay_starts, 1);
}

#[test]
fn test_failed_pass_discards_partial_totals() {
    let mut bytes = header(1, 3);
    push_record(&mut bytes, 0, 1, 1, Some(500));
    push_record(&mut bytes, 1, 2, 1, Some(300));
    push_record(&mut bytes, 5, 3, 1, None);

    let mut reader = open(bytes).unwrap();
    assert!(matches!(
        try_aggregate(reader.records()),
        Err(Mps7Error::UnknownRecordKind { tag: 5 })
    ));
}

#[test]
fn test_close_then_use_fails() {
    let mut reader = open(SINGLE_DEBIT.to_vec()).unwrap();
    reader.close().unwrap();

    assert!(matches!(reader.reset(), Err(Mps7Error::Closed)));
    assert!(matches!(reader.advance(), Err(Mps7Error::Closed)));
    assert!(reader.records().next().unwrap().is_err());
}
