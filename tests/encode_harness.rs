//! Avro encode integration harness.
//!
//! # What this covers
//!
//! - **Round trip**: records written by `ltsv2avro::convert` read back with
//!   the same fields, in order, for every supported codec.
//! - **Flush per record**: when the stream fails part-way, the records before
//!   the failure are still in a readable container.
//! - **Cancellation and empty input**: both still produce a valid container.
//!
//! # Running
//!
//! ```sh
//! cargo test --test encode_harness
//! ```

mod common;
use common::*;

use apache_avro::types::Value as AvroValue;
use apache_avro::{Reader, Schema};
use ltsv2avro_core::{Codec, EncodeConfig, LtsvConfig, LtsvError};
use ltsv2avro_sink::SinkError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tokio_util::sync::CancellationToken;

fn schema() -> Schema {
    Schema::parse_str(SCHEMA_JSON).unwrap()
}

fn encode(lines: &[&str], encode: &EncodeConfig, cancel: CancellationToken) -> (Result<u64, SinkError>, Vec<u8>) {
    let mut out = Vec::new();
    let res = ltsv2avro::convert(
        source(lines.iter().copied()),
        &LtsvConfig::default(),
        &schema(),
        &mut out,
        encode,
        cancel,
    )
    .map_err(|e| e.source);
    (res, out)
}

fn read_back(bytes: &[u8]) -> Vec<Vec<(String, AvroValue)>> {
    Reader::new(bytes)
        .unwrap()
        .map(|v| match v.unwrap() {
            AvroValue::Record(fields) => fields,
            other => panic!("not a record: {other:?}"),
        })
        .collect()
}

fn get<'a>(fields: &'a [(String, AvroValue)], name: &str) -> &'a AvroValue {
    &fields.iter().find(|(n, _)| n == name).unwrap().1
}

#[rstest]
#[case::null(Codec::Null)]
#[case::deflate(Codec::Deflate)]
#[case::snappy(Codec::Snappy)]
#[case::zstandard(Codec::Zstandard)]
#[case::bzip2_unsupported(Codec::Bzip2)]
fn corpus_round_trips(#[case] codec: Codec) {
    let cfg = EncodeConfig {
        codec,
        ..EncodeConfig::default()
    };
    let (res, bytes) = encode(CORPUS_VALID, &cfg, CancellationToken::new());
    assert_eq!(res.unwrap(), CORPUS_VALID.len() as u64);

    let records = read_back(&bytes);
    assert_eq!(records.len(), CORPUS_VALID.len());

    let first = &records[0];
    assert_eq!(*get(first, "timestamp"), AvroValue::TimestampMicros(1_737_524_531_012_345));
    assert_eq!(*get(first, "severity"), AvroValue::Enum(3, "LEVEL_INFO".to_string()));
    assert_eq!(*get(first, "body"), AvroValue::String("hello, world".to_string()));
    assert_eq!(*get(first, "tags"), AvroValue::Array(Vec::new()));

    let third = &records[2];
    assert_eq!(
        *get(third, "tags"),
        AvroValue::Array(vec![
            AvroValue::String("payments".to_string()),
            AvroValue::String("retry".to_string()),
        ])
    );

    match get(&records[1], "attributes") {
        AvroValue::Map(attrs) => {
            assert_eq!(attrs.len(), 2);
            assert_eq!(attrs["host"], AvroValue::String("db1".to_string()));
        }
        other => panic!("attributes not a map: {other:?}"),
    }
}

#[test]
fn records_before_a_failure_are_kept() {
    let lines = [CORPUS_VALID[0], CORPUS_VALID[1], "timestamp:soon\tbody:x", CORPUS_VALID[2]];
    let (res, bytes) = encode(&lines, &EncodeConfig::default(), CancellationToken::new());

    assert!(matches!(
        res,
        Err(SinkError::Pipeline(LtsvError::InvalidTimestamp { .. }))
    ));
    assert_eq!(read_back(&bytes).len(), 2);
}

#[test]
fn cancelled_run_still_writes_a_container() {
    let token = CancellationToken::new();
    token.cancel();
    let (res, bytes) = encode(CORPUS_VALID, &EncodeConfig::default(), token);

    match res {
        Err(SinkError::Pipeline(e)) => assert!(e.is_cancelled()),
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(read_back(&bytes).is_empty());
}

#[test]
fn empty_input_is_an_empty_container() {
    let (res, bytes) = encode(&[], &EncodeConfig::default(), CancellationToken::new());
    assert_eq!(res.unwrap(), 0);
    assert!(read_back(&bytes).is_empty());
}

#[test]
fn small_blocks_round_trip() {
    let input = corpus_high_volume(200);
    let lines: Vec<&str> = input.iter().map(String::as_str).collect();
    let cfg = EncodeConfig {
        block_length: 1,
        codec: Codec::Deflate,
    };
    let (res, bytes) = encode(&lines, &cfg, CancellationToken::new());
    assert_eq!(res.unwrap(), 200);
    let records = read_back(&bytes);
    assert_eq!(records.len(), 200);
    assert_eq!(*get(&records[199], "body"), AvroValue::String("log line 199".to_string()));
}

#[test]
fn schema_mismatch_is_reported() {
    let strict = Schema::parse_str(
        r#"{"type":"record","name":"Strict","fields":[{"name":"body","type":"int"}]}"#,
    )
    .unwrap();
    let mut out = Vec::new();
    let res = ltsv2avro::convert(
        source([CORPUS_VALID[0]]),
        &LtsvConfig::default(),
        &strict,
        &mut out,
        &EncodeConfig::default(),
        CancellationToken::new(),
    )
    .map_err(|e| e.source);
    assert!(matches!(res, Err(SinkError::Mismatch { field, .. }) if field == "body"));
}

#[test]
fn failure_reports_the_line_it_stopped_at() {
    let lines = [CORPUS_VALID[0], CORPUS_VALID[1], "timestamp:soon\tbody:x", CORPUS_VALID[2]];
    let mut out = Vec::new();
    let err = ltsv2avro::convert(
        source(lines),
        &LtsvConfig::default(),
        &schema(),
        &mut out,
        &EncodeConfig::default(),
        CancellationToken::new(),
    )
    .unwrap_err();

    assert_eq!(err.line_no, 3);
    assert_eq!(err.to_string(), "conversion stopped at line 3");
    assert!(matches!(err.source, SinkError::Pipeline(LtsvError::InvalidTimestamp { .. })));
}
