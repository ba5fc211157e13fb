//! ltsv2avro: LTSV log lines in, Avro object container out.
//!
//! This crate wires the three layers together so that the binary and the
//! integration harnesses drive exactly the same path.
//!
//! # Architecture
//!
//! ```text
//! feeds (LineSource) ──► core (RowStream ──► RecordStream) ──► sink (Avro OCF)
//! ```
//!
//! The pipeline is synchronous and pull-driven. The binary runs it on a
//! blocking task and cancels it from a Ctrl-C handler.

use std::io::Write;

use apache_avro::Schema;
use tokio_util::sync::CancellationToken;

use ltsv2avro_core::{EncodeConfig, LineSource, LtsvConfig, RecordStream};
use ltsv2avro_sink::SinkError;

/// A conversion that stopped early, with the line it stopped at.
#[derive(Debug, thiserror::Error)]
#[error("conversion stopped at line {line_no}")]
pub struct ConvertError {
    /// Lines pulled from the source when the conversion stopped; 0 when it
    /// stopped before the first line.
    pub line_no: u64,
    #[source]
    pub source: SinkError,
}

/// Convert every line of `source` and write the container to `out`.
/// Returns the number of records written.
pub fn convert<S, W>(
    source: S,
    ltsv: &LtsvConfig,
    schema: &Schema,
    out: W,
    encode: &EncodeConfig,
    cancel: CancellationToken,
) -> Result<u64, ConvertError>
where
    S: LineSource,
    W: Write,
{
    let mut records = RecordStream::new(source, ltsv).with_cancellation(cancel);
    ltsv2avro_sink::write_records(&mut records, schema, out, encode).map_err(|source| {
        ConvertError {
            line_no: records.line_no(),
            source,
        }
    })
}
