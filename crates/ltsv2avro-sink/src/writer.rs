//! Record stream → Avro object container.

use std::collections::HashMap;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use apache_avro::types::Value as AvroValue;
use apache_avro::{Schema, Writer};
use ltsv2avro_core::{EncodeConfig, LineSource, RecordStream};

use crate::codec::avro_codec;
use crate::convert::record_to_avro;
use crate::error::SinkError;

const AVRO_MAGIC: &[u8] = b"Obj\x01";

/// Encode every record of `records` into `out` as an Avro object container.
///
/// The current block is flushed after each record, so a failure part-way
/// through leaves every earlier record readable. The container is finished
/// and `out` flushed on every path; the first error wins.
pub fn write_records<S, W>(
    records: &mut RecordStream<S>,
    schema: &Schema,
    out: W,
    cfg: &EncodeConfig,
) -> Result<u64, SinkError>
where
    S: LineSource,
    W: Write,
{
    let codec = avro_codec(cfg.codec);
    let mut writer = Writer::builder()
        .schema(schema)
        .writer(out)
        .codec(codec)
        .block_size(cfg.block_length)
        .build();

    // The encoder emits its header lazily on the first append.
    let mut header_written = false;
    let written = records.try_for_each(|record| {
        let value = record_to_avro(record, schema)?;
        header_written = true;
        if let Err(e) = writer.append(value) {
            tracing::debug!(?record, error = %e, "failed to encode record");
            return Err(SinkError::Encode(e));
        }
        writer.flush().map_err(SinkError::Encode)?;
        Ok(())
    });

    let finished = writer
        .into_inner()
        .map_err(SinkError::Encode)
        .and_then(|mut out| {
            if !header_written {
                write_header(&mut out, schema, codec)?;
            }
            out.flush().map_err(SinkError::from)
        });

    let count = written?;
    finished?;
    tracing::debug!(records = count, codec = %cfg.codec, "container finished");
    Ok(count)
}

/// Write a bare container header: magic, schema and codec metadata, sync
/// marker. Used when no record reached the encoder, so the output is still a
/// valid container with zero blocks.
fn write_header<W: Write>(
    out: &mut W,
    schema: &Schema,
    codec: apache_avro::Codec,
) -> Result<(), SinkError> {
    let schema_json = serde_json::to_string(schema)
        .map_err(|e| SinkError::Encode(apache_avro::Error::ConvertJsonToString(e)))?;
    let metadata = HashMap::from([
        ("avro.schema".to_string(), AvroValue::Bytes(schema_json.into_bytes())),
        ("avro.codec".to_string(), AvroValue::from(codec)),
    ]);
    let meta = apache_avro::to_avro_datum(
        &Schema::Map(Box::new(Schema::Bytes)),
        AvroValue::Map(metadata),
    )
    .map_err(SinkError::Encode)?;

    // No block follows, so the marker is never matched against anything.
    let marker = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_le_bytes();

    out.write_all(AVRO_MAGIC)?;
    out.write_all(&meta)?;
    out.write_all(&marker)?;
    Ok(())
}
