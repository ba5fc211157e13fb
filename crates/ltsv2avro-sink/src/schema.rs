//! Schema loading with a size cap.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use apache_avro::Schema;

use crate::error::SinkError;

/// Read at most `max_bytes` from `path` and parse it as an Avro schema.
/// A larger file is rejected rather than truncated.
pub fn load_schema(path: &Path, max_bytes: u64) -> Result<Schema, SinkError> {
    let read_err = |source| SinkError::SchemaRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;

    let mut text = String::new();
    file.take(max_bytes.saturating_add(1))
        .read_to_string(&mut text)
        .map_err(read_err)?;
    if text.len() as u64 > max_bytes {
        return Err(SinkError::SchemaTooLarge {
            path: path.to_path_buf(),
            max: max_bytes,
        });
    }

    tracing::debug!(path = %path.display(), bytes = text.len(), "schema loaded");
    parse_schema(&text)
}

pub fn parse_schema(text: &str) -> Result<Schema, SinkError> {
    Schema::parse_str(text).map_err(SinkError::SchemaParse)
}
