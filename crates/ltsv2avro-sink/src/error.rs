use std::io;
use std::path::PathBuf;

use ltsv2avro_core::LtsvError;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to read schema {path}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("schema {path} is larger than {max} bytes")]
    SchemaTooLarge { path: PathBuf, max: u64 },
    #[error("invalid avro schema")]
    SchemaParse(#[source] apache_avro::Error),
    #[error("top-level schema must be a record, found {0}")]
    NotARecord(String),
    #[error("field {field:?} cannot be written as {expected}")]
    Mismatch { field: String, expected: String },
    #[error("field {field:?} is missing and the schema gives no default")]
    MissingField { field: String },
    #[error("avro encoding failed")]
    Encode(#[source] apache_avro::Error),
    #[error("failed to write output")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Pipeline(#[from] LtsvError),
}
