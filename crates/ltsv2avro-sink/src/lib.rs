//! ltsv2avro-sink: Avro object container output for ltsv2avro.
//!
//! [`load_schema`] reads the target schema; [`write_records`] drains a
//! [`RecordStream`](ltsv2avro_core::RecordStream) into any writer.

pub mod codec;
pub mod convert;
pub mod error;
pub mod schema;
pub mod writer;

pub use codec::avro_codec;
pub use convert::record_to_avro;
pub use error::SinkError;
pub use schema::{load_schema, parse_schema};
pub use writer::write_records;
