//! ltsv2avro-core: LTSV to structured record pipeline.
//!
//! This crate holds everything between "a line of text" and "a record ready
//! to encode". The encoder and the line readers live in sibling crates.
//!
//! # Architecture
//!
//! ```text
//! LineSource ──► RowStream ──► RecordStream ──► (encoder)
//!                  │               │
//!              Tokenizer       Classifier
//!                              ├─ TimestampParser
//!                              └─ Severity
//! ```
//!
//! Everything is single-threaded and pull-driven: the consumer asks the
//! record stage for the next element, which asks the row stage, which asks
//! the line source. Nothing is buffered beyond the element in flight.

pub mod classifier;
pub mod config;
pub mod error;
pub mod labels;
pub mod severity;
pub mod stream;
pub mod timestamp;
pub mod tokenizer;
pub mod types;

pub use classifier::Classifier;
pub use config::{Codec, Config, ConfigError, EncodeConfig, LtsvConfig};
pub use error::{BoxError, LtsvError};
pub use labels::LabelConfig;
pub use severity::Severity;
pub use stream::{IterLines, LineSource, RecordStream, RowStream};
pub use timestamp::{TimestampFormat, TimestampParser};
pub use tokenizer::Tokenizer;
pub use types::{Attributes, LabeledField, Record, Row, Value};
