//! Error taxonomy for the LTSV pipeline.
//!
//! Every stage is fail-stop: the first [`LtsvError`] a stage produces halts
//! that stage and is handed to the caller unchanged. Severity misses are the
//! one field-level fault that is not an error at all (see
//! [`Severity::from_label`](crate::Severity::from_label)).

/// Opaque error coming from outside the pipeline (line sources, embedders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LtsvError {
    /// A non-empty fragment did not contain the label/value separator.
    #[error(
        "invalid ltsv: fragment {fragment:?} (len={fragment_len}) has no label separator; line={line:?}"
    )]
    InvalidLtsvLine {
        fragment: String,
        fragment_len: usize,
        line: String,
    },

    /// The timestamp field was missing, or no configured format accepted it.
    /// A missing field and an unparseable one are reported the same way.
    #[error("invalid timestamp: {}", .value.as_deref().unwrap_or("<missing>"))]
    InvalidTimestamp {
        value: Option<String>,
        #[source]
        cause: Option<chrono::ParseError>,
    },

    #[error("invalid body: field missing")]
    InvalidBody,

    /// The tag list slot of the output record already held something else.
    #[error("invalid tag type: {key:?} does not hold a tag list")]
    InvalidTagType { key: String },

    /// Upstream line source failure, passed through untouched.
    #[error("line source failed: {0}")]
    Source(#[source] BoxError),

    #[error("cancelled")]
    Cancelled,
}

impl LtsvError {
    pub fn source_error(err: impl Into<BoxError>) -> Self {
        LtsvError::Source(err.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LtsvError::Cancelled)
    }
}
