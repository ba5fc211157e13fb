//! Streaming composer: lines → rows → records.
//!
//! Both stages are lending streams. Each call to `next_*` overwrites the
//! stage's scratch buffers, so a yielded [`Row`] or [`Record`] borrows the
//! stream and is gone once the next element is requested. Callers that need
//! to keep an element must clone it.
//!
//! Errors are fail-stop. An upstream error ends the stage that sees it; a
//! tokenization or classification error is yielded to the consumer, which is
//! expected to stop pulling.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::classifier::Classifier;
use crate::config::LtsvConfig;
use crate::error::{BoxError, LtsvError};
use crate::tokenizer::Tokenizer;
use crate::types::{Attributes, LabeledField, Record, Row, Value};

// ---------------------------------------------------------------------------
// Line sources
// ---------------------------------------------------------------------------

/// Supplier of raw lines. Once it yields an error it must yield nothing else.
pub trait LineSource {
    fn next_line(&mut self) -> Option<Result<&str, LtsvError>>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> Option<Result<&str, LtsvError>> {
        (**self).next_line()
    }
}

/// Adapts any iterator of `Result<String, E>` into a [`LineSource`].
pub struct IterLines<I> {
    inner: I,
    current: String,
    done: bool,
}

impl<I> IterLines<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            current: String::new(),
            done: false,
        }
    }
}

impl<I, S, E> LineSource for IterLines<I>
where
    I: Iterator<Item = Result<S, E>>,
    S: Into<String>,
    E: Into<BoxError>,
{
    fn next_line(&mut self) -> Option<Result<&str, LtsvError>> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            None => {
                self.done = true;
                None
            }
            Some(Ok(line)) => {
                self.current = line.into();
                Some(Ok(&self.current))
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(LtsvError::source_error(e)))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Row stage
// ---------------------------------------------------------------------------

pub struct RowStream<S> {
    source: S,
    tokenizer: Tokenizer,
    row: Vec<LabeledField>,
    line_no: u64,
    done: bool,
}

impl<S: LineSource> RowStream<S> {
    pub fn new(source: S, tokenizer: Tokenizer) -> Self {
        Self {
            source,
            tokenizer,
            row: Vec::new(),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines pulled from the source so far.
    pub fn line_no(&self) -> u64 {
        self.line_no
    }

    pub fn next_row(&mut self) -> Option<Result<&Row, LtsvError>> {
        if self.done {
            return None;
        }
        let line = match self.source.next_line() {
            None => {
                self.done = true;
                return None;
            }
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        self.line_no += 1;
        match self.tokenizer.tokenize_into(line, &mut self.row) {
            Ok(()) => Some(Ok(self.row.as_slice())),
            Err(e) => {
                tracing::debug!(line_no = self.line_no, error = %e, "tokenization failed");
                Some(Err(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Record stage
// ---------------------------------------------------------------------------

pub struct RecordStream<S> {
    rows: RowStream<S>,
    classifier: Classifier,
    record: Record,
    attrs: Attributes,
    cancel: Option<CancellationToken>,
    done: bool,
}

impl<S: LineSource> RecordStream<S> {
    pub fn new(source: S, cfg: &LtsvConfig) -> Self {
        Self::from_parts(
            RowStream::new(source, cfg.tokenizer.clone()),
            Classifier::from_config(cfg),
        )
    }

    pub fn from_parts(rows: RowStream<S>, classifier: Classifier) -> Self {
        Self {
            rows,
            classifier,
            record: Record::new(),
            attrs: HashMap::new(),
            cancel: None,
            done: false,
        }
    }

    /// Check `token` before every element; once it fires the stream yields
    /// [`LtsvError::Cancelled`] and ends.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn line_no(&self) -> u64 {
        self.rows.line_no()
    }

    pub fn next_record(&mut self) -> Option<Result<&Record, LtsvError>> {
        if self.done {
            return None;
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            self.done = true;
            return Some(Err(LtsvError::Cancelled));
        }
        self.reclaim_scratch();

        let row = match self.rows.next_row() {
            None => {
                self.done = true;
                return None;
            }
            Some(Ok(row)) => row,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        match self.classifier.classify(row, &mut self.record, &mut self.attrs) {
            Ok(()) => Some(Ok(&self.record)),
            Err(e) => {
                let fields = format!("{row:?}");
                tracing::debug!(
                    line_no = self.rows.line_no(),
                    row = %fields,
                    error = %e,
                    "classification failed"
                );
                Some(Err(e))
            }
        }
    }

    /// Drive the stream to the end, handing each record to `f`. Stops at the
    /// first error from either side and returns the number of records `f`
    /// accepted otherwise.
    pub fn try_for_each<F, E>(&mut self, mut f: F) -> Result<u64, E>
    where
        F: FnMut(&Record) -> Result<(), E>,
        E: From<LtsvError>,
    {
        let mut count = 0;
        while let Some(next) = self.next_record() {
            f(next?)?;
            count += 1;
        }
        Ok(count)
    }

    // The previous record owns the attribute map; take it back so its
    // allocation is reused, then clear both buffers.
    fn reclaim_scratch(&mut self) {
        let key = &self.classifier.labels().attributes;
        if let Some(Value::Attributes(prev)) = self.record.remove(key) {
            self.attrs = prev;
        }
        self.record.clear();
        self.attrs.clear();
    }
}
