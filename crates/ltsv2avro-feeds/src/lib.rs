//! ltsv2avro-feeds: line source adapters for ltsv2avro.
//!
//! Each adapter reads raw bytes from somewhere and hands out one line at a
//! time through [`LineSource`]. The line buffer is reused between calls.

use std::fs::File;
use std::io::{self, BufRead, BufReader, StdinLock};
use std::path::{Path, PathBuf};

use ltsv2avro_core::{LineSource, LtsvError};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read line {line_no}")]
    Read {
        line_no: u64,
        #[source]
        source: io::Error,
    },
}

/// Reads newline-terminated lines from any [`BufRead`].
///
/// A trailing `\n` or `\r\n` is stripped. The first read error, including
/// invalid UTF-8, is yielded once and ends the source.
pub struct ReaderLines<R> {
    reader: R,
    buf: String,
    line_no: u64,
    done: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
        }
    }

    pub fn line_no(&self) -> u64 {
        self.line_no
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> Option<Result<&str, LtsvError>> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => {
                tracing::debug!(lines = self.line_no, "end of input");
                self.done = true;
                None
            }
            Ok(_) => {
                self.line_no += 1;
                Some(Ok(trim_newline(&self.buf)))
            }
            Err(source) => {
                self.done = true;
                let err = FeedError::Read {
                    line_no: self.line_no + 1,
                    source,
                };
                Some(Err(LtsvError::source_error(err)))
            }
        }
    }
}

fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Lines from the process's standard input.
pub fn stdin_lines() -> ReaderLines<StdinLock<'static>> {
    ReaderLines::new(io::stdin().lock())
}

/// Lines from a file on disk.
pub fn file_lines(path: &Path) -> Result<ReaderLines<BufReader<File>>, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderLines::new(BufReader::new(file)))
}
