//! Test builders: ergonomic constructors for LTSV lines and line sources.
//!
//! These are for readability in tests, not production use.

use std::convert::Infallible;

use ltsv2avro_core::{IterLines, LabeledField};

/// Fluent builder for one LTSV line using the default labels.
///
/// ```rust,ignore
/// let line = LineBuilder::new("2025-01-22 14:42:11", "boom")
///     .severity("error")
///     .attr("host", "db1")
///     .tag("payments")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct LineBuilder {
    fields: Vec<(String, String)>,
}

impl LineBuilder {
    pub fn new(timestamp: &str, body: &str) -> Self {
        Self::empty().field("timestamp", timestamp).field("body", body)
    }

    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, label: &str, value: &str) -> Self {
        self.fields.push((label.to_string(), value.to_string()));
        self
    }

    pub fn severity(self, value: &str) -> Self {
        self.field("severity", value)
    }

    pub fn attr(self, label: &str, value: &str) -> Self {
        self.field(label, value)
    }

    pub fn tag(self, value: &str) -> Self {
        self.field("tag", value)
    }

    pub fn build(&self) -> String {
        self.fields
            .iter()
            .map(|(l, v)| format!("{l}:{v}"))
            .collect::<Vec<_>>()
            .join("\t")
    }

    pub fn row(&self) -> Vec<LabeledField> {
        self.fields
            .iter()
            .map(|(l, v)| LabeledField::new(l.as_str(), v.as_str()))
            .collect()
    }
}

pub type TestSource = IterLines<std::vec::IntoIter<Result<String, Infallible>>>;

/// A line source over owned strings that never fails.
pub fn source<I, S>(lines: I) -> TestSource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let lines: Vec<Result<String, Infallible>> = lines.into_iter().map(|l| Ok(l.into())).collect();
    IterLines::new(lines.into_iter())
}
