//! Classifier: turns a tokenized [`Row`] into a [`Record`].
//!
//! Tag fields are accumulated into the `<tag>s` list, everything else goes
//! through the attribute scratch map (last write wins). The timestamp,
//! severity and body are then pulled out of that map, the remaining reserved
//! labels are purged, and what is left becomes the nested attributes entry.

use crate::config::LtsvConfig;
use crate::error::LtsvError;
use crate::labels::LabelConfig;
use crate::severity::Severity;
use crate::timestamp::TimestampParser;
use crate::types::{Attributes, Record, Row, Value};

#[derive(Debug, Clone)]
pub struct Classifier {
    labels: LabelConfig,
    tags_key: String,
    timestamps: TimestampParser,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(LabelConfig::default(), TimestampParser::default())
    }
}

impl Classifier {
    pub fn new(labels: LabelConfig, timestamps: TimestampParser) -> Self {
        let tags_key = labels.tags_key();
        Self {
            labels,
            tags_key,
            timestamps,
        }
    }

    pub fn from_config(cfg: &LtsvConfig) -> Self {
        Self::new(cfg.labels.clone(), cfg.timestamps.clone())
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    pub fn tags_key(&self) -> &str {
        &self.tags_key
    }

    /// Classify `row` into `out`, using `attrs` as the attribute scratch map.
    ///
    /// Neither `out` nor `attrs` is cleared first. On success `attrs` has been
    /// moved into `out` under the attributes label and is left empty. On
    /// error `out` is partially populated and must be discarded.
    pub fn classify(
        &self,
        row: &Row,
        out: &mut Record,
        attrs: &mut Attributes,
    ) -> Result<(), LtsvError> {
        for field in row {
            if field.label == self.labels.tag {
                self.push_tag(&field.value, out)?;
                continue;
            }
            attrs.insert(field.label.clone(), field.value.clone());
        }

        let Some(raw_ts) = attrs.remove(&self.labels.timestamp) else {
            return Err(LtsvError::InvalidTimestamp {
                value: None,
                cause: None,
            });
        };
        let ts = self.timestamps.parse(&raw_ts)?;
        out.insert(self.labels.timestamp.clone(), Value::Timestamp(ts));

        let severity = Severity::from_optional(attrs.remove(&self.labels.severity).as_deref());
        out.insert(self.labels.severity.clone(), Value::Severity(severity));

        let body = attrs
            .remove(&self.labels.body)
            .ok_or(LtsvError::InvalidBody)?;
        out.insert(self.labels.body.clone(), Value::String(body));

        attrs.retain(|key, _| !self.labels.is_reserved(key));
        out.insert(
            self.labels.attributes.clone(),
            Value::Attributes(std::mem::take(attrs)),
        );
        Ok(())
    }

    fn push_tag(&self, tag: &str, out: &mut Record) -> Result<(), LtsvError> {
        match out.get_mut(&self.tags_key) {
            None => {
                out.insert(self.tags_key.clone(), Value::Tags(vec![tag.to_string()]));
            }
            Some(Value::Tags(tags)) => tags.push(tag.to_string()),
            Some(_) => {
                return Err(LtsvError::InvalidTagType {
                    key: self.tags_key.clone(),
                })
            }
        }
        Ok(())
    }
}
