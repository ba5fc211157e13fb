//! Distinguished label names.

use serde::Deserialize;

use crate::config::ConfigError;

/// The five label names that get special treatment during classification.
/// Every other label lands in the attributes bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelConfig {
    pub timestamp: String,
    pub severity: String,
    pub body: String,
    pub attributes: String,
    pub tag: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            timestamp: "timestamp".to_string(),
            severity: "severity".to_string(),
            body: "body".to_string(),
            attributes: "attributes".to_string(),
            tag: "tag".to_string(),
        }
    }
}

impl LabelConfig {
    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("timestamp", self.timestamp.as_str()),
            ("severity", self.severity.as_str()),
            ("body", self.body.as_str()),
            ("attributes", self.attributes.as_str()),
            ("tag", self.tag.as_str()),
        ]
    }

    /// Reject empty names and names shared by two roles. Colliding labels
    /// would make classification depend on lookup order. The derived tags
    /// key shares the output record with the other roles, so it must not
    /// match any of them either.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = self.named();
        for (i, &(role, label)) in named.iter().enumerate() {
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel { role });
            }
            if let Some(&(other, _)) = named[i + 1..].iter().find(|&&(_, l)| l == label) {
                return Err(ConfigError::DuplicateLabel {
                    first: role,
                    second: other,
                    label: label.to_string(),
                });
            }
        }
        let tags = self.tags_key();
        if let Some(&(role, _)) = named.iter().find(|&&(_, l)| l == tags) {
            return Err(ConfigError::DuplicateLabel {
                first: role,
                second: "tags",
                label: tags,
            });
        }
        Ok(())
    }

    /// Output key of the tag list: the tag label with an `s` appended.
    pub fn tags_key(&self) -> String {
        format!("{}s", self.tag)
    }

    /// True for keys that must never appear in the attributes bucket.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.named().iter().any(|(_, label)| *label == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let labels = LabelConfig::default();
        labels.validate().unwrap();
        assert_eq!(labels.tags_key(), "tags");
    }

    #[test]
    fn reserved_keys() {
        let labels = LabelConfig::default();
        for key in ["timestamp", "severity", "body", "attributes", "tag"] {
            assert!(labels.is_reserved(key), "{key} should be reserved");
        }
        assert!(!labels.is_reserved("tags"));
        assert!(!labels.is_reserved("host"));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let labels = LabelConfig {
            tag: "timestamp".to_string(),
            ..LabelConfig::default()
        };
        match labels.validate() {
            Err(ConfigError::DuplicateLabel { first, second, label }) => {
                assert_eq!(first, "timestamp");
                assert_eq!(second, "tag");
                assert_eq!(label, "timestamp");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn label_matching_tags_key_is_rejected() {
        let labels = LabelConfig {
            body: "tags".to_string(),
            ..LabelConfig::default()
        };
        match labels.validate() {
            Err(ConfigError::DuplicateLabel { first, second, label }) => {
                assert_eq!(first, "body");
                assert_eq!(second, "tags");
                assert_eq!(label, "tags");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn renamed_tag_moves_the_tags_key() {
        let labels = LabelConfig {
            tag: "label".to_string(),
            body: "tags".to_string(),
            ..LabelConfig::default()
        };
        labels.validate().unwrap();
        assert_eq!(labels.tags_key(), "labels");
    }

    #[test]
    fn empty_label_is_rejected() {
        let labels = LabelConfig {
            body: String::new(),
            ..LabelConfig::default()
        };
        assert!(matches!(
            labels.validate(),
            Err(ConfigError::EmptyLabel { role: "body" })
        ));
    }
}
