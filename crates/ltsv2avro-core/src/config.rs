//! Configuration types for ltsv2avro.
//!
//! [`Config::load`] layers built-in defaults, an optional TOML file and the
//! `ENV_*` environment overrides. [`Config::defaults`] returns the defaults
//! without touching the filesystem or the environment (useful in tests).
//! [`LtsvConfig`] is the validated runtime form used by the pipeline.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::labels::LabelConfig;
use crate::timestamp::{TimestampFormat, TimestampParser};
use crate::tokenizer::Tokenizer;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[labels]
timestamp  = "timestamp"
severity   = "severity"
body       = "body"
attributes = "attributes"
tag        = "tag"

[ltsv]
field_separator   = "\t"
pair_separator    = ":"
timestamp_formats = ["rfc3339", "datetime"]

[decode]
schema_size_max = 1048576

[encode]
block_length = 100
codec        = "null"
"#;

/// Environment overrides: variable name, config key, validity check.
/// An override that fails its check is ignored and the default applies.
const ENV_OVERRIDES: &[(&str, &str, fn(&str) -> bool)] = &[
    ("ENV_LABEL_TIMESTAMP", "labels.timestamp", non_empty),
    ("ENV_LABEL_SEVERITY", "labels.severity", non_empty),
    ("ENV_LABEL_BODY", "labels.body", non_empty),
    ("ENV_LABEL_ATTR", "labels.attributes", non_empty),
    ("ENV_LABEL_TAG", "labels.tag", non_empty),
    ("ENV_SCHEMA_FILENAME", "decode.schema_filename", non_empty),
    ("ENV_CODEC", "encode.codec", valid_codec),
    ("ENV_BLOCK_LENGTH", "encode.block_length", valid_block_length),
];

fn non_empty(v: &str) -> bool {
    !v.is_empty()
}

fn valid_codec(v: &str) -> bool {
    v.parse::<Codec>().is_ok()
}

fn valid_block_length(v: &str) -> bool {
    v.parse::<usize>().is_ok_and(|n| n > 0)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] config::ConfigError),
    #[error("label for {role} must not be empty")]
    EmptyLabel { role: &'static str },
    #[error("{first} and {second} labels are both {label:?}")]
    DuplicateLabel {
        first: &'static str,
        second: &'static str,
        label: String,
    },
    #[error("{which} separator must not be empty")]
    EmptySeparator { which: &'static str },
    #[error("at least one timestamp format is required")]
    NoTimestampFormats,
    #[error("timestamp format must not be empty")]
    EmptyTimestampFormat,
    #[error("unknown codec {0:?}")]
    UnknownCodec(String),
    #[error("block length must be positive")]
    ZeroBlockLength,
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub ltsv: LtsvSection,
    #[serde(default)]
    pub decode: DecodeConfig,
    #[serde(default)]
    pub encode: EncodeConfig,
}

/// `[ltsv]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LtsvSection {
    #[serde(default = "default_field_separator")]
    pub field_separator: String,
    #[serde(default = "default_pair_separator")]
    pub pair_separator: String,
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
}

fn default_field_separator() -> String { crate::tokenizer::FIELD_SEPARATOR_DEFAULT.to_string() }
fn default_pair_separator() -> String { crate::tokenizer::PAIR_SEPARATOR_DEFAULT.to_string() }
fn default_timestamp_formats() -> Vec<String> { vec!["rfc3339".to_string(), "datetime".to_string()] }

impl Default for LtsvSection {
    fn default() -> Self {
        Self {
            field_separator: default_field_separator(),
            pair_separator: default_pair_separator(),
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

pub const SCHEMA_SIZE_MAX_DEFAULT: u64 = 1_048_576;

/// `[decode]` section: where the output schema comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct DecodeConfig {
    #[serde(default)]
    pub schema_filename: Option<PathBuf>,
    #[serde(default = "default_schema_size_max")]
    pub schema_size_max: u64,
}

fn default_schema_size_max() -> u64 { SCHEMA_SIZE_MAX_DEFAULT }

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            schema_filename: None,
            schema_size_max: default_schema_size_max(),
        }
    }
}

pub const BLOCK_LENGTH_DEFAULT: usize = 100;

/// `[encode]` section, consumed only by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EncodeConfig {
    #[serde(default = "default_block_length")]
    pub block_length: usize,
    #[serde(default)]
    pub codec: Codec,
}

fn default_block_length() -> usize { BLOCK_LENGTH_DEFAULT }

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            block_length: default_block_length(),
            codec: Codec::default(),
        }
    }
}

/// Block compression codec names accepted in configuration.
///
/// `bzip2` and `xz` are accepted but the encoder writes them uncompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Null,
    Deflate,
    Snappy,
    Zstandard,
    Bzip2,
    Xz,
}

impl Codec {
    pub fn as_str(self) -> &'static str {
        match self {
            Codec::Null => "null",
            Codec::Deflate => "deflate",
            Codec::Snappy => "snappy",
            Codec::Zstandard => "zstandard",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Codec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Codec::Null),
            "deflate" => Ok(Codec::Deflate),
            "snappy" => Ok(Codec::Snappy),
            "zstandard" => Ok(Codec::Zstandard),
            "bzip2" => Ok(Codec::Bzip2),
            "xz" => Ok(Codec::Xz),
            other => Err(ConfigError::UnknownCodec(other.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load defaults, then `file` if given, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_lookup(file, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`] with an injectable environment lookup.
    pub fn from_lookup<F>(file: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        for &(var, key, valid) in ENV_OVERRIDES {
            let value = match lookup(var) {
                Some(v) if valid(&v) => Some(v),
                Some(v) => {
                    tracing::warn!(var, value = %v, "ignoring invalid override");
                    None
                }
                None => None,
            };
            builder = builder.set_override_option(key, value)?;
        }

        let cfg: Config = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        LtsvConfig::from_config(self)?;
        if self.encode.block_length == 0 {
            return Err(ConfigError::ZeroBlockLength);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Runtime form
// ---------------------------------------------------------------------------

/// Everything the tokenizer and classifier need, validated once and shared
/// by the whole stream.
#[derive(Debug, Clone, Default)]
pub struct LtsvConfig {
    pub labels: LabelConfig,
    pub tokenizer: Tokenizer,
    pub timestamps: TimestampParser,
}

impl LtsvConfig {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        cfg.labels.validate()?;
        if cfg.ltsv.field_separator.is_empty() {
            return Err(ConfigError::EmptySeparator { which: "field" });
        }
        if cfg.ltsv.pair_separator.is_empty() {
            return Err(ConfigError::EmptySeparator { which: "pair" });
        }
        let formats = cfg
            .ltsv
            .timestamp_formats
            .iter()
            .map(|f| f.parse::<TimestampFormat>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            labels: cfg.labels.clone(),
            tokenizer: Tokenizer::new(&cfg.ltsv.field_separator, &cfg.ltsv.pair_separator),
            timestamps: TimestampParser::new(formats)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
