//! Static corpora and schemas used across harnesses.

/// Lines that carry every required field and should classify cleanly.
pub const CORPUS_VALID: &[&str] = &[
    "severity:info\tbody:hello, world\ttimestamp:2025-01-22T14:42:11.012345+09:00",
    "timestamp:2025-01-22T14:42:12Z\tseverity:WARN\tbody:disk at 92%\thost:db1\tmount:/var",
    "timestamp:2025-01-22 14:42:13\tseverity:error\tbody:upstream timeout\ttag:payments\ttag:retry",
    "timestamp:2025-01-22 14:42:14\tbody:no severity here\treq:abc:def",
    "\ttimestamp:2025-01-22 14:42:15\tseverity:critical\tbody:unknown level\t",
];

/// Reader-side schema matching the default labels.
pub const SCHEMA_JSON: &str = r#"{
  "type": "record",
  "name": "LogRecord",
  "fields": [
    {"name": "timestamp", "type": {"type": "long", "logicalType": "timestamp-micros"}},
    {"name": "severity", "type": {"type": "enum", "name": "Severity", "symbols": [
      "LEVEL_UNSPECIFIED", "LEVEL_TRACE", "LEVEL_DEBUG", "LEVEL_INFO",
      "LEVEL_WARN", "LEVEL_ERROR", "LEVEL_FATAL"
    ]}},
    {"name": "body", "type": "string"},
    {"name": "attributes", "type": {"type": "map", "values": "string"}},
    {"name": "tags", "type": {"type": "array", "items": "string"}, "default": []}
  ]
}"#;

/// Generate `n` valid lines with a rotating severity and one attribute each.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let level = match i % 10 {
                0 => "error",
                1 | 2 => "warn",
                _ => "info",
            };
            format!(
                "timestamp:2025-01-22T{:02}:{:02}:{:02}Z\tseverity:{}\tbody:log line {}\tseq:{}",
                i / 3600 % 24,
                i / 60 % 60,
                i % 60,
                level,
                i,
                i,
            )
        })
        .collect()
}
