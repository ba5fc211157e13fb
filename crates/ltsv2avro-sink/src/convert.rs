//! Record → Avro value conversion, driven by the target schema.
//!
//! Fields are matched by name against the top-level record schema. Values
//! the schema cannot hold are reported as [`SinkError::Mismatch`]; fields the
//! record lacks fall back to a nullable union branch or the field default.

use std::collections::HashMap;

use apache_avro::schema::{RecordSchema, SchemaKind};
use apache_avro::types::Value as AvroValue;
use apache_avro::Schema;
use chrono::SecondsFormat;
use ltsv2avro_core::{Record, Value};

use crate::error::SinkError;

pub fn record_to_avro(record: &Record, schema: &Schema) -> Result<AvroValue, SinkError> {
    let Schema::Record(RecordSchema { fields, .. }) = schema else {
        return Err(SinkError::NotARecord(kind(schema)));
    };

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let value = match record.get(&field.name) {
            Some(value) => to_avro(&field.name, value, &field.schema)?,
            None => absent(&field.name, &field.schema, field.default.as_ref())?,
        };
        out.push((field.name.clone(), value));
    }
    Ok(AvroValue::Record(out))
}

fn to_avro(field: &str, value: &Value, schema: &Schema) -> Result<AvroValue, SinkError> {
    let converted = match (value, schema) {
        (_, Schema::Union(union)) => {
            return union
                .variants()
                .iter()
                .enumerate()
                .filter(|(_, variant)| !matches!(variant, Schema::Null))
                .find_map(|(i, variant)| {
                    to_avro(field, value, variant)
                        .ok()
                        .map(|v| AvroValue::Union(i as u32, Box::new(v)))
                })
                .ok_or_else(|| mismatch(field, schema));
        }

        (Value::Timestamp(ts), Schema::TimestampMicros) => AvroValue::TimestampMicros(ts.timestamp_micros()),
        (Value::Timestamp(ts), Schema::TimestampMillis) => AvroValue::TimestampMillis(ts.timestamp_millis()),
        (Value::Timestamp(ts), Schema::Long) => AvroValue::Long(ts.timestamp_micros()),
        (Value::Timestamp(ts), Schema::String) => {
            AvroValue::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }

        (Value::Severity(sev), Schema::String) => AvroValue::String(sev.as_str().to_string()),
        (Value::Severity(sev), Schema::Enum(e)) => {
            let name = sev.as_str();
            let idx = e
                .symbols
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| mismatch(field, schema))?;
            AvroValue::Enum(idx as u32, name.to_string())
        }

        (Value::String(s), Schema::String) => AvroValue::String(s.clone()),
        (Value::String(s), Schema::Bytes) => AvroValue::Bytes(s.as_bytes().to_vec()),

        (Value::Tags(tags), Schema::Array(items)) if matches!(**items, Schema::String) => {
            AvroValue::Array(tags.iter().cloned().map(AvroValue::String).collect())
        }

        (Value::Attributes(attrs), Schema::Map(values)) if matches!(**values, Schema::String) => {
            AvroValue::Map(
                attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), AvroValue::String(v.clone())))
                    .collect(),
            )
        }

        _ => return Err(mismatch(field, schema)),
    };
    Ok(converted)
}

fn absent(
    field: &str,
    schema: &Schema,
    default: Option<&serde_json::Value>,
) -> Result<AvroValue, SinkError> {
    if let Schema::Union(union) = schema {
        if let Some(i) = union.variants().iter().position(|v| matches!(v, Schema::Null)) {
            return Ok(AvroValue::Union(i as u32, Box::new(AvroValue::Null)));
        }
    }
    match default {
        Some(default) => from_default(field, default, schema),
        None => Err(SinkError::MissingField {
            field: field.to_string(),
        }),
    }
}

// Only the defaults a log schema plausibly declares are understood.
fn from_default(
    field: &str,
    default: &serde_json::Value,
    schema: &Schema,
) -> Result<AvroValue, SinkError> {
    use serde_json::Value as Json;

    let converted = match (default, schema) {
        (_, Schema::Union(union)) => {
            let first = union
                .variants()
                .first()
                .ok_or_else(|| mismatch(field, schema))?;
            AvroValue::Union(0, Box::new(from_default(field, default, first)?))
        }
        (Json::Null, Schema::Null) => AvroValue::Null,
        (Json::String(s), Schema::String) => AvroValue::String(s.clone()),
        (Json::Number(n), Schema::Long) => {
            AvroValue::Long(n.as_i64().ok_or_else(|| mismatch(field, schema))?)
        }
        (Json::Array(items), Schema::Array(_)) if items.is_empty() => AvroValue::Array(Vec::new()),
        (Json::Object(obj), Schema::Map(_)) if obj.is_empty() => AvroValue::Map(HashMap::new()),
        _ => return Err(mismatch(field, schema)),
    };
    Ok(converted)
}

fn mismatch(field: &str, schema: &Schema) -> SinkError {
    SinkError::Mismatch {
        field: field.to_string(),
        expected: kind(schema),
    }
}

fn kind(schema: &Schema) -> String {
    format!("{:?}", SchemaKind::from(schema))
}
