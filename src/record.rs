use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::layout::{PacketType, Payload};
use crate::schema::Schema;
use crate::timecode;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// The `time` column, rendered as text.
    Text(String),
    /// Every other column. May be NaN.
    Number(f64),
}

impl Value {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

/// One decoded record.
///
/// Records are identified solely by their timestamp: two records with the same
/// `time` hash and compare equal regardless of their values, so a set of records
/// holds at most one per second.
#[derive(Debug, Clone)]
pub struct Record {
    time: DateTime<Utc>,
    latency: f64,
    payload: Payload,
}

impl Record {
    pub fn new<P: Into<Payload>>(time: DateTime<Utc>, latency: f64, payload: P) -> Self {
        Record {
            time,
            latency,
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Seconds between the record timestamp and when it was decoded.
    #[must_use]
    pub fn latency(&self) -> f64 {
        self.latency
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn packet_type(&self) -> PacketType {
        self.payload.packet_type()
    }

    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.packet_type().schema()
    }

    /// All column values in schema order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        let fields = self.payload.values();
        let mut values = Vec::with_capacity(fields.len() + 2);
        values.push(Value::Text(timecode::format(&self.time)));
        values.extend(fields.into_iter().map(Value::Number));
        values.push(Value::Number(self.latency));
        values
    }

    /// Value of the column named `name`, if the schema has one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let schema = self.schema();
        match schema.position(name)? {
            0 => Some(Value::Text(timecode::format(&self.time))),
            idx if idx == schema.len() - 1 => Some(Value::Number(self.latency)),
            idx => self.payload.values().get(idx - 1).copied().map(Value::Number),
        }
    }

    /// Render as a fixed-width log line, without a line terminator.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        for (col, value) in self.schema().columns().iter().zip(self.values()) {
            let rendered = match value {
                Value::Text(s) => col.format().text(&s),
                Value::Number(v) => col.format().float(v),
            };
            line.push_str(&rendered);
            line.push(' ');
        }
        line
    }

    /// Rebuild a record from a log line previously produced by [Record::to_line].
    pub(crate) fn from_line(typ: PacketType, line: &str) -> Result<Record, String> {
        let schema = typ.schema();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != schema.len() {
            return Err(format!(
                "expected {} columns, found {}",
                schema.len(),
                tokens.len()
            ));
        }

        let time = timecode::parse(tokens[0]).map_err(|e| format!("invalid time: {e}"))?;
        let mut numbers = Vec::with_capacity(tokens.len() - 1);
        for (name, token) in schema.names().zip(&tokens).skip(1) {
            let value: f64 = token
                .parse()
                .map_err(|e| format!("invalid {name} value {token:?}: {e}"))?;
            numbers.push(value);
        }
        // the last column is always latency
        let latency = numbers.pop().unwrap_or(f64::NAN);

        Ok(Record {
            time,
            latency,
            payload: typ.payload(&numbers),
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.hash(state);
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let schema = self.schema();
        let mut map = serializer.serialize_map(Some(schema.len()))?;
        for (name, value) in schema.names().zip(self.values()) {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
