use std::collections::HashSet;
use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::layout::PacketType;
use crate::record::{Record, Value};

/// Format of the creation time in the first line of a text log.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The deduplicated records of one packet type for one vehicle.
///
/// Records are keyed by timestamp; the first record inserted for a given time is
/// kept and any later record with the same time is discarded. Records are kept
/// unordered and only sorted when written.
#[derive(Debug, Clone)]
pub struct Collection {
    vehicle: String,
    packet_type: PacketType,
    records: HashSet<Record>,
}

impl Collection {
    pub fn new<S: Into<String>>(vehicle: S, packet_type: PacketType) -> Self {
        Collection {
            vehicle: vehicle.into(),
            packet_type,
            records: HashSet::default(),
        }
    }

    #[must_use]
    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    #[must_use]
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Records in ascending time order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.records.iter().collect();
        records.sort();
        records
    }

    /// Insert a record, returning `false` if a record with the same time is already
    /// present, in which case `record` is dropped.
    ///
    /// # Errors
    /// [Error::PacketTypeMismatch] if `record` is not of this collection's type.
    pub fn insert(&mut self, record: Record) -> Result<bool> {
        if record.packet_type() != self.packet_type {
            return Err(Error::PacketTypeMismatch {
                expected: self.packet_type,
                actual: record.packet_type(),
            });
        }
        let time = record.time();
        let inserted = self.records.insert(record);
        if !inserted {
            trace!(vehicle = %self.vehicle, %time, "dropping duplicate record");
        }
        Ok(inserted)
    }

    /// Load records from a text log previously produced by [Collection::write],
    /// returning the number of records added.
    ///
    /// The creation line is ignored. Lines that cannot be parsed are logged and
    /// skipped.
    ///
    /// # Errors
    /// [Error::Io] if reading fails, or [Error::Parse] if the header line does not
    /// match this collection's packet type.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let schema = self.packet_type.schema();
        let mut added = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            match lineno {
                1 => continue,
                2 => {
                    if !line.split_whitespace().eq(schema.names()) {
                        return Err(Error::Parse {
                            line: lineno,
                            reason: format!(
                                "header does not match packet type {}",
                                self.packet_type
                            ),
                        });
                    }
                    continue;
                }
                _ => {}
            }
            if line.trim().is_empty() {
                continue;
            }
            match Record::from_line(self.packet_type, &line) {
                Ok(record) => {
                    if self.insert(record)? {
                        added += 1;
                    }
                }
                Err(reason) => {
                    warn!(
                        vehicle = %self.vehicle,
                        line = lineno,
                        %reason,
                        "skipping malformed log line"
                    );
                }
            }
        }
        debug!(vehicle = %self.vehicle, typ = %self.packet_type, added, "loaded log");
        Ok(added)
    }

    /// Decode a raw buffer and insert its records, returning the number added.
    ///
    /// # Errors
    /// See [Collection::decode_raw_at].
    pub fn decode_raw(&mut self, buf: &[u8]) -> Result<usize> {
        self.decode_raw_at(buf, &Utc::now())
    }

    /// Decode a raw buffer, computing record latency relative to `now`, and insert
    /// its records, returning the number added.
    ///
    /// # Errors
    /// [Error::UnknownPacketType] for an unknown tag, [Error::PacketTypeMismatch] if
    /// the tag is known but is not this collection's type, or [Error::NotEnoughData]
    /// if the buffer is too short for its layout.
    pub fn decode_raw_at(&mut self, buf: &[u8], now: &DateTime<Utc>) -> Result<usize> {
        let typ = PacketType::of(buf)?;
        if typ != self.packet_type {
            return Err(Error::PacketTypeMismatch {
                expected: self.packet_type,
                actual: typ,
            });
        }
        let mut added = 0;
        for record in typ.decode(buf, now)? {
            if self.insert(record)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Write the text log: a creation line, the column header, then every record in
    /// ascending time order.
    ///
    /// # Errors
    /// [Error::Io] if writing fails.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "# created: {}", Utc::now().format(CREATED_FORMAT))?;
        writeln!(writer, "{}", self.packet_type.schema().header())?;
        for record in self.sorted() {
            writeln!(writer, "{}", record.to_line())?;
        }
        writer.flush()?;
        debug!(
            vehicle = %self.vehicle,
            typ = %self.packet_type,
            records = self.len(),
            "wrote log"
        );
        Ok(())
    }

    /// Write all records as a JSON array of objects keyed by column name.
    ///
    /// `time` is written as text and NaN values as `null`.
    ///
    /// # Errors
    /// [Error::Json] if serialization or writing fails.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, &self.sorted())?;
        writer.flush()?;
        Ok(())
    }

    /// Column names in schema order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.packet_type.schema().names().collect()
    }

    /// All values of column `name` in ascending time order, or `None` if there is no
    /// such column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<Value>> {
        let idx = self.packet_type.schema().position(name)?;
        Some(
            self.sorted()
                .into_iter()
                .map(|r| r.values().swap_remove(idx))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CtdSample;
    use crate::timecode;

    fn ctd(secs: u32, temp: f64) -> Record {
        Record::new(
            timecode::decode(secs),
            3.0,
            CtdSample {
                pres: 0.5,
                temp,
                cond: 4.25,
            },
        )
    }

    fn collection(records: &[(u32, f64)]) -> Collection {
        let mut col = Collection::new("SV3-1043", PacketType::Ctd);
        for (secs, temp) in records {
            col.insert(ctd(*secs, *temp)).unwrap();
        }
        col
    }

    fn written(col: &Collection) -> String {
        let mut buf = Vec::new();
        col.write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn insert_first_wins() {
        let mut col = Collection::new("SV3-1043", PacketType::Ctd);
        assert!(col.insert(ctd(100, 10.0)).unwrap());
        assert!(!col.insert(ctd(100, 20.0)).unwrap());

        assert_eq!(col.len(), 1);
        let temp = col.sorted()[0].get("temp").unwrap();
        assert_eq!(temp, Value::Number(10.0));
    }

    #[test]
    fn insert_wrong_type() {
        let mut col = Collection::new("SV3-1043", PacketType::SurfaceMet);
        let err = col.insert(ctd(100, 10.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::PacketTypeMismatch {
                expected: PacketType::SurfaceMet,
                actual: PacketType::Ctd
            }
        ));
        assert!(col.is_empty());
    }

    #[test]
    fn decode_raw_wrong_type() {
        let mut buf = vec![0u8; 100];
        buf[PacketType::TAG_OFFSET] = 0x21;
        let mut col = Collection::new("SV3-1043", PacketType::Ctd);
        assert!(matches!(
            col.decode_raw(&buf),
            Err(Error::PacketTypeMismatch { .. })
        ));
    }

    #[test]
    fn decode_raw_counts_new_records() {
        let mut buf = vec![0u8; 13 + 2 * CtdSample::LEN];
        buf[PacketType::TAG_OFFSET] = 0x24;
        buf[13..17].copy_from_slice(&5u32.to_le_bytes());
        buf[27..31].copy_from_slice(&6u32.to_le_bytes());

        let mut col = Collection::new("SV3-1043", PacketType::Ctd);
        assert_eq!(col.decode_raw(&buf).unwrap(), 2);
        assert_eq!(col.decode_raw(&buf).unwrap(), 0);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn write_sorted() {
        let col = collection(&[(300, 3.0), (100, 1.0), (200, 2.0)]);
        let text = written(&col);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("# created: "));
        assert_eq!(lines[1], PacketType::Ctd.schema().header());
        assert!(lines[2].starts_with("1990/01/01T00:01:40Z"));
        assert!(lines[3].starts_with("1990/01/01T00:03:20Z"));
        assert!(lines[4].starts_with("1990/01/01T00:05:00Z"));
    }

    #[test]
    fn write_load_write() {
        let col = collection(&[(300, 3.0), (100, f64::NAN), (200, 2.0)]);
        let first = written(&col);

        let mut loaded = Collection::new("SV3-1043", PacketType::Ctd);
        assert_eq!(loaded.load(first.as_bytes()).unwrap(), 3);
        let second = written(&loaded);

        let skip_created = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
        assert_eq!(skip_created(&first), skip_created(&second));
    }

    #[test]
    fn load_skips_malformed_lines() {
        let col = collection(&[(100, 1.0)]);
        let mut text = written(&col);
        text.push_str("1990/01/01T00:05:00Z 1.0 2.0\n");
        text.push_str("garbage 1 2 3 4\n");
        text.push('\n');

        let mut loaded = Collection::new("SV3-1043", PacketType::Ctd);
        assert_eq!(loaded.load(text.as_bytes()).unwrap(), 1);
    }

    #[test]
    fn load_existing_records_win() {
        let mut col = collection(&[(100, 1.0)]);
        let text = written(&collection(&[(100, 9.0), (200, 2.0)]));

        assert_eq!(col.load(text.as_bytes()).unwrap(), 1);
        assert_eq!(
            col.column("temp").unwrap(),
            vec![Value::Number(1.0), Value::Number(2.0)]
        );
    }

    #[test]
    fn load_wrong_header() {
        let text = written(&collection(&[(100, 1.0)]));
        let mut col = Collection::new("SV3-1043", PacketType::SurfaceMet);
        assert!(matches!(
            col.load(text.as_bytes()),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn load_empty() {
        let mut col = Collection::new("SV3-1043", PacketType::Ctd);
        assert_eq!(col.load("".as_bytes()).unwrap(), 0);
    }

    #[test]
    fn json_output() {
        let col = collection(&[(200, 2.0), (100, f64::NAN)]);
        let mut buf = Vec::new();
        col.write_json(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["time"], "1990/01/01T00:01:40Z");
        assert!(arr[0]["temp"].is_null());
        assert_eq!(arr[1]["temp"], 2.0);

        let keys: Vec<&String> = arr[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn columns() {
        let col = collection(&[(200, 2.0), (100, 1.0)]);
        assert_eq!(
            col.field_names(),
            vec!["time", "pres", "temp", "cond", "latency"]
        );
        assert_eq!(
            col.column("time").unwrap(),
            vec![
                Value::Text("1990/01/01T00:01:40Z".into()),
                Value::Text("1990/01/01T00:03:20Z".into())
            ]
        );
        assert!(col.column("nope").is_none());
    }
}
