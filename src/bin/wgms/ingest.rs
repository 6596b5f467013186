use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use wgms::archive::Archive;
use wgms::layout::PacketType;

const VEHICLE_COL: usize = 1;
const LABEL_COL: usize = 3;
const PAYLOAD_COL: usize = 6;

/// A datalogger row from the feed export.
#[derive(Debug, PartialEq)]
struct Row<'a> {
    vehicle: &'a str,
    label: &'a str,
    payload: &'a str,
}

impl<'a> Row<'a> {
    /// Split a feed line. The vehicle column may carry a suffix after a space, e.g.,
    /// `SV3-1043 WH`, only the first word is used.
    fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() <= PAYLOAD_COL {
            return None;
        }
        Some(Row {
            vehicle: fields[VEHICLE_COL].split(' ').next()?,
            label: fields[LABEL_COL],
            payload: fields[PAYLOAD_COL].trim(),
        })
    }
}

pub fn ingest(input: &Path, archive: &Archive, vehicles: &[String], label: &str) -> Result<()> {
    let reader = BufReader::new(File::open(input).context("opening input")?);
    info!("ingesting {input:?} to {:?}", archive.dir());

    let mut added: BTreeMap<(String, PacketType), usize> = BTreeMap::default();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line.context("reading input")?;
        let lineno = idx + 1;
        let Some(row) = Row::parse(&line) else {
            warn!(line = lineno, "skipping short row");
            continue;
        };
        if row.label != label {
            continue;
        }
        if !vehicles.is_empty() && !vehicles.iter().any(|v| v == row.vehicle) {
            debug!(line = lineno, vehicle = row.vehicle, "skipping unlisted vehicle");
            continue;
        }
        let data = match hex::decode(row.payload) {
            Ok(data) => data,
            Err(err) => {
                warn!(line = lineno, %err, "skipping invalid hex payload");
                continue;
            }
        };
        match archive.process(row.vehicle, &data) {
            Ok(count) => {
                if let Ok(typ) = PacketType::of(&data) {
                    *added.entry((row.vehicle.to_string(), typ)).or_default() += count;
                }
            }
            Err(err) => warn!(line = lineno, vehicle = row.vehicle, %err, "dropping payload"),
        }
    }

    for ((vehicle, typ), count) in &added {
        println!("{vehicle} {typ}: {count} new records");
    }
    Ok(())
}
