use std::io::{stdout, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

pub fn decode(payload: &str) -> Result<()> {
    let data = hex::decode(payload.trim()).context("decoding hex payload")?;
    let (typ, records) = wgms::decode(&data, &Utc::now()).context("decoding payload")?;
    debug!(%typ, records = records.len(), "decoded");

    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, &records).context("serializing to json")?;
    writeln!(out).context("writing to stdout")
}
