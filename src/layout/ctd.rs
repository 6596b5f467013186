use chrono::{DateTime, Utc};
use tracing::trace;

use crate::bytes::Bytes;
use crate::error::Result;
use crate::record::Record;
use crate::schema::Column;
use crate::timecode;

use super::bounds::{CONDUCTIVITY, CTD_PRESSURE, SEAWATER_TEMPERATURE};
use super::{Fields, PacketType, Values, TIME_OFFSET};

/// A single CTD sample (packet 0x24).
///
/// Unlike the other packet types a single 0x24 buffer carries a run of fixed size
/// sub-records, each with its own timestamp and no record number.
#[derive(Debug, Clone, PartialEq)]
pub struct CtdSample {
    pub pres: f64,
    pub temp: f64,
    pub cond: f64,
}

impl CtdSample {
    /// Size of one sub-record.
    pub const LEN: usize = 14;
    /// Offset of the first sub-record in a raw buffer.
    pub const START: usize = TIME_OFFSET;

    fn decode(b: &Bytes, offset: usize) -> Self {
        Self {
            pres: CTD_PRESSURE.check(b.fp2(offset + 8)),
            temp: SEAWATER_TEMPERATURE.check(b.fp2(offset + 10)),
            cond: CONDUCTIVITY.check(b.fp2(offset + 12)),
        }
    }
}

/// Decode every complete sub-record in `buf`. Trailing bytes that do not make up a
/// full sub-record are ignored.
pub(super) fn decode_all(buf: &[u8], now: &DateTime<Utc>) -> Result<Vec<Record>> {
    let bytes = Bytes::new(buf, CtdSample::START)?;
    let records: Vec<Record> = (CtdSample::START..)
        .step_by(CtdSample::LEN)
        .take_while(|offset| offset + CtdSample::LEN <= buf.len())
        .map(|offset| {
            let time = timecode::decode(bytes.u32(offset));
            let latency = timecode::latency(&time, now);
            Record::new(time, latency, CtdSample::decode(&bytes, offset))
        })
        .collect();

    let leftover = (buf.len() - CtdSample::START) % CtdSample::LEN;
    if leftover > 0 {
        trace!(leftover, records = records.len(), "ignoring partial ctd sub-record");
    }
    Ok(records)
}

impl Fields for CtdSample {
    const PACKET_TYPE: PacketType = PacketType::Ctd;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("pres", "%7.2f"),
            Column::new("temp", "%5.2f"),
            Column::new("cond", "%6.4f"),
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![self.pres, self.temp, self.cond]
    }

    fn from_values(values: &[f64]) -> Self {
        let mut v = Values::new(values);
        Self {
            pres: v.take(),
            temp: v.take(),
            cond: v.take(),
        }
    }
}
