//! Packet layouts.
//!
//! Each packet type the datalogger transmits has a fixed binary layout and a fixed
//! set of text log columns. [PacketType] is the registry mapping the tag byte found
//! in a raw buffer to both.
//!
//! All raw buffers share a common prefix:
//!
//! | offset | size | |
//! |---|---|---|
//! | 0 | 12 | not used |
//! | 12 | 1 | packet type tag |
//! | 13 | 4 | u32 seconds since 1990-01-01 |
//! | 17 | 4 | sub-second, not used |
//! | 21 | 4 | u32 record number |
//!
//! The 0x24 CTD packet is the exception; starting at offset 13 it is a run of
//! [CtdSample::LEN] byte sub-records each beginning with its own timestamp.
pub mod bounds;
mod ctd;
mod current;
mod housekeeping;
mod met;
mod spectrum;

use std::fmt::Display;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bytes::Bytes;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::{Column, Schema};
use crate::timecode;

pub use ctd::CtdSample;
pub use current::{CurrentProfile, CURRENT_BINS};
pub use housekeeping::Housekeeping;
pub use met::SurfaceMet;
pub use spectrum::{WaveSpectrum, SPECTRUM_BINS};

const TIME_OFFSET: usize = 13;
const REC_OFFSET: usize = 21;

/// The fixed structure of a single packet type.
///
/// `values` and `from_values` project the structure to and from its column values,
/// excluding the `time` and `latency` columns every schema carries.
pub trait Fields: Sized {
    const PACKET_TYPE: PacketType;

    /// Name and declared text format of each column, in log order.
    fn columns() -> Vec<Column>;

    /// Column values, in the same order as [Fields::columns].
    fn values(&self) -> Vec<f64>;

    /// Rebuild from column values ordered as [Fields::columns]. Missing values are
    /// filled with NaN.
    fn from_values(values: &[f64]) -> Self;
}

/// Hands out column values in order, NaN once exhausted.
struct Values<'a>(std::slice::Iter<'a, f64>);

impl<'a> Values<'a> {
    fn new(values: &'a [f64]) -> Self {
        Values(values.iter())
    }

    fn take(&mut self) -> f64 {
        self.0.next().copied().unwrap_or(f64::NAN)
    }

    fn array<const N: usize>(&mut self) -> [f64; N] {
        std::array::from_fn(|_| self.take())
    }
}

/// Packet types, identified by their tag byte.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum PacketType {
    Housekeeping = 0x11,
    SurfaceMet = 0x21,
    CurrentProfile = 0x22,
    WaveSpectrum = 0x23,
    Ctd = 0x24,
}

impl PacketType {
    /// Offset of the tag byte in a raw buffer.
    pub const TAG_OFFSET: usize = 12;

    pub const ALL: [PacketType; 5] = [
        PacketType::Housekeeping,
        PacketType::SurfaceMet,
        PacketType::CurrentProfile,
        PacketType::WaveSpectrum,
        PacketType::Ctd,
    ];

    #[must_use]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Identify the packet type of a raw buffer from its tag byte.
    ///
    /// # Errors
    /// [Error::NotEnoughData] if `buf` is too short to hold a tag, or
    /// [Error::UnknownPacketType] if the tag is not a known type.
    pub fn of(buf: &[u8]) -> Result<Self> {
        match buf.get(Self::TAG_OFFSET) {
            Some(tag) => Self::try_from(*tag),
            None => Err(Error::NotEnoughData {
                actual: buf.len(),
                minimum: Self::TAG_OFFSET + 1,
            }),
        }
    }

    /// Minimum raw buffer length needed to decode a packet of this type.
    #[must_use]
    pub fn min_len(self) -> usize {
        match self {
            PacketType::Housekeeping => Housekeeping::MIN_LEN,
            PacketType::SurfaceMet => SurfaceMet::MIN_LEN,
            PacketType::CurrentProfile => CurrentProfile::MIN_LEN,
            PacketType::WaveSpectrum => WaveSpectrum::MIN_LEN,
            // no records, but not an error
            PacketType::Ctd => CtdSample::START,
        }
    }

    /// Column schema of text logs for this type.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        static SCHEMAS: [OnceLock<Schema>; 5] = [
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
        ];
        SCHEMAS[self.index()].get_or_init(|| {
            Schema::with_fields(match self {
                PacketType::Housekeeping => Housekeeping::columns(),
                PacketType::SurfaceMet => SurfaceMet::columns(),
                PacketType::CurrentProfile => CurrentProfile::columns(),
                PacketType::WaveSpectrum => WaveSpectrum::columns(),
                PacketType::Ctd => CtdSample::columns(),
            })
        })
    }

    /// Decode the records contained in `buf`, computing latency relative to `now`.
    ///
    /// `buf` is assumed to be of this type; see [PacketType::of]. All types produce a
    /// single record except [PacketType::Ctd], which produces one per complete
    /// sub-record and possibly none.
    ///
    /// # Errors
    /// [Error::NotEnoughData] if `buf` is shorter than [PacketType::min_len].
    pub fn decode(self, buf: &[u8], now: &DateTime<Utc>) -> Result<Vec<Record>> {
        match self {
            PacketType::Housekeeping => decode_one(buf, now, self, Housekeeping::decode),
            PacketType::SurfaceMet => decode_one(buf, now, self, SurfaceMet::decode),
            PacketType::CurrentProfile => decode_one(buf, now, self, CurrentProfile::decode),
            PacketType::WaveSpectrum => decode_one(buf, now, self, WaveSpectrum::decode),
            PacketType::Ctd => ctd::decode_all(buf, now),
        }
    }

    /// Rebuild a payload of this type from its column values.
    pub(crate) fn payload(self, values: &[f64]) -> Payload {
        match self {
            PacketType::Housekeeping => Housekeeping::from_values(values).into(),
            PacketType::SurfaceMet => SurfaceMet::from_values(values).into(),
            PacketType::CurrentProfile => CurrentProfile::from_values(values).into(),
            PacketType::WaveSpectrum => WaveSpectrum::from_values(values).into(),
            PacketType::Ctd => CtdSample::from_values(values).into(),
        }
    }

    fn index(self) -> usize {
        match self {
            PacketType::Housekeeping => 0,
            PacketType::SurfaceMet => 1,
            PacketType::CurrentProfile => 2,
            PacketType::WaveSpectrum => 3,
            PacketType::Ctd => 4,
        }
    }
}

impl TryFrom<u8> for PacketType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or(Error::UnknownPacketType(tag))
    }
}

impl Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.tag())
    }
}

fn decode_one<T, F>(
    buf: &[u8],
    now: &DateTime<Utc>,
    typ: PacketType,
    decode: F,
) -> Result<Vec<Record>>
where
    T: Into<Payload>,
    F: Fn(&Bytes) -> T,
{
    let bytes = Bytes::new(buf, typ.min_len())?;
    let time = timecode::decode(bytes.u32(TIME_OFFSET));
    let latency = timecode::latency(&time, now);
    Ok(vec![Record::new(time, latency, decode(&bytes))])
}

/// Decoded packet fields, one variant per [PacketType].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Housekeeping(Housekeeping),
    SurfaceMet(SurfaceMet),
    CurrentProfile(Box<CurrentProfile>),
    WaveSpectrum(Box<WaveSpectrum>),
    Ctd(CtdSample),
}

impl Payload {
    #[must_use]
    pub fn packet_type(&self) -> PacketType {
        match self {
            Payload::Housekeeping(_) => PacketType::Housekeeping,
            Payload::SurfaceMet(_) => PacketType::SurfaceMet,
            Payload::CurrentProfile(_) => PacketType::CurrentProfile,
            Payload::WaveSpectrum(_) => PacketType::WaveSpectrum,
            Payload::Ctd(_) => PacketType::Ctd,
        }
    }

    /// Column values, excluding `time` and `latency`.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match self {
            Payload::Housekeeping(p) => p.values(),
            Payload::SurfaceMet(p) => p.values(),
            Payload::CurrentProfile(p) => p.values(),
            Payload::WaveSpectrum(p) => p.values(),
            Payload::Ctd(p) => p.values(),
        }
    }
}

impl From<Housekeeping> for Payload {
    fn from(value: Housekeeping) -> Self {
        Payload::Housekeeping(value)
    }
}

impl From<SurfaceMet> for Payload {
    fn from(value: SurfaceMet) -> Self {
        Payload::SurfaceMet(value)
    }
}

impl From<CurrentProfile> for Payload {
    fn from(value: CurrentProfile) -> Self {
        Payload::CurrentProfile(Box::new(value))
    }
}

impl From<WaveSpectrum> for Payload {
    fn from(value: WaveSpectrum) -> Self {
        Payload::WaveSpectrum(Box::new(value))
    }
}

impl From<CtdSample> for Payload {
    fn from(value: CtdSample) -> Self {
        Payload::Ctd(value)
    }
}
