#![doc = include_str!("../README.md")]

mod bytes;
mod error;

pub mod archive;
pub mod collection;
pub mod fp2;
pub mod layout;
pub mod record;
pub mod schema;
pub mod timecode;

use chrono::{DateTime, Utc};

pub use error::{Error, Result};

use layout::PacketType;
use record::Record;

/// Decode a raw datalogger buffer, computing record latency relative to `now`.
///
/// Returns the packet type given by the buffer's tag byte along with the decoded
/// records.
///
/// # Errors
/// [Error::UnknownPacketType] if the tag is not known, or [Error::NotEnoughData] if
/// `buf` is too short for its layout.
pub fn decode(buf: &[u8], now: &DateTime<Utc>) -> Result<(PacketType, Vec<Record>)> {
    let typ = PacketType::of(buf)?;
    Ok((typ, typ.decode(buf, now)?))
}
