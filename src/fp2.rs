//! Campbell Scientific FP2 compressed floating point.
//!
//! FP2 packs a reading into 2 bytes and carries about 3 significant digits. Words
//! arrive with their octets swapped relative to the little-endian integers they are
//! read as, so every word is byte swapped before the bits below are interpreted.
//!
//! | bit(s) | meaning |
//! |---|---|
//! | 0-12 | unsigned magnitude |
//! | 13 | multiply by 0.1 |
//! | 14 | multiply by 0.01 |
//! | 15 | negative |
//!
//! Both scale bits may be set, which scales by 0.001. A magnitude of 8190 is
//! reserved by the datalogger to flag an invalid reading and decodes to NaN no matter
//! how the sign and scale bits are set.
use crate::error::{Error, Result};

const MAGNITUDE_MASK: u16 = 0x1fff;
const SCALE_TENTHS: u16 = 0x2000;
const SCALE_HUNDREDTHS: u16 = 0x4000;
const SIGN: u16 = 0x8000;

/// Magnitude reserved for invalid readings.
pub const NAN_MAGNITUDE: u16 = 8190;
/// Largest magnitude that fits in 13 bits.
pub const MAX_MAGNITUDE: u16 = 0x1fff;

/// Wire word the datalogger writes for an invalid reading, i.e., -8190.
pub const NAN: u16 = (SIGN | NAN_MAGNITUDE).swap_bytes();

// Scale bits for 0, 1, 2, and 3 decimal places.
const DECIMALS: [(u16, f64); 4] = [
    (0, 1.0),
    (SCALE_TENTHS, 10.0),
    (SCALE_HUNDREDTHS, 100.0),
    (SCALE_TENTHS | SCALE_HUNDREDTHS, 1000.0),
];

/// Decode a single FP2 wire word.
#[must_use]
pub fn decode(wire: u16) -> f64 {
    let word = wire.swap_bytes();
    let magnitude = word & MAGNITUDE_MASK;
    if magnitude == NAN_MAGNITUDE {
        return f64::NAN;
    }

    let mut value = f64::from(magnitude);
    if word & SIGN != 0 {
        value = -value;
    }
    if word & SCALE_TENTHS != 0 {
        value *= 0.1;
    }
    if word & SCALE_HUNDREDTHS != 0 {
        value *= 0.01;
    }
    value
}

/// Decode the 2 bytes of an FP2 value exactly as they appear in a raw buffer.
#[must_use]
pub fn decode_bytes(buf: [u8; 2]) -> f64 {
    decode(u16::from_le_bytes(buf))
}

/// Encode `value` into an FP2 wire word.
///
/// The fewest decimal places that represent `value` exactly are used. Values that
/// need more than 3 decimal places are rounded to the finest scale that still fits
/// the 13-bit magnitude.
///
/// # Errors
/// [Error::Fp2Range] if `value` is infinite or its magnitude is too large to encode.
pub fn encode(value: f64) -> Result<u16> {
    if value.is_nan() {
        return Ok(NAN);
    }
    if value.is_infinite() {
        return Err(Error::Fp2Range(value));
    }

    let abs = value.abs();
    let fits = |m: f64| m <= f64::from(MAX_MAGNITUDE) && m != f64::from(NAN_MAGNITUDE);
    let exact = DECIMALS.iter().find(|(_, mult)| {
        let m = abs * mult;
        (m - m.round()).abs() <= 1e-9 * m.max(1.0) && fits(m.round())
    });
    let Some((scale, mult)) = exact.or_else(|| {
        DECIMALS
            .iter()
            .rev()
            .find(|(_, mult)| fits((abs * mult).round()))
    }) else {
        return Err(Error::Fp2Range(value));
    };

    // magnitude was range checked by `fits`
    let magnitude = (abs * mult).round() as u16;
    let sign = if value < 0.0 && magnitude != 0 { SIGN } else { 0 };
    Ok((sign | scale | magnitude).swap_bytes())
}
