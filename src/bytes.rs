use crate::error::{Error, Result};
use crate::fp2;

/// Bytes provides fixed-offset little-endian reads from a raw packet buffer.
///
/// The length is checked once up front so the accessors do not have to return
/// errors; asking for data past `minimum` is a layout bug and will panic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bytes<'a> {
    buf: &'a [u8],
}

impl<'a> Bytes<'a> {
    /// # Errors
    /// [Error::NotEnoughData] if `buf` is shorter than `minimum`.
    pub fn new(buf: &'a [u8], minimum: usize) -> Result<Self> {
        if buf.len() < minimum {
            return Err(Error::NotEnoughData {
                actual: buf.len(),
                minimum,
            });
        }
        Ok(Bytes { buf })
    }

    pub fn u32(&self, offset: usize) -> u32 {
        let b = &self.buf[offset..offset + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn f32(&self, offset: usize) -> f64 {
        let b = &self.buf[offset..offset + 4];
        f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn fp2(&self, offset: usize) -> f64 {
        fp2::decode_bytes([self.buf[offset], self.buf[offset + 1]])
    }

    /// Decode `N` consecutive FP2 values starting at `offset`.
    pub fn fp2_array<const N: usize>(&self, offset: usize) -> [f64; N] {
        std::array::from_fn(|i| self.fp2(offset + 2 * i))
    }
}
