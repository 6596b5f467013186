use crate::bytes::Bytes;
use crate::schema::Column;

use super::bounds::BIN;
use super::{Fields, PacketType, Values, REC_OFFSET};

/// Number of frequency bins in a wave spectrum.
pub const SPECTRUM_BINS: usize = 50;

/// Directional wave spectrum (packet 0x23).
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpectrum {
    pub rec: f64,
    /// Spectral energy density per frequency bin
    pub szz: [f64; SPECTRUM_BINS],
    /// Mean direction per frequency bin
    pub theta: [f64; SPECTRUM_BINS],
}

impl WaveSpectrum {
    pub const MIN_LEN: usize = Self::THETA_OFFSET + 2 * SPECTRUM_BINS;
    // The energy bins start inside the `rec` word. The datalogger table has always
    // been decoded this way so it is left alone.
    const SZZ_OFFSET: usize = 22;
    const THETA_OFFSET: usize = 122;

    pub(crate) fn decode(b: &Bytes) -> Self {
        Self {
            rec: f64::from(b.u32(REC_OFFSET)),
            szz: BIN.check_all(b.fp2_array(Self::SZZ_OFFSET)),
            theta: BIN.check_all(b.fp2_array(Self::THETA_OFFSET)),
        }
    }
}

impl Fields for WaveSpectrum {
    const PACKET_TYPE: PacketType = PacketType::WaveSpectrum;

    fn columns() -> Vec<Column> {
        let mut cols = vec![Column::new("rec", "%8.0f")];
        cols.extend((0..SPECTRUM_BINS).map(|i| Column::new(format!("Szz{i:02}"), "%8.2f")));
        cols.extend((0..SPECTRUM_BINS).map(|i| Column::new(format!("theta{i:02}"), "%8.2f")));
        cols
    }

    fn values(&self) -> Vec<f64> {
        let mut values = vec![self.rec];
        values.extend(self.szz);
        values.extend(self.theta);
        values
    }

    fn from_values(values: &[f64]) -> Self {
        let mut v = Values::new(values);
        Self {
            rec: v.take(),
            szz: v.array(),
            theta: v.array(),
        }
    }
}
