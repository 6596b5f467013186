use crate::bytes::Bytes;
use crate::schema::Column;

use super::bounds::BIN;
use super::{Fields, PacketType, Values, REC_OFFSET};

/// Number of depth bins in a current profile.
pub const CURRENT_BINS: usize = 34;

/// ADCP attitude and current profile (packet 0x22).
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentProfile {
    pub rec: f64,
    pub roll: f64,
    pub pitch: f64,
    pub hdg: f64,
    pub adcp_temp: f64,
    /// Eastward velocity per bin
    pub cur_e: [f64; CURRENT_BINS],
    /// Northward velocity per bin
    pub cur_n: [f64; CURRENT_BINS],
}

impl CurrentProfile {
    pub const MIN_LEN: usize = Self::NORTH_OFFSET + 2 * CURRENT_BINS;
    // byte 33 is not used
    const EAST_OFFSET: usize = 34;
    const NORTH_OFFSET: usize = 104;

    pub(crate) fn decode(b: &Bytes) -> Self {
        Self {
            rec: f64::from(b.u32(REC_OFFSET)),
            roll: b.fp2(25),
            pitch: b.fp2(27),
            hdg: b.fp2(29),
            adcp_temp: b.fp2(31),
            cur_e: BIN.check_all(b.fp2_array(Self::EAST_OFFSET)),
            cur_n: BIN.check_all(b.fp2_array(Self::NORTH_OFFSET)),
        }
    }
}

impl Fields for CurrentProfile {
    const PACKET_TYPE: PacketType = PacketType::CurrentProfile;

    fn columns() -> Vec<Column> {
        let mut cols = vec![
            Column::new("rec", "%8.0f"),
            Column::new("roll", "%6.1f"),
            Column::new("pitch", "%6.1f"),
            Column::new("hdg", "%3.0f"),
            Column::new("adcp_temp", "%9.1f"),
        ];
        cols.extend((0..CURRENT_BINS).map(|i| Column::new(format!("cur_e{i:02}"), "%8.2f")));
        cols.extend((0..CURRENT_BINS).map(|i| Column::new(format!("cur_n{i:02}"), "%8.2f")));
        cols
    }

    fn values(&self) -> Vec<f64> {
        let mut values = vec![self.rec, self.roll, self.pitch, self.hdg, self.adcp_temp];
        values.extend(self.cur_e);
        values.extend(self.cur_n);
        values
    }

    fn from_values(values: &[f64]) -> Self {
        let mut v = Values::new(values);
        Self {
            rec: v.take(),
            roll: v.take(),
            pitch: v.take(),
            hdg: v.take(),
            adcp_temp: v.take(),
            cur_e: v.array(),
            cur_n: v.array(),
        }
    }
}
