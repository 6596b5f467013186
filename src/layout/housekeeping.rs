use crate::bytes::Bytes;
use crate::schema::Column;

use super::{Fields, PacketType, Values, REC_OFFSET};

const COLUMNS: [(&str, &str); 31] = [
    ("rec", "%8.0f"),
    ("batt", "%5.2f"),
    ("CR6_temp", "%8.2f"),
    ("proc_max", "%8.2f"),
    ("proc_avg", "%8.2f"),
    ("vnav_hdg", "%8.2f"),
    ("vnav_pitch", "%10.2f"),
    ("vnav_roll", "%9.2f"),
    ("vnav_vn", "%7.2f"),
    ("vnav_ve", "%7.2f"),
    ("vnav_vd", "%7.2f"),
    ("gill_AWS", "%8.2f"),
    ("gill_AWD", "%8.2f"),
    ("gill_TWS", "%8.2f"),
    ("gill_TWD", "%8.2f"),
    ("gill_temp", "%9.2f"),
    ("roll_min", "%8.3f"),
    ("roll_avg", "%8.3f"),
    ("roll_max", "%8.3f"),
    ("pitch_min", "%9.3f"),
    ("pitch_avg", "%9.3f"),
    ("pitch_max", "%9.3f"),
    ("head_min", "%8.3f"),
    ("head_avg", "%8.3f"),
    ("head_max", "%8.3f"),
    ("N_dbar", "%6.2f"),
    ("N_degC", "%6.2f"),
    ("indx_10hz", "%9.0f"),
    ("indx_gill", "%9.0f"),
    ("indx_adcp", "%9.0f"),
    ("indx_20hz", "%9.0f"),
];

/// Datalogger, attitude, and wind sensor status (packet 0x11).
///
/// Everything but `rec` is FP2 encoded, laid out back to back in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Housekeeping {
    pub rec: f64,
    /// Battery voltage
    pub batt: f64,
    /// CR6 panel temperature
    pub cr6_temp: f64,
    pub proc_max: f64,
    pub proc_avg: f64,
    // VectorNav attitude and velocity
    pub vnav_hdg: f64,
    pub vnav_pitch: f64,
    pub vnav_roll: f64,
    pub vnav_vn: f64,
    pub vnav_ve: f64,
    pub vnav_vd: f64,
    // Gill sonic anemometer, apparent and true wind
    pub gill_aws: f64,
    pub gill_awd: f64,
    pub gill_tws: f64,
    pub gill_twd: f64,
    pub gill_temp: f64,
    pub roll_min: f64,
    pub roll_avg: f64,
    pub roll_max: f64,
    pub pitch_min: f64,
    pub pitch_avg: f64,
    pub pitch_max: f64,
    pub head_min: f64,
    pub head_avg: f64,
    pub head_max: f64,
    pub n_dbar: f64,
    pub n_degc: f64,
    pub indx_10hz: f64,
    pub indx_gill: f64,
    pub indx_adcp: f64,
    pub indx_20hz: f64,
}

impl Housekeeping {
    pub const MIN_LEN: usize = 85;
    const FIRST_FP2: usize = 25;

    pub(crate) fn decode(bytes: &Bytes) -> Self {
        let w: [f64; 30] = bytes.fp2_array(Self::FIRST_FP2);
        let mut rest = Values::new(&w);
        Self::from_rec_and_values(f64::from(bytes.u32(REC_OFFSET)), &mut rest)
    }

    fn from_rec_and_values(rec: f64, v: &mut Values) -> Self {
        Self {
            rec,
            batt: v.take(),
            cr6_temp: v.take(),
            proc_max: v.take(),
            proc_avg: v.take(),
            vnav_hdg: v.take(),
            vnav_pitch: v.take(),
            vnav_roll: v.take(),
            vnav_vn: v.take(),
            vnav_ve: v.take(),
            vnav_vd: v.take(),
            gill_aws: v.take(),
            gill_awd: v.take(),
            gill_tws: v.take(),
            gill_twd: v.take(),
            gill_temp: v.take(),
            roll_min: v.take(),
            roll_avg: v.take(),
            roll_max: v.take(),
            pitch_min: v.take(),
            pitch_avg: v.take(),
            pitch_max: v.take(),
            head_min: v.take(),
            head_avg: v.take(),
            head_max: v.take(),
            n_dbar: v.take(),
            n_degc: v.take(),
            indx_10hz: v.take(),
            indx_gill: v.take(),
            indx_adcp: v.take(),
            indx_20hz: v.take(),
        }
    }
}

impl Fields for Housekeeping {
    const PACKET_TYPE: PacketType = PacketType::Housekeeping;

    fn columns() -> Vec<Column> {
        COLUMNS.iter().map(|(n, f)| Column::new(*n, f)).collect()
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.rec,
            self.batt,
            self.cr6_temp,
            self.proc_max,
            self.proc_avg,
            self.vnav_hdg,
            self.vnav_pitch,
            self.vnav_roll,
            self.vnav_vn,
            self.vnav_ve,
            self.vnav_vd,
            self.gill_aws,
            self.gill_awd,
            self.gill_tws,
            self.gill_twd,
            self.gill_temp,
            self.roll_min,
            self.roll_avg,
            self.roll_max,
            self.pitch_min,
            self.pitch_avg,
            self.pitch_max,
            self.head_min,
            self.head_avg,
            self.head_max,
            self.n_dbar,
            self.n_degc,
            self.indx_10hz,
            self.indx_gill,
            self.indx_adcp,
            self.indx_20hz,
        ]
    }

    fn from_values(values: &[f64]) -> Self {
        let mut v = Values::new(values);
        let rec = v.take();
        Self::from_rec_and_values(rec, &mut v)
    }
}
