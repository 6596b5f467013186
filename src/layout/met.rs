use crate::bytes::Bytes;
use crate::schema::Column;

use super::bounds::{
    CONDUCTIVITY, LATITUDE, LONGITUDE, LONGWAVE, MET_CTD_PRESSURE, SEAWATER_TEMPERATURE,
    SHORTWAVE,
};
use super::{Fields, PacketType, Values, REC_OFFSET};

const COLUMNS: [(&str, &str); 22] = [
    ("rec", "%8.0f"),
    ("lat", "%+9.4f"),
    ("lon", "%+9.4f"),
    ("hdg_min", "%7.1f"),
    ("hdg_avg", "%7.1f"),
    ("hdg_max", "%7.1f"),
    ("heave_std", "%9.3f"),
    ("heave", "%9.3f"),
    ("wspd", "%5.1f"),
    ("wdir", "%4.0f"),
    ("atmp", "%5.1f"),
    ("rh", "%3.0f"),
    ("bpr", "%6.1f"),
    ("ctd_temp", "%8.1f"),
    ("ctd_cond", "%8.4f"),
    ("ctd_pres", "%8.1f"),
    ("swr", "%6.1f"),
    ("lwr", "%5.1f"),
    ("indx_1hz", "%8.0f"),
    ("indx_10hz", "%9.0f"),
    ("indx_ctd", "%8.0f"),
    ("indx_RDI", "%8.0f"),
];

/// Surface meteorology, position, and near surface CTD (packet 0x21).
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMet {
    pub rec: f64,
    // GPS
    pub lat: f64,
    pub lon: f64,
    pub hdg_min: f64,
    pub hdg_avg: f64,
    pub hdg_max: f64,
    pub heave_std: f64,
    pub heave: f64,
    // Weather transmitter
    pub wspd: f64,
    pub wdir: f64,
    pub atmp: f64,
    pub rh: f64,
    pub bpr: f64,
    // Glider payload CTD
    pub ctd_temp: f64,
    pub ctd_cond: f64,
    pub ctd_pres: f64,
    // Radiometers
    pub swr: f64,
    pub lwr: f64,
    pub indx_1hz: f64,
    pub indx_10hz: f64,
    pub indx_ctd: f64,
    pub indx_rdi: f64,
}

impl SurfaceMet {
    pub const MIN_LEN: usize = 79;

    pub(crate) fn decode(b: &Bytes) -> Self {
        Self {
            rec: f64::from(b.u32(REC_OFFSET)),
            lat: LATITUDE.check(b.f32(25)),
            lon: LONGITUDE.check(b.f32(29)),
            hdg_min: b.fp2(33),
            hdg_avg: b.fp2(35),
            hdg_max: b.fp2(37),
            heave_std: b.fp2(39),
            heave: b.fp2(41),
            wspd: b.fp2(43),
            wdir: b.fp2(45),
            atmp: b.fp2(47),
            rh: b.fp2(49),
            bpr: b.fp2(51),
            ctd_temp: SEAWATER_TEMPERATURE.check(b.f32(53)),
            ctd_cond: CONDUCTIVITY.check(b.f32(57)),
            ctd_pres: MET_CTD_PRESSURE.check(b.fp2(61)),
            swr: SHORTWAVE.check(b.f32(63)),
            lwr: LONGWAVE.check(b.f32(67)),
            indx_1hz: b.fp2(71),
            indx_10hz: b.fp2(73),
            indx_ctd: b.fp2(75),
            indx_rdi: b.fp2(77),
        }
    }
}

impl Fields for SurfaceMet {
    const PACKET_TYPE: PacketType = PacketType::SurfaceMet;

    fn columns() -> Vec<Column> {
        COLUMNS.iter().map(|(n, f)| Column::new(*n, f)).collect()
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.rec,
            self.lat,
            self.lon,
            self.hdg_min,
            self.hdg_avg,
            self.hdg_max,
            self.heave_std,
            self.heave,
            self.wspd,
            self.wdir,
            self.atmp,
            self.rh,
            self.bpr,
            self.ctd_temp,
            self.ctd_cond,
            self.ctd_pres,
            self.swr,
            self.lwr,
            self.indx_1hz,
            self.indx_10hz,
            self.indx_ctd,
            self.indx_rdi,
        ]
    }

    fn from_values(values: &[f64]) -> Self {
        let mut v = Values::new(values);
        Self {
            rec: v.take(),
            lat: v.take(),
            lon: v.take(),
            hdg_min: v.take(),
            hdg_avg: v.take(),
            hdg_max: v.take(),
            heave_std: v.take(),
            heave: v.take(),
            wspd: v.take(),
            wdir: v.take(),
            atmp: v.take(),
            rh: v.take(),
            bpr: v.take(),
            ctd_temp: v.take(),
            ctd_cond: v.take(),
            ctd_pres: v.take(),
            swr: v.take(),
            lwr: v.take(),
            indx_1hz: v.take(),
            indx_10hz: v.take(),
            indx_ctd: v.take(),
            indx_rdi: v.take(),
        }
    }
}
