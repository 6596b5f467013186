#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use wgms::fp2;
use wgms::layout::PacketType;
use wgms::timecode;

pub const VEHICLE: &str = "SV3-1043";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn at(secs_before_now: i64) -> DateTime<Utc> {
    now() - chrono::Duration::seconds(secs_before_now)
}

/// Builds raw datalogger buffers for tests.
pub struct Packet {
    buf: Vec<u8>,
}

impl Packet {
    pub fn new(typ: PacketType) -> Self {
        let mut buf = vec![0u8; typ.min_len()];
        buf[PacketType::TAG_OFFSET] = typ.tag();
        Packet { buf }
    }

    pub fn time(self, time: DateTime<Utc>) -> Self {
        self.u32(13, timecode::encode(&time).unwrap())
    }

    pub fn rec(self, rec: u32) -> Self {
        self.u32(21, rec)
    }

    pub fn u32(mut self, offset: usize, value: u32) -> Self {
        self.buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f32(mut self, offset: usize, value: f32) -> Self {
        self.buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn fp2(mut self, offset: usize, value: f64) -> Self {
        let wire = fp2::encode(value).unwrap();
        self.buf[offset..offset + 2].copy_from_slice(&wire.to_le_bytes());
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// A 0x24 buffer with one sub-record per `(time, pres, temp, cond)` followed by
/// `trailing` extra bytes.
pub fn ctd(samples: &[(DateTime<Utc>, f64, f64, f64)], trailing: usize) -> Vec<u8> {
    let mut buf = Packet::new(PacketType::Ctd).build();
    for (time, pres, temp, cond) in samples {
        let mut sub = [0u8; 14];
        sub[..4].copy_from_slice(&timecode::encode(time).unwrap().to_le_bytes());
        sub[8..10].copy_from_slice(&fp2::encode(*pres).unwrap().to_le_bytes());
        sub[10..12].copy_from_slice(&fp2::encode(*temp).unwrap().to_le_bytes());
        sub[12..14].copy_from_slice(&fp2::encode(*cond).unwrap().to_le_bytes());
        buf.extend_from_slice(&sub);
    }
    buf.extend(std::iter::repeat(0xffu8).take(trailing));
    buf
}

/// A plausible 0x21 buffer.
pub fn surface_met(time: DateTime<Utc>, rec: u32, lat: f32, lon: f32) -> Vec<u8> {
    Packet::new(PacketType::SurfaceMet)
        .time(time)
        .rec(rec)
        .f32(25, lat)
        .f32(29, lon)
        .fp2(43, 6.5)
        .fp2(45, 270.0)
        .fp2(47, 18.2)
        .fp2(49, 80.0)
        .fp2(51, 1013.0)
        .f32(53, 17.5)
        .f32(57, 4.5)
        .fp2(61, 0.5)
        .f32(63, 650.0)
        .f32(67, 380.0)
        .build()
}

pub fn assert_close(got: f64, expected: f64) {
    assert!(
        (got - expected).abs() < 1e-4,
        "got {got}, expected {expected}"
    );
}
