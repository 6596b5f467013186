mod common;

use std::fs;
use std::path::Path;

use common::{at, ctd, now, surface_met, VEHICLE};
use md5::{Digest, Md5};
use wgms::archive::Archive;
use wgms::collection::Collection;
use wgms::layout::PacketType;
use wgms::record::Value;

/// Digest of a log, ignoring the creation line.
fn log_digest(path: &Path) -> String {
    let text = fs::read_to_string(path).unwrap();
    let body: Vec<&str> = text.lines().skip(1).collect();
    let mut hasher = Md5::new();
    hasher.update(body.join("\n").as_bytes());
    hex::encode(hasher.finalize())
}

fn feed() -> Vec<Vec<u8>> {
    vec![
        surface_met(at(300), 3, 32.5, -117.5),
        surface_met(at(100), 1, 32.7, -117.3),
        ctd(&[(at(50), 0.5, 17.0, 4.5), (at(40), 0.6, 17.1, 4.6)], 3),
        surface_met(at(200), 2, 32.6, -117.4),
    ]
}

#[test]
fn cycle_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let archive = Archive::builder().dir(dir.path()).build();

    for buf in feed() {
        archive.process_at(VEHICLE, &buf, &now()).unwrap();
    }
    let met_log = archive.log_path(VEHICLE, PacketType::SurfaceMet);
    let ctd_log = archive.log_path(VEHICLE, PacketType::Ctd);
    let met_digest = log_digest(&met_log);
    let ctd_digest = log_digest(&ctd_log);

    // a later run over the same feed adds nothing and leaves the logs unchanged
    for buf in feed() {
        let added = archive
            .process_at(VEHICLE, &buf, &at(-3600))
            .unwrap();
        assert_eq!(added, 0);
    }

    assert_eq!(log_digest(&met_log), met_digest);
    assert_eq!(log_digest(&ctd_log), ctd_digest);
}

#[test]
fn logs_are_sorted_and_merged() {
    let dir = tempfile::tempdir().unwrap();
    let archive = Archive::builder().dir(dir.path()).build();

    for buf in feed() {
        archive.process_at(VEHICLE, &buf, &now()).unwrap();
    }

    let met = archive.open(VEHICLE, PacketType::SurfaceMet).unwrap();
    assert_eq!(met.len(), 3);
    assert_eq!(
        met.column("rec").unwrap(),
        vec![Value::Number(3.0), Value::Number(2.0), Value::Number(1.0)]
    );
    assert_eq!(
        met.column("latency").unwrap(),
        vec![
            Value::Number(300.0),
            Value::Number(200.0),
            Value::Number(100.0)
        ]
    );

    let ctd = archive.open(VEHICLE, PacketType::Ctd).unwrap();
    assert_eq!(ctd.len(), 2);
}

#[test]
fn log_layout() {
    let dir = tempfile::tempdir().unwrap();
    let archive = Archive::builder().dir(dir.path()).build();
    archive
        .process_at(VEHICLE, &surface_met(at(100), 1, 32.7, -117.3), &now())
        .unwrap();

    let path = dir.path().join("SV3-1043_21.log");
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("# created: "));
    assert_eq!(lines[1], PacketType::SurfaceMet.schema().header());
    assert_eq!(lines[1].len(), lines[2].len());
    assert!(lines[2].starts_with("2024/05/01T11:58:20Z        1  +32.7000 -117.3000 "));
}

#[test]
fn json_export() {
    let dir = tempfile::tempdir().unwrap();
    let archive = Archive::builder().dir(dir.path()).build();
    for buf in feed() {
        archive.process_at(VEHICLE, &buf, &now()).unwrap();
    }

    let path = dir.path().join("SV3-1043_21.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let records = json.as_array().unwrap();

    assert_eq!(records.len(), 3);
    for rec in records {
        let obj = rec.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert!(keys.contains(&"time"));
        assert!(keys.contains(&"indx_RDI"));
        assert_eq!(keys.len(), PacketType::SurfaceMet.schema().len());
        assert!(obj["time"].is_string());
        // hdg fields are zero, heave fields are zero, nothing is out of bounds
        assert!(obj["lat"].is_f64());
    }
}

#[test]
fn existing_log_records_win() {
    let dir = tempfile::tempdir().unwrap();
    let archive = Archive::builder().dir(dir.path()).build();

    archive
        .process_at(VEHICLE, &surface_met(at(100), 1, 32.7, -117.3), &now())
        .unwrap();
    // same timestamp, different values
    archive
        .process_at(VEHICLE, &surface_met(at(100), 99, 10.0, 10.0), &now())
        .unwrap();

    let met: Collection = archive.open(VEHICLE, PacketType::SurfaceMet).unwrap();
    assert_eq!(met.len(), 1);
    assert_eq!(met.column("rec").unwrap(), vec![Value::Number(1.0)]);
}
