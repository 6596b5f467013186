use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use wgms::layout::PacketType;

use rand::Rng;

// Decode random FP2 words.
fn bench_fp2_decode(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let words: Vec<u16> = (0..1024).map(|_| rng.gen()).collect();

    let mut group = c.benchmark_group("fp2");
    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| words.iter().map(|w| wgms::fp2::decode(*w)).sum::<f64>());
    });
    group.finish();
}

// Decode random payloads of every packet type.
fn bench_packet_decode(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let mut group = c.benchmark_group("packet");
    for typ in PacketType::ALL {
        // room for 16 ctd sub-records, more than enough for the others
        let mut buf = [0u8; 13 + 16 * 14 + 1];
        rng.fill(&mut buf[..]);
        buf[PacketType::TAG_OFFSET] = typ.tag();

        group.throughput(Throughput::Bytes(buf.len() as u64));
        group.bench_function(format!("decode_{typ}"), |b| {
            b.iter(|| wgms::decode(&buf, &now).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fp2_decode, bench_packet_decode);
criterion_main!(benches);
