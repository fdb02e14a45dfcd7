use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ttxcollect_core::collector::{Collector, CollectorListener, PacketContext};
use ttxcollect_core::constants::{FRAMING_CODE, TELETEXT_UNIT_ID};
use ttxcollect_core::hamming::{
    decode_hamming2418, decode_hamming84, decode_parity, encode_hamming84, encode_parity,
};
use ttxcollect_core::reader::PesReader;
use ttxcollect_core::types::PacketRequest;

fn bench_hamming84_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x7707);
    let bytes: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();

    let mut group = c.benchmark_group("hamming84_decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("random_bytes", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for &byte in &bytes {
                if decode_hamming84(byte).is_some() {
                    valid += 1;
                }
            }
            valid
        })
    });
    group.finish();
}

fn bench_hamming2418_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x2418);
    let triplets: Vec<[u8; 3]> = (0..1024).map(|_| rng.gen()).collect();

    let mut group = c.benchmark_group("hamming2418_decode");
    group.throughput(Throughput::Bytes((triplets.len() * 3) as u64));
    group.bench_function("random_triplets", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for t in &triplets {
                if decode_hamming2418(t[0], t[1], t[2]).is_some() {
                    valid += 1;
                }
            }
            valid
        })
    });
    group.finish();
}

fn bench_parity_decode(c: &mut Criterion) {
    let bytes: Vec<u8> = (0..=255).collect();

    c.bench_function("parity_decode_all_bytes", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for &byte in &bytes {
                if decode_parity(byte).is_some() {
                    valid += 1;
                }
            }
            valid
        })
    });
}

struct RowListener;

impl CollectorListener for RowListener {
    fn on_packet_ready(&mut self, context: &mut PacketContext<'_, '_>) {
        let _ = context.consume(PacketRequest::LopData { length: 40 });
    }
}

fn bench_process_packet_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_packet_data");

    for unit_count in [1usize, 16, 64] {
        let mut payload = vec![0x10];
        for row in 0..unit_count {
            let address = 1 + (row % 25) as u8;
            payload.push(TELETEXT_UNIT_ID);
            payload.push(44);
            payload.push(0x00);
            payload.push(FRAMING_CODE);
            payload.push(encode_hamming84(0x01 | ((address & 0x01) << 3)));
            payload.push(encode_hamming84((address >> 1) & 0x0F));
            payload.extend((0..40u8).map(|i| encode_parity(b' ' + (i % 64))));
        }

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(unit_count),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let mut collector = Collector::new(RowListener);
                    collector
                        .process_packet_data(&mut PesReader::new(payload))
                        .unwrap();
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_hamming84_decode,
    bench_hamming2418_decode,
    bench_parity_decode,
    bench_process_packet_data
);
criterion_main!(benches);
