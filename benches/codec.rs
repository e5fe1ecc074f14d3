use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixed_f32::{Binary32, Codec};

const LITERALS: [&str; 6] = ["1.", "5.5e0", "-5.5e-2", "9.999999e5", "1.e-5", "1.0000001e3"];

const VALUES: [f32; 6] = [1.0, 5.5, -0.055, 999_999.9, 1.0e-5, 1_000.0001];

fn parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for literal in LITERALS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(literal), literal, |b, literal| {
            b.iter(|| Codec::SCIENTIFIC.parse(black_box(literal)))
        });
    }
    group.finish();
}

fn format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for value in VALUES.iter() {
        let unpacked = Binary32::from(*value).unpack();
        group.bench_with_input(BenchmarkId::from_parameter(value), &unpacked, |b, unpacked| {
            b.iter(|| Codec::SCIENTIFIC.format(black_box(unpacked)))
        });
    }
    group.finish();
}

fn round_trip(c: &mut Criterion) {
    c.bench_function("round_trip", |b| {
        b.iter(|| {
            for literal in LITERALS.iter() {
                let value = Codec::SCIENTIFIC.parse_binary32(black_box(literal)).unwrap();
                let _ = Codec::SCIENTIFIC.format_binary32(value);
            }
        })
    });
}

fn unit(c: &mut Criterion) {
    c.bench_function("unit_parse", |b| b.iter(|| Codec::UNIT.parse(black_box("0.123456"))));
}

criterion_group!(benches, parse, format, round_trip, unit);
criterion_main!(benches);
