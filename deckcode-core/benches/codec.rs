use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deckcode_core::DeckCodec;

const MESSAGES: &[(&str, &str)] = &[
    ("words", "attack at dawn"),
    ("coordinates", "40.7128 N, 74.0060 W"),
    ("password", "@x9k2.q"),
    ("generic", "Meet me at 5!"),
];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let codec = DeckCodec::new().unwrap();

    for &(name, text) in MESSAGES {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| codec.encode(black_box(text)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let codec = DeckCodec::new().unwrap();

    for &(name, text) in MESSAGES {
        let deck = codec.encode(text).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &deck, |b, deck| {
            b.iter(|| codec.decode(black_box(deck)).unwrap());
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_codec", |b| {
        b.iter(|| black_box(DeckCodec::new().unwrap()));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_build);
criterion_main!(benches);
