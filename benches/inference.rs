//! Benchmarks for certainty combination and full inference runs.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use augur::cf::Cf;
use augur::engine::{Engine, EngineConfig};
use augur::evidence::EvidenceStore;
use augur::seeds;

fn bench_combine(c: &mut Criterion) {
    let a = Cf::new(0.65).unwrap();
    let b = Cf::new(-0.4).unwrap();

    c.bench_function("combine_pair", |bench| {
        bench.iter(|| black_box(black_box(a).combine(black_box(b))))
    });
}

fn bench_weather_fixpoint(c: &mut Criterion) {
    let engine = Engine::new(seeds::weather().unwrap(), EngineConfig::default()).unwrap();
    let mut evidence = EvidenceStore::new();
    evidence.insert_value("today", "dry", 1.0).unwrap();
    evidence.insert_value("temperature", "warm", 1.0).unwrap();
    evidence.insert_value("sky", "overcast", 1.0).unwrap();

    c.bench_function("weather_fixpoint", |bench| {
        bench.iter(|| black_box(engine.infer(&evidence)))
    });
}

criterion_group!(benches, bench_combine, bench_weather_fixpoint);
criterion_main!(benches);
