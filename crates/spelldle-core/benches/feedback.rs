use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spelldle_core::feedback::{classify, missing_letters};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("correct", |b| {
        b.iter(|| classify(black_box("necessary"), black_box("necessary")))
    });

    group.bench_function("duplicates", |b| {
        b.iter(|| classify(black_box("neccessary"), black_box("necessary")))
    });

    group.bench_function("overflow", |b| {
        b.iter(|| classify(black_box("accommodations"), black_box("accommodate")))
    });

    group.finish();
}

fn bench_missing_letters(c: &mut Criterion) {
    c.bench_function("missing_letters", |b| {
        b.iter(|| missing_letters(black_box("rythm"), black_box("rhythm")))
    });
}

criterion_group!(benches, bench_classify, bench_missing_letters);
criterion_main!(benches);
