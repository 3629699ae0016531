use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spelldle_core::model::{LessonCatalog, LessonWord, ReviewCard};
use spelldle_core::session::build_review_session;

fn make_catalog(lessons: usize, words_per_lesson: usize) -> LessonCatalog {
    let mut rows = Vec::with_capacity(lessons * words_per_lesson);
    for l in 0..lessons {
        for w in 0..words_per_lesson {
            rows.push(LessonWord::new(
                format!("Lesson {l}"),
                format!("word{l}x{w}"),
                format!("Sentence for word {w} of lesson {l}."),
            ));
        }
    }
    LessonCatalog::new(rows)
}

fn make_due_cards(n: usize, distinct: usize) -> Vec<ReviewCard> {
    let now = Utc::now();
    (0..n)
        .map(|i| {
            ReviewCard::new(
                format!("word0x{}", i % distinct),
                Some("Lesson 0"),
                now + Duration::minutes(i as i64),
            )
        })
        .collect()
}

fn bench_review_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_review_session");
    let catalog = make_catalog(20, 25);

    group.bench_function("max=5,no_dupes", |b| {
        let due = make_due_cards(10, 10);
        b.iter(|| build_review_session(black_box(&due), "Lesson 7", &catalog, 5))
    });

    group.bench_function("max=5,heavy_dupes", |b| {
        let due = make_due_cards(10, 2);
        b.iter(|| build_review_session(black_box(&due), "Lesson 7", &catalog, 5))
    });

    group.bench_function("max=50", |b| {
        let due = make_due_cards(100, 25);
        b.iter(|| build_review_session(black_box(&due), "Lesson 7", &catalog, 50))
    });

    group.finish();
}

criterion_group!(benches, bench_review_session);
criterion_main!(benches);
