use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use postdeck::app::{ControllerSettings, ListingController};
use postdeck::listing::{filter_posts, paginate, ALL_CATEGORIES};
use postdeck::preferences::MemoryPreferenceStore;
use postdeck::store::{Post, PostStore};
use std::num::NonZeroUsize;

fn create_posts(count: usize) -> Vec<Post> {
    let categories = ["tech", "food", "travel", "Music", "science"];
    let topics = ["Go", "Rust", "Bread", "Lisbon", "Jazz", "Orbits", "Tea"];
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();

    (0..count)
        .map(|i| {
            let topic = topics[i % topics.len()];
            Post::new(
                format!("{} notes, part {}", topic, i),
                format!(
                    "A longer summary about {} with enough words to make substring search do some work ({}).",
                    topic.to_lowercase(),
                    i
                ),
                categories[i % categories.len()],
                base + chrono::Days::new((i % 1500) as u64),
            )
            .with_media(format!("img/{}.png", i), format!("posts/{}.html", i))
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_posts");

    for &count in &[100usize, 1_000, 10_000] {
        let posts = create_posts(count);

        group.bench_with_input(BenchmarkId::new("search_text", count), &posts, |b, posts| {
            b.iter(|| filter_posts(black_box(posts), black_box("rust"), ALL_CATEGORIES))
        });

        group.bench_with_input(BenchmarkId::new("category", count), &posts, |b, posts| {
            b.iter(|| filter_posts(black_box(posts), "", black_box("MUSIC")))
        });
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let posts = create_posts(10_000);
    let filtered = filter_posts(&posts, "", ALL_CATEGORIES);
    let page_size = NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN);

    c.bench_function("paginate_last_page", |b| {
        b.iter(|| paginate(black_box(&filtered), page_size, black_box(i64::MAX)))
    });
}

fn bench_keystroke(c: &mut Criterion) {
    let store = PostStore::new(create_posts(5_000));
    let mut controller = ListingController::new(
        ControllerSettings::default(),
        Box::new(MemoryPreferenceStore::new()),
    );
    controller.on_load(Ok(store));

    // One full filter, paginate and render pass, as triggered by typing
    c.bench_function("search_keystroke_5000_posts", |b| {
        let queries = ["j", "ja", "jaz", "jazz"];
        let mut i = 0;
        b.iter(|| {
            let out = controller.on_search_text(queries[i % queries.len()]);
            i += 1;
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_filter, bench_paginate, bench_keystroke);
criterion_main!(benches);
