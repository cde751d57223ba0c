//! Benchmarks for feedshaper

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feedshaper::*;

const TITLES: &[&str] = &[
    "Rust async tutorial for beginners",
    "Linux kernel news roundup this week",
    "SHOCKING celebrity drama you won't believe",
    "Pasta recipe in 60 seconds #shorts",
    "Deutschland Nachrichten Analyse heute",
    "Gaming stream highlights part 3",
    "Learn Python course full episode",
    "Football match review and reaction",
];

const CHANNELS: &[&str] = &["Ferris Academy", "Tux Weekly", "Gossip Central", "Kitchen Quick"];

fn make_candidates(n: usize) -> Vec<VideoCandidate> {
    (0..n)
        .map(|i| {
            VideoCandidate::new(TITLES[i % TITLES.len()], CHANNELS[i % CHANNELS.len()])
                .with_url(format!("https://www.youtube.com/watch?v=vid{i:06}"))
                .with_views(format!("{}K views", (i * 37) % 900 + 1))
                .with_duration(format!("{}:{:02}", i % 40, i % 60))
        })
        .collect()
}

fn make_profile() -> PreferenceProfile {
    PreferenceProfile::new()
        .with_target_keywords(["rust", "linux", "kernel", "course"])
        .with_avoid_keywords(["drama", "shocking", "reaction"])
        .with_channel("gossip", ChannelAction::Block)
        .with_channel("ferris", ChannelAction::Prioritize)
        .with_negative_pair("deutschland", "afd")
}

fn benchmark_tokenization(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let text = TITLES.join(" ");

    c.bench_function("tokenize_titles", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&text)))
    });

    let mut group = c.benchmark_group("tokenize_by_size");
    for size in [1, 10, 100].iter() {
        let text = text.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| tokenizer.tokenize(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_keywords(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let documents: Vec<Vec<String>> = make_candidates(500)
        .iter()
        .map(|c| tokenizer.tokenize(&c.text()))
        .collect();

    c.bench_function("batch_top_keywords_500", |b| {
        b.iter(|| batch_top_keywords(black_box(&documents), 20))
    });
}

fn benchmark_scoring(c: &mut Criterion) {
    let profile = make_profile();

    let mut group = c.benchmark_group("rank_candidates");
    for size in [20, 200, 2000].iter() {
        let candidates = make_candidates(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, cands| {
            b.iter(|| rank_candidates(black_box(cands), &profile))
        });
    }
    group.finish();
}

fn benchmark_analytics(c: &mut Criterion) {
    let aggregator = AnalyticsAggregator::default();
    let history: Vec<String> = make_candidates(100).iter().map(|c| c.text()).collect();

    let mut group = c.benchmark_group("analyze");
    for size in [50, 500].iter() {
        let candidates = make_candidates(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, cands| {
            b.iter(|| aggregator.analyze(black_box(&history), black_box(cands)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenization,
    benchmark_keywords,
    benchmark_scoring,
    benchmark_analytics,
);
criterion_main!(benches);
