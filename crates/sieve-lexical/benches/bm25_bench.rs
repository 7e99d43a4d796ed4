use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sieve_lexical::{Bm25Index, Bm25Params};

fn synthetic_corpus(docs: usize) -> Vec<Vec<String>> {
    (0..docs)
        .map(|i| {
            (0..40)
                .map(|j| format!("term{}", (i * 7 + j * 13) % 500))
                .collect()
        })
        .collect()
}

fn bench_scores(c: &mut Criterion) {
    let corpus = synthetic_corpus(1_000);
    let index = Bm25Index::build(&corpus, Bm25Params::default());
    let query: Vec<String> = ["term3", "term77", "term250"].iter().map(|s| s.to_string()).collect();

    c.bench_function("bm25_scores_1k_docs", |b| {
        b.iter(|| black_box(index.scores(black_box(&query))))
    });
    c.bench_function("bm25_top_n_1k_docs", |b| {
        b.iter(|| black_box(index.top_n(black_box(&query), 4)))
    });
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(1_000);
    c.bench_function("bm25_build_1k_docs", |b| {
        b.iter(|| black_box(Bm25Index::build(black_box(&corpus), Bm25Params::default())))
    });
}

criterion_group!(benches, bench_scores, bench_build);
criterion_main!(benches);
