//! Criterion benchmarks for the Pilum search index: tokenization,
//! document ingestion, ranked queries and parallel batch execution.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pilum::analysis::split_words;
use pilum::document::DocumentStatus;
use pilum::index::SearchIndex;
use pilum::parallel::process_queries;

/// Generate short synthetic documents over a small vocabulary.
fn generate_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "index", "query", "document", "term", "relevance", "rating", "score", "cat",
        "dog", "fluffy", "groomed", "white", "tail", "collar",
    ];

    (0..count)
        .map(|i| {
            let mut text = String::new();
            for j in 0..8 {
                if j > 0 {
                    text.push(' ');
                }
                text.push_str(words[(i * 7 + j * 3) % words.len()]);
            }
            text
        })
        .collect()
}

fn populated_index(count: usize) -> SearchIndex {
    let mut index = SearchIndex::with_stop_words_text("and with the").unwrap();
    for (id, text) in generate_documents(count).iter().enumerate() {
        index
            .add_document(id as i64, text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    index
}

fn bench_tokenize(c: &mut Criterion) {
    let text = generate_documents(1).remove(0);

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("split_words", |b| {
        b.iter(|| split_words(black_box(&text)));
    });
    group.finish();
}

fn bench_add_document(c: &mut Criterion) {
    let documents = generate_documents(1000);

    c.bench_function("add_document_1000", |b| {
        b.iter(|| {
            let mut index = SearchIndex::with_stop_words_text("and with the").unwrap();
            for (id, text) in documents.iter().enumerate() {
                index
                    .add_document(id as i64, black_box(text), DocumentStatus::Actual, &[1, 2, 3])
                    .unwrap();
            }
            index
        });
    });
}

fn bench_find_top(c: &mut Criterion) {
    let index = populated_index(1000);

    c.bench_function("find_top_documents", |b| {
        b.iter(|| index.find_top_documents(black_box("fluffy groomed cat -tail")).unwrap());
    });
}

fn bench_process_queries(c: &mut Criterion) {
    let index = populated_index(1000);
    let queries: Vec<String> = (0..64)
        .map(|i| format!("query {} cat dog", i % 8))
        .collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("process_queries_64", |b| {
        b.iter(|| process_queries(black_box(&index), black_box(&queries)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_add_document,
    bench_find_top,
    bench_process_queries
);
criterion_main!(benches);
