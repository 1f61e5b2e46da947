//! Benchmarks for aingle_triples
//!
//! Run with: cargo bench -p aingle_triples

use aingle_triples::{Model, Node, Statement, TripleStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn statement(i: usize) -> Statement {
    Statement::new(
        Node::resource(format!("urn:node:{}", i % 100)),
        Node::resource(format!("urn:prop:{}", i % 5)),
        Node::resource(format!("urn:node:{}", (i + 1) % 100)),
    )
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("memory", size), size, |b, &size| {
            b.iter(|| {
                let store = TripleStore::memory().unwrap();
                for i in 0..size {
                    store.add_statement(black_box(&statement(i))).unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let store = TripleStore::memory().unwrap();
    for i in 0..1000 {
        store.add_statement(&statement(i)).unwrap();
    }

    let mut group = c.benchmark_group("query");

    group.bench_function("by_subject", |b| {
        let pattern = Statement::new(Node::resource("urn:node:5"), Node::Empty, Node::Empty);
        b.iter(|| store.find(black_box(&pattern)).unwrap());
    });

    group.bench_function("two_hop_join", |b| {
        b.iter(|| {
            store
                .execute_query(black_box(
                    "SELECT * WHERE { <urn:node:5> <urn:prop:0> ?x . ?x ?p ?y }",
                ))
                .unwrap()
                .count()
        });
    });

    group.finish();
}

fn bench_statement_id(c: &mut Criterion) {
    let st = statement(42);
    c.bench_function("statement_id", |b| b.iter(|| black_box(&st).id()));
}

criterion_group!(benches, bench_insert, bench_query, bench_statement_id);
criterion_main!(benches);
