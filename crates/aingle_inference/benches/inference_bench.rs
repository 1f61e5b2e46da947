//! Benchmarks for aingle_inference
//!
//! Run with: cargo bench -p aingle_inference

use aingle_inference::{InferenceConfig, InferenceModel, RuleParser, StandardRuleSet};
use aingle_triples::vocabulary::rdfs;
use aingle_triples::{Node, Statement, TripleStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sub_class(a: usize, b: usize) -> Statement {
    Statement::new(
        Node::resource(format!("urn:class:{}", a)),
        Node::resource(rdfs::SUB_CLASS_OF),
        Node::resource(format!("urn:class:{}", b)),
    )
}

fn chain(len: usize) -> Vec<Statement> {
    (0..len).map(|i| sub_class(i + 1, i)).collect()
}

fn model(config: InferenceConfig) -> InferenceModel<TripleStore> {
    let mut model = InferenceModel::with_config(TripleStore::memory().unwrap(), config).unwrap();
    model.add_standard_rules(StandardRuleSet::Rdfs).unwrap();
    model
}

fn bench_add_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_chain");
    group.sample_size(10);

    for len in [5, 10, 20].iter() {
        let statements = chain(*len);

        for (mode, optimized, compressed) in [
            ("optimized", true, false),
            ("optimized_compressed", true, true),
            ("unoptimized", false, false),
        ] {
            group.bench_with_input(BenchmarkId::new(mode, len), &statements, |b, statements| {
                b.iter(|| {
                    let mut model = model(InferenceConfig {
                        optimized_queries: optimized,
                        compressed_source_statements: compressed,
                        ..InferenceConfig::default()
                    });
                    for statement in statements {
                        model.add_statement(black_box(statement)).unwrap();
                    }
                });
            });
        }
    }

    group.finish();
}

fn bench_retraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("retraction");
    group.sample_size(10);

    group.bench_function("remove_chain_middle", |b| {
        b.iter_batched(
            || {
                let mut model = model(InferenceConfig::default());
                for statement in chain(15) {
                    model.add_statement(&statement).unwrap();
                }
                model
            },
            |mut model| model.remove_statement(black_box(&sub_class(8, 7))).unwrap(),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text = include_str!("../rules/rdfs.rules");

    c.bench_function("parse_rdfs_rules", |b| {
        b.iter(|| RuleParser::new().parse_str(black_box(text)).unwrap());
    });
}

criterion_group!(benches, bench_add_chain, bench_retraction, bench_parse);
criterion_main!(benches);
