//! Latency benchmarks for the built-in models and registry dispatch
//!
//! Run with: cargo bench -p scamguard-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use scamguard_classifiers::{ClassifierPort, KeywordModel, ModelRegistry, ModelsConfig, RuleModel, ScamModel};

const TEST_CASES: &[(&str, &str)] = &[
    ("short_clean", "Thanks"),
    ("short_scam", "Menang!"),
    ("medium_clean", "Meeting reminder: Tomorrow at 2 PM in the main office"),
    ("medium_scam", "SELAMAT! Anda menang 100 juta! Transfer admin 500rb ke 08123456789"),
    (
        "long_clean",
        "Selamat pagi, saya ingin menginformasikan bahwa paket Anda telah sampai di kantor pos cabang terdekat. Mohon untuk segera mengambil paket tersebut dengan membawa KTP asli dan nomor resi pengiriman.",
    ),
];

/// Benchmark the keyword model
fn benchmark_keyword_model(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let model = KeywordModel::with_default_keywords("keyword").expect("Failed to create keyword model");

    let mut group = c.benchmark_group("Keyword_Model");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in TEST_CASES {
        group.bench_with_input(BenchmarkId::new("classify", name), text, |b, text| {
            b.iter(|| rt.block_on(async { model.classify(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

/// Benchmark the rule model
fn benchmark_rule_model(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let model = RuleModel::new("rules", 0.5).expect("Failed to create rule model");

    let mut group = c.benchmark_group("Rule_Model");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in TEST_CASES {
        group.bench_with_input(BenchmarkId::new("classify", name), text, |b, text| {
            b.iter(|| rt.block_on(async { model.classify(black_box(text)).await.unwrap() }));
        });
    }

    group.finish();
}

/// Registry overhead: default dispatch vs. named dispatch
fn benchmark_registry_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = ModelRegistry::from_config(&ModelsConfig::default()).expect("Failed to build registry");
    let text = "URGENT! Akun BCA Anda akan diblokir. Verifikasi di http://fake-bca.com sekarang";

    let mut group = c.benchmark_group("Registry_Dispatch");
    group.sample_size(100);

    group.bench_function("default_model", |b| {
        b.iter(|| rt.block_on(async { registry.classify(black_box(text), None).await.unwrap() }));
    });

    for id in registry.list_model_ids() {
        group.bench_with_input(BenchmarkId::new("named_model", &id), &id, |b, id| {
            b.iter(|| {
                rt.block_on(async { registry.classify(black_box(text), Some(id.as_str())).await.unwrap() })
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_keyword_model,
    benchmark_rule_model,
    benchmark_registry_dispatch
);
criterion_main!(benches);
