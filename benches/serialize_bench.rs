// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for anomaly classification and serialization.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use anomaly_model::{
    Anomaly, Category, Family, ReasonRegistry, Value, is_anomaly, to_anomaly, to_object,
    to_response,
};

fn sample_anomaly() -> Value {
    Anomaly::new(Category::Unavailable)
        .with_message("upstream did not answer within 30s")
        .with_data("upstream", "payments")
        .with_data("attempt", 3)
        .with_reason("UPSTREAM_TIMEOUT")
        .into()
}

fn sample_reasons() -> ReasonRegistry {
    (0..64)
        .map(|i| (format!("REASON_{i}"), format!("description {i}")))
        .chain(std::iter::once((
            "UPSTREAM_TIMEOUT".to_string(),
            "The upstream service timed out.".to_string(),
        )))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let anomaly = sample_anomaly();
    let not_anomaly = Value::from(serde_json::json!({"message": "boom"}));
    c.bench_function("is_anomaly/anomaly", |b| {
        b.iter(|| is_anomaly(black_box(&anomaly)))
    });
    c.bench_function("to_anomaly/error_like", |b| {
        b.iter(|| to_anomaly(black_box(not_anomaly.clone())))
    });
}

fn bench_serialize(c: &mut Criterion) {
    let reasons = sample_reasons();
    let plain = sample_anomaly();
    let persistent = plain
        .clone()
        .into_family(Family::Persistent)
        .expect("persistent maps enabled");

    c.bench_function("to_object/plain", |b| {
        b.iter(|| to_object(black_box(&plain), &reasons, Family::Plain))
    });
    c.bench_function("to_object/persistent", |b| {
        b.iter(|| to_object(black_box(&persistent), &reasons, Family::Persistent))
    });
    c.bench_function("to_response/plain", |b| {
        b.iter(|| to_response(black_box(&plain), &reasons))
    });
}

criterion_group!(benches, bench_classify, bench_serialize);
criterion_main!(benches);
