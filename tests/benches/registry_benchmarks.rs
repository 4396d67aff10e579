//! # Delegated Events Benchmarks
//!
//! | Operation | Scaling |
//! |-----------|---------|
//! | `find_matching` | linear in records on the target |
//! | `dispatch` (plain) | linear in tree depth |
//! | `dispatch` (delegated) | linear in selector candidates |
//! | subscribe/unsubscribe cycle | linear in records on the target |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use delegated_events::{Callback, EventApi, EventRegistry, MemoryDocument, Node};
use std::rc::Rc;

fn list_with_items(count: usize) -> (EventRegistry<MemoryDocument>, Node, Vec<Node>) {
    let document = Rc::new(MemoryDocument::new());
    let list = Node::element("ul");
    document.body().append_child(&list).unwrap();
    let items: Vec<Node> = (0..count)
        .map(|i| {
            let class = if i % 2 == 0 { "red" } else { "green" };
            let item = Node::element("li").with_class(class);
            list.append_child(&item).unwrap();
            item
        })
        .collect();
    (EventRegistry::new(document), list, items)
}

fn noop() -> Callback<Node> {
    Callback::new(|_: &Node, _| {})
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_find_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("find-matching");

    for records in [10, 100, 1000] {
        let (registry, list, _) = list_with_items(1);
        for i in 0..records {
            let event = format!("click.ns{i}");
            registry.subscribe(&list, &event, &noop()).unwrap();
        }

        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::new("by_type", records), &records, |b, _| {
            b.iter(|| black_box(registry.find_matching(&list, None, "click", None).len()))
        });
        group.bench_with_input(BenchmarkId::new("by_namespace", records), &records, |b, _| {
            b.iter(|| black_box(registry.find_matching(&list, None, "click.ns7", None).len()))
        });
    }

    group.finish();
}

// ============================================================================
// Dispatch
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let (registry, list, items) = list_with_items(1);
    registry.subscribe(&list, "click", &noop()).unwrap();
    let item = items[0].clone();
    group.bench_function("plain_bubbling", |b| {
        b.iter(|| black_box(registry.dispatch(&item, "click", None).unwrap()))
    });

    for count in [10, 100, 1000] {
        let (registry, list, items) = list_with_items(count);
        registry.delegate(&list, "li.red", "click", &noop()).unwrap();
        let last = items[count - 1].clone();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("delegated", count), &count, |b, _| {
            b.iter(|| black_box(registry.dispatch(&last, "click", None).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Subscription churn
// ============================================================================

fn bench_subscribe_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscribe-cycle");

    for existing in [0, 100] {
        let (registry, list, _) = list_with_items(1);
        for i in 0..existing {
            registry
                .subscribe(&list, &format!("keyup.ns{i}"), &noop())
                .unwrap();
        }
        let callback = noop();

        group.bench_with_input(BenchmarkId::new("subscribe_unsubscribe", existing), &existing, |b, _| {
            b.iter(|| {
                registry.subscribe(&list, "click.bench", &callback).unwrap();
                black_box(registry.unsubscribe(&list, "click.bench", Some(&callback)).unwrap())
            })
        });
        group.bench_with_input(BenchmarkId::new("once_fired", existing), &existing, |b, _| {
            b.iter(|| {
                registry.subscribe_once(&list, "click", &callback).unwrap();
                black_box(registry.dispatch(&list, "click", None).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_matching, bench_dispatch, bench_subscribe_cycle);
criterion_main!(benches);
