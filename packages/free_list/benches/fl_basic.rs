//! Basic benchmarks for the `free_list` package.
//!
//! Compares `FreeList` against a naive list written directly against the item type, and
//! against plain allocation, both on one thread and with several threads contending.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::num::NonZero;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group, criterion_main};
use free_list::{FreeList, Linked};
use parking_lot::Mutex;
use testing::on_many_threads;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const BURST: usize = 100;
const THREAD_COUNT: NonZero<usize> = NonZero::new(4).unwrap();

#[derive(Linked)]
struct TestItem {
    value: u64,
    next: Option<Box<Self>>,
}

fn test_item() -> Box<TestItem> {
    Box::new(TestItem {
        value: 1,
        next: None,
    })
}

/// The same protocol as `FreeList`, hand-written for one item type, as a baseline.
#[derive(Default)]
struct NaiveList {
    head: Mutex<Option<Box<TestItem>>>,
}

impl NaiveList {
    fn get(&self) -> Option<Box<TestItem>> {
        let mut head = self.head.lock();
        let mut item = head.take()?;
        *head = item.next.take();
        Some(item)
    }

    fn put(&self, mut item: Box<TestItem>) {
        let mut head = self.head.lock();
        item.next = head.take();
        *head = Some(item);
    }
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fl_put_get");

    group.bench_function("free_list", |b| {
        let list = FreeList::new();
        list.put(test_item());

        b.iter(|| {
            let item = list.get().expect("one item is always idle");
            list.put(black_box(item));
        });
    });

    group.bench_function("naive", |b| {
        let list = NaiveList::default();
        list.put(test_item());

        b.iter(|| {
            let item = list.get().expect("one item is always idle");
            list.put(black_box(item));
        });
    });

    group.bench_function("allocate", |b| {
        b.iter(|| drop(black_box(test_item())));
    });

    group.finish();

    let mut group = c.benchmark_group("fl_overflow");

    group.bench_function("free_list", |b| {
        let list = FreeList::new();

        b.iter(|| {
            for _ in 0..BURST {
                list.put(test_item());
            }
            for _ in 0..BURST {
                drop(black_box(list.get()));
            }
        });
    });

    group.bench_function("naive", |b| {
        let list = NaiveList::default();

        b.iter(|| {
            for _ in 0..BURST {
                list.put(test_item());
            }
            for _ in 0..BURST {
                drop(black_box(list.get()));
            }
        });
    });

    group.finish();

    let mut group = c.benchmark_group("fl_put_get_mt");

    group.bench_function("free_list", |b| {
        let list = FreeList::builder().factory(test_item).build();

        b.iter_custom(|iters| {
            contended(|| {
                let item = list.get().expect("factory is configured");
                black_box(item.value);
                list.put(item);
            }, iters)
        });
    });

    group.bench_function("naive", |b| {
        let list = NaiveList::default();

        b.iter_custom(|iters| {
            contended(|| {
                let item = list.get().unwrap_or_else(test_item);
                black_box(item.value);
                list.put(item);
            }, iters)
        });
    });

    group.finish();
}

/// Runs `op` `iters` times on every thread at once and reports the mean time per thread.
fn contended(op: impl Fn() + Sync, iters: u64) -> Duration {
    let per_thread = on_many_threads(THREAD_COUNT, |_| {
        let start = Instant::now();

        for _ in 0..iters {
            op();
        }

        start.elapsed()
    });

    #[expect(
        clippy::cast_possible_truncation,
        reason = "thread count is tiny, far below u32::MAX"
    )]
    let thread_count = THREAD_COUNT.get() as u32;

    per_thread.iter().sum::<Duration>() / thread_count
}
