//! Benchmarks for the order book operations.
//!
//! The mutating operations (add, cancel, modify) are the assumed hot
//! path; rank queries and dumps are measured separately so the O(rank)
//! iteration cost stays visible.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- add_order
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use limitbook::{Order, OrderBook, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS - Deterministic book population
// ============================================================================

/// Price band: 90.00 to 110.00 in 0.01 ticks
const TICK_COUNT: u64 = 2_000;
const BASE_PRICE_TICKS: u64 = 9_000;

/// Generate a deterministic batch of orders with random prices in the
/// band, alternating sides.
fn generate_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let ticks = BASE_PRICE_TICKS + rng.gen_range(0..TICK_COUNT);
        let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Offer };
        let size = rng.gen_range(1..=1_000);
        orders.push(Order::new((i + 1) as u64, ticks as f64 / 100.0, side, size));
    }

    orders
}

/// A book pre-populated with `count` resident orders.
fn populated_book(count: usize) -> OrderBook {
    let mut book = OrderBook::with_capacity(count * 2);
    for order in generate_orders(count, 7) {
        book.add_order(order).expect("population add failed");
    }
    book
}

// ============================================================================
// BENCHMARKS
// ============================================================================

/// Add a fresh order into an already busy book.
fn bench_add_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_order");

    for book_size in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            &book_size,
            |b, &size| {
                let book = populated_book(size);
                let order = Order::new(u64::MAX, 100.0, Side::Bid, 10);

                b.iter_batched(
                    || book.clone(),
                    |mut book| {
                        book.add_order(black_box(order)).unwrap();
                        book
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Cancel a resident order by id.
fn bench_remove_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_order");

    for book_size in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            &book_size,
            |b, &size| {
                let book = populated_book(size);
                // Cancel an order from the middle of the id space
                let target = (size / 2) as u64;

                b.iter_batched(
                    || book.clone(),
                    |mut book| {
                        assert!(book.remove_order(black_box(target)));
                        book
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// In-place size modification.
fn bench_modify_size(c: &mut Criterion) {
    let mut book = populated_book(10_000);
    let target = 5_000u64;

    c.bench_function("modify_size/10000", |b| {
        let mut size = 1u64;
        b.iter(|| {
            // Alternate the size so every call really mutates
            size = if size == 1 { 2 } else { 1 };
            book.modify_size(black_box(target), size).unwrap();
        });
    });
}

/// Rank queries at increasing depth: O(rank) by design.
fn bench_rank_queries(c: &mut Criterion) {
    let book = populated_book(100_000);
    let mut group = c.benchmark_group("price_at");

    for rank in [1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(rank), &rank, |b, &rank| {
            b.iter(|| {
                let price = book.price_at(Side::Bid, black_box(rank)).unwrap();
                let size = book.size_at(Side::Bid, black_box(rank)).unwrap();
                black_box((price, size))
            });
        });
    }

    group.finish();
}

/// Stream one full side through a sink.
fn bench_dump_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_orders");

    for book_size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(book_size as u64 / 2));
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            &book_size,
            |b, &size| {
                let book = populated_book(size);

                b.iter(|| {
                    let mut total = 0u64;
                    book.dump_orders(Side::Bid, |order| total += order.size);
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_order,
    bench_remove_order,
    bench_modify_size,
    bench_rank_queries,
    bench_dump_orders
);
criterion_main!(benches);
