//! Reconciliation performance benchmarks.
//!
//! Run with: cargo bench -p stockledger-engine

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockledger_core::{
    LocationFilter, PeriodWindow, PurchaseLine, PurchaseReceipt, Recipe, RecordStatus, SaleLine,
    SaleTicket, Snapshot, StockItem, StocktakeCount, StocktakeKind, StocktakeLine,
};
use stockledger_engine::reconcile;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Generate a snapshot with N items and proportional record volume.
fn generate_snapshot(num_items: usize) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for i in 0..num_items {
        let id = format!("item-{i}");
        snapshot.items.push(StockItem {
            id: id.clone(),
            name: format!("Item {i}"),
            category: format!("Category {}", i % 8),
            stock_unit: "kg".into(),
            recipe_unit: "g".into(),
            conversion_factor: dec!(1000),
            avg_cost: dec!(2.50) + Decimal::from(i as i64 % 20),
            current_stock: dec!(50),
            reorder_level: dec!(10),
            min_level: dec!(5),
            active: true,
        });
        snapshot.recipes.push(
            Recipe::new(format!("dish-{i}")).with_ingredient(id.clone(), dec!(125)),
        );

        snapshot.purchases.push(PurchaseReceipt {
            date: date(2024, 3, 1 + (i % 28) as u32),
            status: RecordStatus::Posted,
            location_id: format!("branch-{}", i % 3),
            lines: vec![PurchaseLine {
                item_id: id.clone(),
                qty: dec!(40),
                unit_cost: dec!(2.40),
            }],
        });
        snapshot.sales.push(SaleTicket {
            date: date(2024, 3, 1 + (i % 28) as u32),
            status: RecordStatus::Posted,
            location_id: format!("branch-{}", i % 3),
            lines: vec![SaleLine {
                menu_item_id: format!("dish-{i}"),
                qty: dec!(12),
            }],
        });
        snapshot.stocktakes.push(StocktakeCount {
            date: date(2024, 2, 1 + (i % 28) as u32),
            status: RecordStatus::Posted,
            location_id: format!("branch-{}", i % 3),
            kind: StocktakeKind::Closing,
            lines: vec![StocktakeLine {
                item_id: id,
                counted_qty: dec!(30),
            }],
        });
    }

    snapshot
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    let period = PeriodWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

    for size in [10, 100, 1000] {
        let snapshot = generate_snapshot(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| {
                let report = reconcile(snapshot, period, &LocationFilter::All, None);
                black_box(report)
            });
        });
    }

    group.finish();
}

fn bench_reconcile_single_branch(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_single_branch");
    let period = PeriodWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
    let filter = LocationFilter::Only("branch-1".into());

    for size in [100, 1000] {
        let snapshot = generate_snapshot(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| {
                let report = reconcile(snapshot, period, &filter, None);
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_reconcile_single_branch);
criterion_main!(benches);
