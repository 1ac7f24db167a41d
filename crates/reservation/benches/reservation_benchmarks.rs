use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use agrirent_core::{BookingPeriod, ItemId, Money, UserId};
use agrirent_ledger::InMemoryBookingLedger;
use agrirent_registry::{InMemoryItemStore, Item, RegisterItem, Region};
use agrirent_reservation::{
    BookingRequest, CompleteBooking, ReservationCoordinator, RetryPolicy,
};

type BenchCoordinator =
    ReservationCoordinator<Arc<InMemoryItemStore>, Arc<InMemoryBookingLedger>>;

fn clock() -> DateTime<Utc> {
    "2026-09-01T08:00:00Z".parse().unwrap()
}

fn setup() -> BenchCoordinator {
    agrirent_observability::init();
    let items = Arc::new(InMemoryItemStore::new());
    let ledger = Arc::new(InMemoryBookingLedger::new());
    ReservationCoordinator::with_retry_policy(items, ledger, RetryPolicy::no_retries())
}

fn register_item(coordinator: &BenchCoordinator, owner: UserId) -> Item {
    coordinator
        .register_item(RegisterItem {
            item_id: ItemId::new(),
            owner_id: owner,
            name: "Tractor".to_string(),
            category: "Tractors".to_string(),
            region: Region::new("Maharashtra", "Pune"),
            daily_rate: Money::from_rupees(500),
            image_urls: vec![],
            occurred_at: clock(),
        })
        .unwrap()
}

fn period(days: i64) -> BookingPeriod {
    let start = clock().date_naive();
    BookingPeriod::new(start, start + Duration::days(days - 1)).unwrap()
}

fn bench_request_booking(c: &mut Criterion) {
    let coordinator = setup();
    let mut group = c.benchmark_group("request_booking");
    group.throughput(Throughput::Elements(1));

    group.bench_function("fresh_item", |b| {
        b.iter_batched(
            || register_item(&coordinator, UserId::new()),
            |item| {
                coordinator
                    .request_booking(BookingRequest {
                        item_id: item.id_typed(),
                        requester_id: UserId::new(),
                        period: period(3),
                        requested_at: clock(),
                    })
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let coordinator = setup();
    let mut group = c.benchmark_group("booking_cycle");
    group.throughput(Throughput::Elements(1));

    group.bench_function("request_then_complete", |b| {
        b.iter_batched(
            || {
                let owner = UserId::new();
                (register_item(&coordinator, owner), owner)
            },
            |(item, owner)| {
                let confirmation = coordinator
                    .request_booking(BookingRequest {
                        item_id: item.id_typed(),
                        requester_id: UserId::new(),
                        period: period(2),
                        requested_at: clock(),
                    })
                    .unwrap();
                coordinator
                    .complete_booking(CompleteBooking {
                        booking_id: confirmation.booking_id,
                        caller_id: owner,
                        completed_at: clock() + Duration::days(2),
                    })
                    .unwrap();
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_request_booking, bench_full_cycle);
criterion_main!(benches);
