use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dealvault_core::{
    aggregate::{category_breakdown, group_by_month, group_by_seller},
    calendar::{bucket_by_day, CalendarMonth},
    core::{services::DealService, time::SystemClock},
    domain::{NewDeal, DEAL_CATEGORIES, KNOWN_SELLERS},
    query::{DealField, DealQuery, SortDirection, SortSpec},
    store::Store,
};

fn build_sample_store(deal_count: usize) -> Store {
    let mut store = Store::new(Arc::new(SystemClock));
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");

    for idx in 0..deal_count {
        let data = NewDeal::new(
            format!("Deal {idx}"),
            19.0 + (idx % 300) as f64,
            start + Duration::days((idx % 730) as i64),
            KNOWN_SELLERS[idx % KNOWN_SELLERS.len()],
            DEAL_CATEGORIES[idx % DEAL_CATEGORIES.len()],
        )
        .with_tags(["bench"]);
        DealService::create(&mut store, data).expect("create deal");
    }
    store
}

fn bench_queries(c: &mut Criterion) {
    let store = build_sample_store(black_box(10_000));
    let query = DealQuery::for_deals()
        .search("deal 1")
        .filter(DealField::Seller, "AppSumo")
        .sort(SortSpec::new(DealField::Amount, SortDirection::Descending));

    c.bench_function("deal_search_10k", |b| {
        b.iter(|| DealService::search(&store, black_box(&query)))
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let store = build_sample_store(black_box(10_000));
    let deals = DealService::get_all(&store);
    let month = CalendarMonth::new(2023, 6).expect("valid month");

    c.bench_function("category_breakdown_10k", |b| {
        b.iter(|| category_breakdown(black_box(&deals)))
    });
    c.bench_function("group_by_month_and_seller_10k", |b| {
        b.iter(|| {
            let months = group_by_month(black_box(&deals), |deal| deal.purchase_date);
            let sellers = group_by_seller(black_box(&deals));
            (months.len(), sellers.len())
        })
    });
    c.bench_function("calendar_buckets_10k", |b| {
        b.iter(|| bucket_by_day(black_box(&deals), month, |deal| deal.purchase_date))
    });
}

criterion_group!(benches, bench_queries, bench_aggregation);
criterion_main!(benches);
