use chrono::NaiveDate;
use realty_query::{
    DataProvider, RealEstateType, RealtyError, RequestType, SeedProvider, Snapshot,
};
use rust_decimal::Decimal;
use std::collections::HashSet;

fn seed_snapshot() -> Snapshot {
    SeedProvider::new()
        .load()
        .and_then(|dataset| dataset.into_snapshot())
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sellers with requests during 2024.
#[test]
fn test_sellers_by_period() {
    let snapshot = seed_snapshot();
    let sellers = snapshot
        .engine()
        .unwrap()
        .sellers_in_period(date(2024, 1, 1), date(2024, 12, 31))
        .unwrap();

    // clients 1, 3, 5, 7; client 9 sold in 2025
    assert_eq!(
        sellers,
        vec![
            "Elena Volkova".to_string(),
            "Ivan Ivanov".to_string(),
            "Maria Kuznetsova".to_string(),
            "Sergey Sidorov".to_string(),
        ]
    );
}

#[test]
fn test_top_five_clients_by_requests() {
    let snapshot = seed_snapshot();
    let engine = snapshot.engine().unwrap();

    let top_buyers = engine.top_clients(RequestType::Buy, 5).unwrap();
    let top_sellers = engine.top_clients(RequestType::Sell, 5).unwrap();

    assert_eq!(top_buyers.len(), 5);
    assert_eq!(top_sellers.len(), 5);
    assert!(top_buyers.iter().all(|c| c.count == 1));
    assert!(top_sellers.iter().all(|c| c.count == 1));

    let seller_names: Vec<&str> = top_sellers
        .iter()
        .map(|c| c.counterparty.full_name.as_str())
        .collect();
    assert_eq!(
        seller_names,
        vec![
            "Elena Volkova",
            "Ivan Ivanov",
            "Maria Kuznetsova",
            "Natalia Ivanova",
            "Sergey Sidorov"
        ]
    );
}

#[test]
fn test_top_clients_returns_fewer_when_not_enough_clients() {
    let snapshot = seed_snapshot();
    let top = snapshot.engine().unwrap().top_clients(RequestType::Sell, 50).unwrap();
    assert_eq!(top.len(), 5);
}

#[test]
fn test_request_count_by_estate_type() {
    let snapshot = seed_snapshot();
    let stats = snapshot.engine().unwrap().request_counts_by_type().unwrap();

    assert_eq!(stats[&RealEstateType::Apartment], 3); // estates 1, 6, 9
    assert_eq!(stats[&RealEstateType::House], 2); // 2, 7
    assert_eq!(stats[&RealEstateType::Office], 2); // 3, 8
    assert_eq!(stats[&RealEstateType::Land], 2); // 4, 10
    assert_eq!(stats[&RealEstateType::Garage], 1); // 5
    assert_eq!(stats.values().sum::<usize>(), snapshot.requests().len());
}

#[test]
fn test_clients_with_min_price_requests() {
    let snapshot = seed_snapshot();
    let result = snapshot.engine().unwrap().min_price_clients().unwrap();

    assert_eq!(result.price, Decimal::from(600_000));
    assert_eq!(result.clients, vec!["Elena Volkova".to_string()]);
}

#[test]
fn test_min_price_is_idempotent() {
    let snapshot = seed_snapshot();
    let engine = snapshot.engine().unwrap();
    assert_eq!(engine.min_price_clients().unwrap(), engine.min_price_clients().unwrap());
}

#[test]
fn test_clients_by_estate_type() {
    let snapshot = seed_snapshot();
    let engine = snapshot.engine().unwrap();

    // only Dmitry Orlov is buying an apartment (request 6)
    assert_eq!(
        engine.clients_seeking(RealEstateType::Apartment).unwrap(),
        vec!["Dmitry Orlov".to_string()]
    );
    assert!(engine.clients_seeking(RealEstateType::Garage).unwrap().is_empty());
}

#[test]
fn test_repeat_seller_is_listed_once() {
    let mut dataset = SeedProvider::dataset();
    let mut repeat = dataset.requests[0].clone();
    repeat.id = 11;
    repeat.estate_id = 6;
    repeat.date = date(2024, 2, 2).and_hms_opt(12, 0, 0).unwrap();
    dataset.requests.push(repeat);

    let snapshot = dataset.into_snapshot().unwrap();
    let engine = snapshot.engine().unwrap();
    let sellers = engine
        .sellers_in_period(date(2024, 1, 1), date(2024, 12, 31))
        .unwrap();

    let unique: HashSet<&String> = sellers.iter().collect();
    assert_eq!(unique.len(), sellers.len());
    assert_eq!(sellers.len(), 4);

    let top = engine.top_clients(RequestType::Sell, 1).unwrap();
    assert_eq!(top[0].counterparty.full_name, "Ivan Ivanov");
    assert_eq!(top[0].count, 2);
}

#[test]
fn test_empty_snapshot_min_price_fails() {
    let snapshot = Snapshot::new(vec![], vec![], vec![]).unwrap();
    let engine = snapshot.engine().unwrap();

    assert!(matches!(
        engine.min_price_clients(),
        Err(RealtyError::EmptyInput { .. })
    ));
    assert!(engine
        .sellers_in_period(date(2024, 1, 1), date(2024, 12, 31))
        .unwrap()
        .is_empty());
    assert!(engine.top_clients(RequestType::Buy, 5).unwrap().is_empty());
}

#[test]
fn test_seed_with_dangling_reference_is_rejected() {
    let mut dataset = SeedProvider::dataset();
    dataset.requests[3].counterparty_id = 404;

    let err = dataset.into_snapshot().unwrap_err();
    assert!(matches!(
        err,
        RealtyError::BrokenReference {
            request_id: 4,
            target_id: 404,
            ..
        }
    ));
}
