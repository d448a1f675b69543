use chrono::NaiveDate;
use uuid::Uuid;

use provider_cell::models::{ProviderSearchQuery, ProviderSortBy, SpecialtyType};
use provider_cell::services::directory::ProviderDirectory;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn search_filters_by_specialty_type() {
    let directory = ProviderDirectory::new();
    let query = ProviderSearchQuery {
        specialty: Some(SpecialtyType::Psychiatrist),
        ..Default::default()
    };

    let results = directory.search(&query);
    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|p| p.specialty_type == SpecialtyType::Psychiatrist));
}

#[test]
fn search_matches_name_case_insensitively() {
    let directory = ProviderDirectory::new();
    let query = ProviderSearchQuery {
        search: Some("sarah".to_string()),
        ..Default::default()
    };

    let results = directory.search(&query);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Dr. Sarah Johnson");
}

#[test]
fn default_sort_is_rating_descending() {
    let directory = ProviderDirectory::new();
    let results = directory.search(&ProviderSearchQuery::default());

    let ratings: Vec<f32> = results.iter().map(|p| p.rating).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(ratings, sorted);
}

#[test]
fn price_low_sort_orders_ascending() {
    let directory = ProviderDirectory::new();
    let query = ProviderSearchQuery {
        sort_by: Some(ProviderSortBy::PriceLow),
        ..Default::default()
    };

    let results = directory.search(&query);
    let prices: Vec<i64> = results.iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
}

#[test]
fn max_price_filter_excludes_expensive_providers() {
    let directory = ProviderDirectory::new();
    let query = ProviderSearchQuery {
        max_price: Some(150),
        ..Default::default()
    };

    let results = directory.search(&query);
    assert!(!results.is_empty());
    assert!(results.iter().all(|p| p.price <= 150));
}

#[test]
fn slots_present_for_offered_date() {
    let directory = ProviderDirectory::new();
    let sarah = directory
        .search(&ProviderSearchQuery {
            search: Some("Sarah Johnson".to_string()),
            ..Default::default()
        })
        .remove(0);

    let availability = directory
        .available_slots(sarah.id, date("2024-01-15"), date("2024-01-10"))
        .unwrap();
    assert_eq!(
        availability.slots,
        vec!["09:00", "10:00", "11:00", "14:00", "15:00"]
    );
}

#[test]
fn past_dates_offer_no_slots() {
    let directory = ProviderDirectory::new();
    let sarah = directory
        .search(&ProviderSearchQuery {
            search: Some("Sarah Johnson".to_string()),
            ..Default::default()
        })
        .remove(0);

    let availability = directory
        .available_slots(sarah.id, date("2024-01-15"), date("2024-01-16"))
        .unwrap();
    assert!(availability.slots.is_empty());
}

#[test]
fn dates_beyond_horizon_offer_no_slots() {
    let directory = ProviderDirectory::new();
    let sarah = directory
        .search(&ProviderSearchQuery {
            search: Some("Sarah Johnson".to_string()),
            ..Default::default()
        })
        .remove(0);

    // 2024-01-15 is more than 30 days after 2023-12-01.
    let availability = directory
        .available_slots(sarah.id, date("2024-01-15"), date("2023-12-01"))
        .unwrap();
    assert!(availability.slots.is_empty());
}

#[test]
fn unknown_provider_is_an_error() {
    let directory = ProviderDirectory::new();
    assert!(directory
        .available_slots(Uuid::new_v4(), date("2024-01-15"), date("2024-01-10"))
        .is_err());
}
