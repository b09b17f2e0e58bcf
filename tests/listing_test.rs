mod helpers;

use estate_backend::listing::{self, ListingQuery, SortOrder};
use estate_backend::models::Property;
use helpers::sample_property;
use rust_decimal::Decimal;

/// Deterministic catalog with repeated prices and bedroom counts
fn catalog(len: usize) -> Vec<Property> {
    let mut seed: u64 = 0x5eed;
    (0..len)
        .map(|i| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let price = 100_000 + ((seed >> 33) % 20) as i64 * 25_000;
            let bedrooms = ((seed >> 20) % 6) as i32;
            let day = (i % 28) as u32 + 1;
            sample_property(&format!("listing-{}", i), price, bedrooms, day)
        })
        .collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_min_bedrooms_keeps_only_matching() {
    for threshold in 0..=6 {
        let query = ListingQuery {
            min_bedrooms: Some(threshold),
            page_size: 100,
            ..Default::default()
        };
        let all = catalog(60);
        let expected = all.iter().filter(|p| p.bedrooms >= threshold).count();

        let page = listing::run(all, &query).unwrap();
        assert_eq!(page.total_items, expected);
        assert!(page.items.iter().all(|p| p.bedrooms >= threshold));
    }
}

#[test]
fn test_search_matches_city_case_insensitively() {
    let query = ListingQuery {
        search: Some("AUSTIN".to_string()),
        ..Default::default()
    };
    let page = listing::run(catalog(5), &query).unwrap();
    assert_eq!(page.total_items, 5);

    let query = ListingQuery {
        search: Some("houston".to_string()),
        ..Default::default()
    };
    let page = listing::run(catalog(5), &query).unwrap();
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
}

#[test]
fn test_city_match_ignores_non_ascii_case() {
    let mut apartment = sample_property("apartamento", 300_000, 2, 1);
    apartment.city = "São Paulo".to_string();
    let items = vec![apartment, sample_property("ranch", 200_000, 3, 2)];

    let query = ListingQuery {
        city: Some(" SÃO PAULO ".to_string()),
        ..Default::default()
    };
    let page = listing::run(items, &query).unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].title, "apartamento");
}

#[test]
fn test_price_bounds_are_inclusive() {
    let query = ListingQuery {
        min_price: Some(Decimal::new(150_000, 0)),
        max_price: Some(Decimal::new(150_000, 0)),
        page_size: 100,
        ..Default::default()
    };
    let all = catalog(80);
    let expected = all
        .iter()
        .filter(|p| p.price == Decimal::new(150_000, 0))
        .count();

    let page = listing::run(all, &query).unwrap();
    assert_eq!(page.total_items, expected);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_price_asc_is_non_decreasing() {
    let query = ListingQuery {
        sort: SortOrder::PriceAsc,
        page_size: 100,
        ..Default::default()
    };
    let page = listing::run(catalog(75), &query).unwrap();
    assert!(page.items.windows(2).all(|w| w[0].price <= w[1].price));
}

#[test]
fn test_price_desc_is_non_increasing() {
    let query = ListingQuery {
        sort: SortOrder::PriceDesc,
        page_size: 100,
        ..Default::default()
    };
    let page = listing::run(catalog(75), &query).unwrap();
    assert!(page.items.windows(2).all(|w| w[0].price >= w[1].price));
}

#[test]
fn test_sort_keeps_input_order_on_ties() {
    let items = vec![
        sample_property("a", 300, 1, 1),
        sample_property("b", 100, 1, 2),
        sample_property("c", 300, 1, 3),
        sample_property("d", 100, 1, 4),
    ];
    let mut sorted = items.clone();
    listing::sort(&mut sorted, SortOrder::PriceAsc);

    let titles: Vec<_> = sorted.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "d", "a", "c"]);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_pages_never_exceed_page_size() {
    for len in [0usize, 1, 8, 9, 10, 27, 31] {
        for page_size in [1u32, 4, 9, 10] {
            let total_pages = (len as u32).div_ceil(page_size);
            let mut seen = 0;

            for page in 1..=total_pages.max(1) {
                let result = listing::paginate(catalog(len), page, page_size);
                assert!(result.items.len() <= page_size as usize);
                assert_eq!(result.total_items, len);
                assert_eq!(result.total_pages, total_pages);
                seen += result.items.len();
            }
            assert_eq!(seen, len, "len={} page_size={}", len, page_size);
        }
    }
}

#[test]
fn test_last_page_holds_remainder() {
    let page = listing::paginate(catalog(23), 3, 9);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn test_page_past_end_is_empty_with_totals() {
    let page = listing::paginate(catalog(23), 7, 9);
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 7);
}

#[test]
fn test_invalid_query_is_rejected_before_work() {
    let query = ListingQuery {
        page: 0,
        ..Default::default()
    };
    assert!(listing::run(catalog(3), &query).is_err());

    let query = ListingQuery {
        page_size: 0,
        ..Default::default()
    };
    assert!(listing::run(catalog(3), &query).is_err());
}
