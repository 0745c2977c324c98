//! End-to-end flows: store refresh and mutations composed with the
//! projection, the way the storefront and admin surfaces drive them.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use glowcart_catalog::{FilterSpec, PriceRange, SortOption, StorefrontView, UpdateError, project};
use glowcart_core::Product;
use glowcart_integration_tests::{bundled_store, product, store_with, with_stats};

#[tokio::test]
async fn storefront_flow_filters_and_sorts_the_bundled_catalog() {
    let store = bundled_store();
    store.refresh().await.unwrap();

    let mut view = StorefrontView::new();
    view.set_filters(FilterSpec {
        categories: HashSet::from(["Toners".to_string(), "Essences".to_string()]),
        ..FilterSpec::default()
    });
    view.set_sort_option(SortOption::BestSelling);
    view.sync(&store.products());

    let visible = view.visible();
    assert!(!visible.is_empty());
    assert!(
        visible
            .iter()
            .all(|p| p.category == "Toners" || p.category == "Essences")
    );
    // Descending by units sold, stable between equals.
    assert!(
        visible
            .windows(2)
            .all(|w| w[0].volume_sold_last_month() >= w[1].volume_sold_last_month())
    );
}

#[tokio::test]
async fn subscriber_snapshot_matches_direct_projection() {
    let store = bundled_store();

    let seen: Arc<Mutex<Vec<Vec<Product>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |products| {
        sink.lock().unwrap().push(products.to_vec());
    });

    let refreshed = store.refresh().await.unwrap();

    let snapshots = seen.lock().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots.first().unwrap(), &refreshed);

    // Projecting the notified snapshot is the same as projecting the store.
    let filters = FilterSpec::default();
    assert_eq!(
        project(snapshots.first().unwrap(), &filters, SortOption::PriceAsc),
        project(&store.products(), &filters, SortOption::PriceAsc),
    );
}

#[tokio::test]
async fn admin_pin_flow_round_trips_and_survives_projection() {
    let store = bundled_store();
    let baseline = store.refresh().await.unwrap();
    let target = baseline.first().unwrap().id.clone();

    store.pin(&target).await.unwrap();

    // The pin is visible in the resynchronized list...
    let held = store.products();
    assert!(held.iter().find(|p| p.id == target).unwrap().is_pinned);

    // ...and carried through projection without changing the ordering.
    let projected = project(&held, &FilterSpec::default(), SortOption::Popularity);
    let unpinned_order: Vec<_> = baseline.iter().map(|p| p.id.clone()).collect();
    let pinned_order: Vec<_> = projected.iter().map(|p| p.id.clone()).collect();
    assert_eq!(unpinned_order, pinned_order);

    store.unpin(&target).await.unwrap();
    assert!(
        !store
            .products()
            .iter()
            .find(|p| p.id == target)
            .unwrap()
            .is_pinned
    );
}

#[tokio::test]
async fn failed_refresh_keeps_the_storefront_serving_the_old_list() {
    let store = bundled_store();
    let good = store.refresh().await.unwrap();

    store.source().set_fail_fetches(true);
    assert!(store.refresh().await.is_err());

    // The storefront keeps rendering the last-known-good projection.
    let visible = project(
        &store.products(),
        &FilterSpec::default(),
        SortOption::Popularity,
    );
    assert_eq!(
        visible,
        project(&good, &FilterSpec::default(), SortOption::Popularity)
    );
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn stale_feed_overrides_optimistic_pin_wholesale() {
    let products = vec![
        product("a", 10, "COSRX", "Toners"),
        product("b", 20, "Laneige", "Masks"),
    ];
    let store = store_with(products.clone());
    store.refresh().await.unwrap();

    store.pin(&products.first().unwrap().id).await.unwrap();
    assert!(store.products().first().unwrap().is_pinned);

    // Upstream publishes a feed that does not carry the pin yet; the next
    // refresh replaces the list wholesale, optimistic state included.
    store.source().replace_products(products);
    store.refresh().await.unwrap();
    assert!(!store.products().first().unwrap().is_pinned);
}

#[tokio::test]
async fn pin_against_unknown_id_is_rejected_without_side_effects() {
    let store = store_with(vec![product("only", 15, "Benton", "Gels")]);
    store.refresh().await.unwrap();
    let version = store.version();

    let err = store
        .pin(&glowcart_core::ProductId::new("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpdateError::UnknownProduct(_)));
    assert_eq!(store.version(), version);
}

#[tokio::test]
async fn price_window_and_stats_sorting_compose() {
    let store = store_with(vec![
        with_stats(product("quiet", 30, "Missha", "Serums"), 10, 1),
        product("unknown", 40, "Missha", "Serums"),
        with_stats(product("hit", 50, "Missha", "Serums"), 5000, 900),
        product("too-expensive", 300, "Missha", "Serums"),
    ]);
    store.refresh().await.unwrap();

    let filters = FilterSpec {
        price_range: PriceRange::default(),
        ..FilterSpec::default()
    };
    let result = project(&store.products(), &filters, SortOption::MostViewed);

    let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
    // The default window drops the 300-unit product; missing stats sink last.
    assert_eq!(ids, ["hit", "quiet", "unknown"]);
}
