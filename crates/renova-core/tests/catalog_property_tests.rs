#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use renova_core::catalog::{
    available_brands, filter_catalog, format_mileage, format_rupiah, parse_rupiah, BrandFilter,
};
use renova_core::defaults;
use renova_core::model::Car;

fn fleet(brands: &[String]) -> Vec<Car> {
    let template = defaults::cars().remove(0);
    brands
        .iter()
        .enumerate()
        .map(|(i, brand)| Car {
            id: i.to_string(),
            name: format!("Model {}", i),
            brand: brand.clone(),
            ..template.clone()
        })
        .collect()
}

fn brand_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Toyota".to_string()),
        Just("Honda".to_string()),
        Just("Suzuki".to_string()),
        Just("Wuling".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_brand_filter_is_ordered_subsequence(brands in prop::collection::vec(brand_strategy(), 0..20)) {
        let cars = fleet(&brands);
        let filtered = filter_catalog(&cars, &BrandFilter::parse("Toyota"), "");

        prop_assert!(filtered.iter().all(|c| c.brand == "Toyota"));
        prop_assert_eq!(filtered.len(), brands.iter().filter(|b| *b == "Toyota").count());

        let positions: Vec<usize> = filtered.iter().map(|c| c.id.parse().unwrap()).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_all_filter_with_empty_query_is_identity(brands in prop::collection::vec(brand_strategy(), 0..20)) {
        let cars = fleet(&brands);
        let filtered = filter_catalog(&cars, &BrandFilter::All, "");
        prop_assert_eq!(filtered.len(), cars.len());
    }

    #[test]
    fn prop_available_brands_sorted_and_distinct(brands in prop::collection::vec(brand_strategy(), 0..20)) {
        let listed = available_brands(&fleet(&brands));
        prop_assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_rupiah_formatting_parses_back(price in 0u64..10_000_000_000_000) {
        prop_assert_eq!(parse_rupiah(&format_rupiah(price)), Some(price));
    }

    #[test]
    fn prop_mileage_digits_preserved(km in 0u64..2_000_000) {
        let formatted = format_mileage(km);
        let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits, km.to_string());
        prop_assert!(formatted.ends_with(" km"));
    }
}
