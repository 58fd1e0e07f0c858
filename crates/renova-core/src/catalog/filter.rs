use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::model::{Car, InboxMessage, MessageKind, Testimonial};

/// Brand selector of the public catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrandFilter {
    #[default]
    All,
    Brand(String),
}

impl BrandFilter {
    /// `all` and `semua` (any case) select every brand; anything else is an
    /// exact brand name
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("semua")
        {
            BrandFilter::All
        } else {
            BrandFilter::Brand(trimmed.to_string())
        }
    }

    pub fn matches(&self, brand: &str) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Brand(wanted) => wanted == brand,
        }
    }
}

impl fmt::Display for BrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandFilter::All => f.write_str("Semua"),
            BrandFilter::Brand(brand) => f.write_str(brand),
        }
    }
}

fn matches_query(car: &Car, needle: &str) -> bool {
    needle.is_empty()
        || car.name.to_lowercase().contains(needle)
        || car.brand.to_lowercase().contains(needle)
}

/// Public catalog view: brand filter AND name/brand substring search
pub fn filter_catalog<'a>(cars: &'a [Car], brand: &BrandFilter, query: &str) -> Vec<&'a Car> {
    let needle = query.to_lowercase();
    cars.iter()
        .filter(|car| brand.matches(&car.brand) && matches_query(car, &needle))
        .collect()
}

/// Admin inventory search over name and brand
pub fn search_inventory<'a>(cars: &'a [Car], query: &str) -> Vec<&'a Car> {
    filter_catalog(cars, &BrandFilter::All, query)
}

/// Distinct brands, sorted alphabetically
pub fn available_brands(cars: &[Car]) -> Vec<String> {
    cars.iter()
        .map(|car| car.brand.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn featured(cars: &[Car]) -> Vec<&Car> {
    cars.iter().filter(|car| car.is_featured).collect()
}

pub fn visible_testimonials(testimonials: &[Testimonial]) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| t.is_visible).collect()
}

/// First `n` visible testimonials in list order (home page strip)
pub fn latest_testimonials(testimonials: &[Testimonial], n: usize) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| t.is_visible).take(n).collect()
}

/// Inbox tab selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxFilter {
    #[default]
    All,
    General,
    TestDrive,
}

impl FromStr for InboxFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "semua" => Ok(InboxFilter::All),
            "general" | "umum" => Ok(InboxFilter::General),
            "test-drive" | "testdrive" => Ok(InboxFilter::TestDrive),
            other => Err(format!("unknown inbox filter '{}'", other)),
        }
    }
}

pub fn filter_inbox(messages: &[InboxMessage], filter: InboxFilter) -> Vec<&InboxMessage> {
    messages
        .iter()
        .filter(|m| match filter {
            InboxFilter::All => true,
            InboxFilter::General => m.kind == MessageKind::General,
            InboxFilter::TestDrive => m.kind == MessageKind::TestDrive,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_brand_filter_parse() {
        assert_eq!(BrandFilter::parse("Semua"), BrandFilter::All);
        assert_eq!(BrandFilter::parse("ALL"), BrandFilter::All);
        assert_eq!(BrandFilter::parse(""), BrandFilter::All);
        assert_eq!(
            BrandFilter::parse(" Toyota "),
            BrandFilter::Brand("Toyota".into())
        );
    }

    #[test]
    fn test_toyota_filter_keeps_relative_order() {
        let cars = defaults::cars();
        let names: Vec<&str> = filter_catalog(&cars, &BrandFilter::parse("Toyota"), "")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Avanza 1.5 G CVT",
                "Kijang Innova Reborn 2.4 V",
                "Rush 1.5 S TRD Sportivo"
            ]
        );
    }

    #[test]
    fn test_brand_match_is_exact() {
        let cars = defaults::cars();
        assert!(filter_catalog(&cars, &BrandFilter::parse("toyota"), "").is_empty());
    }

    #[test]
    fn test_query_matches_name_or_brand_case_insensitively() {
        let cars = defaults::cars();
        let by_name = search_inventory(&cars, "BRIO");
        assert_eq!(by_name.len(), 1);
        let by_brand = search_inventory(&cars, "honda");
        assert_eq!(by_brand.len(), 2);
    }

    #[test]
    fn test_available_brands_sorted_distinct() {
        let brands = available_brands(&defaults::cars());
        assert_eq!(
            brands,
            vec!["Daihatsu", "Honda", "Mitsubishi", "Suzuki", "Toyota"]
        );
    }

    #[test]
    fn test_featured_and_inbox_filters() {
        assert_eq!(featured(&defaults::cars()).len(), 3);
        let inbox = defaults::inbox();
        assert_eq!(filter_inbox(&inbox, InboxFilter::TestDrive).len(), 1);
        assert_eq!(filter_inbox(&inbox, InboxFilter::All).len(), 2);
        assert_eq!("umum".parse::<InboxFilter>(), Ok(InboxFilter::General));
    }

    #[test]
    fn test_hidden_testimonials_are_skipped() {
        let mut testimonials = defaults::testimonials();
        testimonials[0].is_visible = false;
        let latest = latest_testimonials(&testimonials, 3);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].name, "Denny Sumargo");
        assert_eq!(visible_testimonials(&testimonials).len(), 2);
    }
}
