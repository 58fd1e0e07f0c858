use serde::Serialize;

use crate::model::{Car, InboxMessage, NewsPost};

const RECENT_MESSAGES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
}

/// Admin dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_cars: usize,
    pub total_news: usize,
    pub unread_messages: usize,
    /// Brands in first-seen order
    pub cars_per_brand: Vec<BrandCount>,
    /// First five messages of the (newest-first) inbox listing
    pub recent_messages: Vec<InboxMessage>,
}

impl DashboardStats {
    pub fn compute(cars: &[Car], news: &[NewsPost], inbox: &[InboxMessage]) -> Self {
        let mut cars_per_brand: Vec<BrandCount> = Vec::new();
        for car in cars {
            match cars_per_brand.iter_mut().find(|b| b.brand == car.brand) {
                Some(entry) => entry.count += 1,
                None => cars_per_brand.push(BrandCount {
                    brand: car.brand.clone(),
                    count: 1,
                }),
            }
        }

        Self {
            total_cars: cars.len(),
            total_news: news.len(),
            unread_messages: inbox.iter().filter(|m| !m.is_read).count(),
            cars_per_brand,
            recent_messages: inbox.iter().take(RECENT_MESSAGES).cloned().collect(),
        }
    }
}
