//! Input validation for drafts and patches
//!
//! Repositories store whatever they are given; callers (the showroom
//! service, the CLI) validate before calling the persistence contract.

use crate::errors::{RenovaError, Result};
use crate::model::{
    CarDraft, CarPatch, InboxMessageDraft, MessageKind, NewsPostDraft, NewsPostPatch,
    TestimonialDraft, TestimonialPatch, UserDraft,
};

const MIN_YEAR: u16 = 1900;
const MAX_YEAR: u16 = 2100;

pub trait Validate {
    /// # Errors
    ///
    /// `InvalidInput` naming the first offending field.
    fn validate(&self) -> Result<()>;
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RenovaError::invalid(field, "must not be empty").into());
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let well_formed = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(RenovaError::invalid(field, "must be an email address").into());
    }
    Ok(())
}

fn check_price(price: u64) -> Result<()> {
    if price == 0 {
        return Err(RenovaError::invalid("price", "must be greater than zero").into());
    }
    Ok(())
}

fn check_year(year: u16) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RenovaError::invalid(
            "year",
            format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
        )
        .into());
    }
    Ok(())
}

fn check_seats(seats: u8) -> Result<()> {
    if seats == 0 {
        return Err(RenovaError::invalid("seats", "must be at least 1").into());
    }
    Ok(())
}

fn check_rating(rating: u8) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(RenovaError::invalid("rating", "must be between 1 and 5").into());
    }
    Ok(())
}

impl Validate for CarDraft {
    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("brand", &self.brand)?;
        check_price(self.price)?;
        check_year(self.year)?;
        check_seats(self.seats)
    }
}

impl Validate for CarPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(brand) = &self.brand {
            require_text("brand", brand)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(year) = self.year {
            check_year(year)?;
        }
        if let Some(seats) = self.seats {
            check_seats(seats)?;
        }
        Ok(())
    }
}

impl Validate for NewsPostDraft {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

impl Validate for NewsPostPatch {
    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content)?;
        }
        Ok(())
    }
}

impl Validate for TestimonialDraft {
    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("comment", &self.comment)?;
        check_rating(self.rating)
    }
}

impl Validate for TestimonialPatch {
    fn validate(&self) -> Result<()> {
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(comment) = &self.comment {
            require_text("comment", comment)?;
        }
        Ok(())
    }
}

impl Validate for InboxMessageDraft {
    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_email("email", &self.email)?;
        require_text("message", &self.message)?;

        if self.kind == MessageKind::TestDrive {
            require_text("phone", self.phone.as_deref().unwrap_or_default())?;
            require_text("carName", self.car_name.as_deref().unwrap_or_default())?;
            if self.booking_date.is_none() {
                return Err(RenovaError::invalid("bookingDate", "required for a test drive").into());
            }
        }
        Ok(())
    }
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_email("email", &self.email)
    }
}
