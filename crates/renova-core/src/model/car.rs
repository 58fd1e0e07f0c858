use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{id_from_string_or_number, Collection, Entity, SortOrder};

/// Stock condition of a listed car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarCondition {
    /// New
    Baru,
    /// Used
    Bekas,
}

/// A vehicle listed in the showroom catalog
///
/// Prices are whole rupiah, mileage is kilometres. `created_at` is assigned
/// by the store and orders the catalog newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: u64,
    pub year: u16,
    pub engine: String,
    pub transmission: String,
    pub image: String,
    pub description: String,
    pub is_featured: bool,
    pub mileage: u64,
    pub fuel_type: String,
    pub body_type: String,
    pub color: String,
    pub interior_color: String,
    /// Free text, e.g. "Mei 2025"
    pub tax_date: String,
    pub previous_owners: u32,
    pub service_history: String,
    pub condition: CarCondition,
    pub location: String,
    pub seats: u8,
    pub plate_number: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Create input for [`Car`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDraft {
    pub name: String,
    pub brand: String,
    pub price: u64,
    pub year: u16,
    pub engine: String,
    pub transmission: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub is_featured: bool,
    pub mileage: u64,
    pub fuel_type: String,
    pub body_type: String,
    pub color: String,
    pub interior_color: String,
    pub tax_date: String,
    pub previous_owners: u32,
    pub service_history: String,
    pub condition: CarCondition,
    pub location: String,
    pub seats: u8,
    pub plate_number: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// Partial update for [`Car`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_owners: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<CarCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
}

impl From<Car> for CarDraft {
    fn from(car: Car) -> Self {
        Self {
            name: car.name,
            brand: car.brand,
            price: car.price,
            year: car.year,
            engine: car.engine,
            transmission: car.transmission,
            image: car.image,
            description: car.description,
            is_featured: car.is_featured,
            mileage: car.mileage,
            fuel_type: car.fuel_type,
            body_type: car.body_type,
            color: car.color,
            interior_color: car.interior_color,
            tax_date: car.tax_date,
            previous_owners: car.previous_owners,
            service_history: car.service_history,
            condition: car.condition,
            location: car.location,
            seats: car.seats,
            plate_number: car.plate_number,
            gallery: car.gallery,
        }
    }
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self == &CarPatch::default()
    }
}

impl Entity for Car {
    type Draft = CarDraft;
    type Patch = CarPatch;

    const COLLECTION: Collection = Collection::Cars;
    const SORT: SortOrder = SortOrder::Descending("created_at");

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: CarDraft) -> Self {
        Self {
            id,
            name: draft.name,
            brand: draft.brand,
            price: draft.price,
            year: draft.year,
            engine: draft.engine,
            transmission: draft.transmission,
            image: draft.image,
            description: draft.description,
            is_featured: draft.is_featured,
            mileage: draft.mileage,
            fuel_type: draft.fuel_type,
            body_type: draft.body_type,
            color: draft.color,
            interior_color: draft.interior_color,
            tax_date: draft.tax_date,
            previous_owners: draft.previous_owners,
            service_history: draft.service_history,
            condition: draft.condition,
            location: draft.location,
            seats: draft.seats,
            plate_number: draft.plate_number,
            gallery: draft.gallery,
            created_at,
        }
    }

    fn apply_patch(&mut self, patch: CarPatch) {
        merge_fields!(
            self,
            patch,
            [
                name,
                brand,
                price,
                year,
                engine,
                transmission,
                image,
                description,
                is_featured,
                mileage,
                fuel_type,
                body_type,
                color,
                interior_color,
                tax_date,
                previous_owners,
                service_history,
                condition,
                location,
                seats,
                plate_number,
                gallery,
            ]
        );
    }

    fn sort_key(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn seed_data() -> Vec<Self> {
        crate::defaults::cars()
    }
}
