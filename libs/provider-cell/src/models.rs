use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub specialty_type: SpecialtyType,
    pub rating: f32,
    pub reviews: i32,
    pub experience_years: i32,
    pub location: String,
    /// Whole currency units per session, matching the marketing price tag.
    pub price: i64,
    pub bio: String,
    pub languages: Vec<String>,
    pub education: String,
    pub availability_days: Vec<String>,
    /// Bookable start times keyed by calendar date.
    pub time_slots: HashMap<NaiveDate, Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecialtyType {
    Psychologist,
    Psychiatrist,
    Therapist,
}

impl fmt::Display for SpecialtyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialtyType::Psychologist => write!(f, "psychologist"),
            SpecialtyType::Psychiatrist => write!(f, "psychiatrist"),
            SpecialtyType::Therapist => write!(f, "therapist"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSearchQuery {
    /// Free-text match against name and specialty label.
    pub search: Option<String>,
    pub specialty: Option<SpecialtyType>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f32>,
    pub sort_by: Option<ProviderSortBy>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderSortBy {
    Rating,
    PriceLow,
    PriceHigh,
    Experience,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not found")]
    NotFound,
}
