use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Provider, ProviderError, ProviderSearchQuery, ProviderSortBy, SlotAvailability, SpecialtyType,
};

/// Booking horizon: slots further out than this many days are not selectable.
pub const BOOKING_HORIZON_DAYS: i64 = 30;

/// In-memory provider directory seeded with the marketplace roster.
/// All data is mock; there is no backing service.
pub struct ProviderDirectory {
    providers: Vec<Provider>,
}

impl ProviderDirectory {
    pub fn new() -> Self {
        Self {
            providers: seed_providers(),
        }
    }

    pub fn with_providers(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn get(&self, provider_id: Uuid) -> Result<&Provider, ProviderError> {
        self.providers
            .iter()
            .find(|p| p.id == provider_id)
            .ok_or(ProviderError::NotFound)
    }

    /// Filter and sort the roster. Free-text search matches name or specialty
    /// label case-insensitively; default sort is by rating, high first.
    pub fn search(&self, query: &ProviderSearchQuery) -> Vec<Provider> {
        let mut results: Vec<Provider> = self
            .providers
            .iter()
            .filter(|p| {
                if let Some(term) = &query.search {
                    let term = term.to_lowercase();
                    if !p.name.to_lowercase().contains(&term)
                        && !p.specialty.to_lowercase().contains(&term)
                    {
                        return false;
                    }
                }
                if let Some(specialty) = query.specialty {
                    if p.specialty_type != specialty {
                        return false;
                    }
                }
                if let Some(max_price) = query.max_price {
                    if p.price > max_price {
                        return false;
                    }
                }
                if let Some(min_rating) = query.min_rating {
                    if p.rating < min_rating {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        match query.sort_by.unwrap_or(ProviderSortBy::Rating) {
            ProviderSortBy::Rating => results.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            ProviderSortBy::PriceLow => results.sort_by_key(|p| p.price),
            ProviderSortBy::PriceHigh => results.sort_by_key(|p| std::cmp::Reverse(p.price)),
            ProviderSortBy::Experience => {
                results.sort_by_key(|p| std::cmp::Reverse(p.experience_years))
            }
        }

        debug!("Provider search returned {} results", results.len());
        results
    }

    /// Bookable time slots for a provider on a given date. Dates in the past,
    /// beyond the booking horizon, or absent from the provider's slot map
    /// yield an empty list rather than an error; an unselectable date simply
    /// offers nothing to pick.
    pub fn available_slots(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<SlotAvailability, ProviderError> {
        let provider = self.get(provider_id)?;

        let selectable = date >= today && date <= today + Duration::days(BOOKING_HORIZON_DAYS);
        let slots = if selectable {
            provider.time_slots.get(&date).cloned().unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(SlotAvailability {
            provider_id,
            date,
            slots,
        })
    }
}

impl Default for ProviderDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_map(entries: &[(&str, &[&str])]) -> HashMap<NaiveDate, Vec<String>> {
    entries
        .iter()
        .map(|(date, times)| {
            let date = date.parse().expect("seed dates are valid ISO dates");
            let times = times.iter().map(|t| t.to_string()).collect();
            (date, times)
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn seed_providers() -> Vec<Provider> {
    vec![
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. Sarah Johnson".to_string(),
            specialty: "Clinical Psychologist".to_string(),
            specialty_type: SpecialtyType::Psychologist,
            rating: 4.9,
            reviews: 127,
            experience_years: 8,
            location: "New York, NY".to_string(),
            price: 150,
            bio: "Specializes in anxiety, depression, and trauma therapy using CBT and EMDR techniques.".to_string(),
            languages: strings(&["English", "Spanish"]),
            education: "PhD in Clinical Psychology, Harvard University".to_string(),
            availability_days: strings(&["Mon", "Wed", "Fri"]),
            time_slots: slot_map(&[
                ("2024-01-15", &["09:00", "10:00", "11:00", "14:00", "15:00"]),
                ("2024-01-17", &["09:00", "10:00", "13:00", "14:00", "16:00"]),
                ("2024-01-19", &["10:00", "11:00", "14:00", "15:00", "16:00"]),
            ]),
        },
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. Michael Chen".to_string(),
            specialty: "Psychiatrist".to_string(),
            specialty_type: SpecialtyType::Psychiatrist,
            rating: 4.8,
            reviews: 89,
            experience_years: 12,
            location: "Los Angeles, CA".to_string(),
            price: 200,
            bio: "Board-certified psychiatrist specializing in mood disorders, ADHD, and medication management.".to_string(),
            languages: strings(&["English", "Mandarin"]),
            education: "MD, UCLA School of Medicine".to_string(),
            availability_days: strings(&["Tue", "Thu", "Sat"]),
            time_slots: slot_map(&[
                ("2024-01-16", &["10:00", "11:00", "15:00", "16:00"]),
                ("2024-01-18", &["09:00", "10:00", "14:00"]),
            ]),
        },
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. Emily Rodriguez".to_string(),
            specialty: "Licensed Therapist".to_string(),
            specialty_type: SpecialtyType::Therapist,
            rating: 4.7,
            reviews: 156,
            experience_years: 6,
            location: "Chicago, IL".to_string(),
            price: 120,
            bio: "Focuses on relationship counseling, family therapy, and stress management techniques.".to_string(),
            languages: strings(&["English", "Spanish"]),
            education: "MA in Marriage and Family Therapy, Northwestern University".to_string(),
            availability_days: strings(&["Mon", "Tue", "Thu"]),
            time_slots: slot_map(&[
                ("2024-01-15", &["08:00", "09:00", "13:00"]),
                ("2024-01-16", &["10:00", "11:00", "14:00", "15:00"]),
            ]),
        },
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. James Wilson".to_string(),
            specialty: "Clinical Psychologist".to_string(),
            specialty_type: SpecialtyType::Psychologist,
            rating: 4.9,
            reviews: 203,
            experience_years: 15,
            location: "Boston, MA".to_string(),
            price: 175,
            bio: "Expert in cognitive behavioral therapy, specializing in OCD, phobias, and panic disorders.".to_string(),
            languages: strings(&["English"]),
            education: "PhD in Clinical Psychology, Boston University".to_string(),
            availability_days: strings(&["Wed", "Thu", "Fri"]),
            time_slots: slot_map(&[
                ("2024-01-17", &["09:00", "11:00", "14:00", "16:00"]),
                ("2024-01-19", &["10:00", "13:00", "15:00"]),
            ]),
        },
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. Lisa Thompson".to_string(),
            specialty: "Psychiatrist".to_string(),
            specialty_type: SpecialtyType::Psychiatrist,
            rating: 4.6,
            reviews: 94,
            experience_years: 10,
            location: "Seattle, WA".to_string(),
            price: 180,
            bio: "Specializes in adolescent psychiatry, eating disorders, and dual diagnosis treatment.".to_string(),
            languages: strings(&["English"]),
            education: "MD, University of Washington School of Medicine".to_string(),
            availability_days: strings(&["Mon", "Wed", "Fri"]),
            time_slots: slot_map(&[
                ("2024-01-15", &["11:00", "13:00", "15:00"]),
                ("2024-01-17", &["09:00", "10:00", "16:00"]),
            ]),
        },
        Provider {
            id: Uuid::new_v4(),
            name: "Dr. David Kumar".to_string(),
            specialty: "Licensed Therapist".to_string(),
            specialty_type: SpecialtyType::Therapist,
            rating: 4.8,
            reviews: 112,
            experience_years: 7,
            location: "Austin, TX".to_string(),
            price: 110,
            bio: "Specializes in mindfulness-based therapy, addiction counseling, and group therapy sessions.".to_string(),
            languages: strings(&["English", "Hindi"]),
            education: "MA in Clinical Mental Health Counseling, University of Texas".to_string(),
            availability_days: strings(&["Tue", "Thu", "Sat"]),
            time_slots: slot_map(&[
                ("2024-01-16", &["08:00", "09:00", "12:00"]),
                ("2024-01-18", &["10:00", "11:00", "14:00", "15:00"]),
            ]),
        },
    ]
}
