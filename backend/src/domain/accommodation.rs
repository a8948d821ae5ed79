//! Places to stay near a destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::contains_folded;
use super::transport::DEFAULT_CURRENCY;

/// A hotel, homestay or similar listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: Uuid,
    pub name: String,
    /// Free-form listing category such as `hotel` or `homestay`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub price_per_night: Option<i32>,
    pub currency: String,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub booking_url: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl Accommodation {
    /// Build a stored listing from a creation payload, applying defaults.
    pub fn from_new(id: Uuid, draft: &NewAccommodation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            kind: draft.kind.clone(),
            location: draft.location.clone(),
            description: draft.description.clone(),
            rating: draft.rating.clone(),
            price_per_night: draft.price_per_night,
            currency: draft
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            amenities: draft.amenities.clone(),
            image_urls: draft.image_urls.clone(),
            booking_url: draft.booking_url.clone(),
            latitude: draft.latitude.clone(),
            longitude: draft.longitude.clone(),
            availability: draft.availability.unwrap_or(true),
            created_at,
        }
    }

    /// Location contains the folded search term.
    pub fn is_in(&self, location: &str) -> bool {
        contains_folded(&self.location, location)
    }
}

/// Creation payload for [`Accommodation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccommodation {
    pub name: String,
    pub location: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub price_per_night: Option<i32>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub availability: Option<bool>,
}

impl NewAccommodation {
    /// Start a payload with only the required fields set.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }
}
