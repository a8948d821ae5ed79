//! Attractions worth visiting around a destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Coordinates;
use super::text::contains_folded;
use super::transport::DEFAULT_CURRENCY;

/// A fort, beach, temple or other point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightseeingSpot {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub category: Option<String>,
    pub rating: Option<String>,
    pub entry_fee: Option<i32>,
    pub currency: String,
    pub image_urls: Vec<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub opening_hours: Option<Value>,
    pub best_time_to_visit: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SightseeingSpot {
    /// Build a stored spot from a creation payload, applying defaults.
    pub fn from_new(id: Uuid, draft: &NewSightseeingSpot, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            category: draft.category.clone(),
            rating: draft.rating.clone(),
            entry_fee: draft.entry_fee,
            currency: draft
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            image_urls: draft.image_urls.clone(),
            latitude: draft.latitude.clone(),
            longitude: draft.longitude.clone(),
            opening_hours: draft.opening_hours.clone(),
            best_time_to_visit: draft.best_time_to_visit.clone(),
            created_at,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(self.latitude.as_deref(), self.longitude.as_deref())
    }

    pub fn is_in(&self, location: &str) -> bool {
        contains_folded(&self.location, location)
    }
}

/// Creation payload for [`SightseeingSpot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSightseeingSpot {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub entry_fee: Option<i32>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<Value>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
}

impl NewSightseeingSpot {
    /// Start a payload with only the required fields set.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Attach decimal-string coordinates.
    pub fn at(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }
}
