//! Catalogue destinations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::contains_folded;

/// Country assigned to destinations created without one.
pub const DEFAULT_COUNTRY: &str = "India";

/// A place travellers can browse and plan journeys to.
///
/// `rating`, `latitude` and `longitude` are decimal strings exactly as
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<String>,
    pub starting_price: Option<i32>,
    pub state: Option<String>,
    pub country: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Destination {
    /// Build a stored destination from a creation payload, applying defaults.
    pub fn from_new(id: Uuid, draft: &NewDestination, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            rating: draft.rating.clone(),
            starting_price: draft.starting_price,
            state: draft.state.clone(),
            country: draft.country_or_default().to_owned(),
            latitude: draft.latitude.clone(),
            longitude: draft.longitude.clone(),
            featured: draft.featured.unwrap_or(false),
            created_at,
        }
    }

    /// Case-insensitive substring match across name, description and state.
    ///
    /// `needle` must already be folded with [`super::text::fold`].
    pub fn matches_search(&self, needle: &str) -> bool {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.state.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| contains_folded(field, needle))
    }
}

/// Creation payload for [`Destination`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDestination {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub starting_price: Option<i32>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl NewDestination {
    /// Start a payload with only the required name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Country to persist, falling back to [`DEFAULT_COUNTRY`].
    pub fn country_or_default(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }
}
