//! Bookable transport between two locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text::contains_folded;

/// Currency assumed for prices that do not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Mode of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Scheduled air travel.
    Flight,
    /// Rail.
    Train,
    /// Coach or bus.
    Bus,
}

/// A single transport offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub provider: Option<String>,
    pub source_location: String,
    pub destination_location: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    /// Journey length in minutes.
    pub duration: Option<i32>,
    pub price: Option<i32>,
    pub currency: String,
    pub availability: bool,
    pub booking_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransportOption {
    /// Build a stored option from a creation payload, applying defaults.
    pub fn from_new(id: Uuid, draft: &NewTransportOption, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            provider: draft.provider.clone(),
            source_location: draft.source_location.clone(),
            destination_location: draft.destination_location.clone(),
            departure_time: draft.departure_time,
            arrival_time: draft.arrival_time,
            duration: draft.duration,
            price: draft.price,
            currency: draft
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            availability: draft.availability.unwrap_or(true),
            booking_url: draft.booking_url.clone(),
            created_at,
        }
    }

    /// Both endpoints contain the folded search terms.
    pub fn connects(&self, source: &str, destination: &str) -> bool {
        contains_folded(&self.source_location, source)
            && contains_folded(&self.destination_location, destination)
    }
}

/// Creation payload for [`TransportOption`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransportOption {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub source_location: String,
    pub destination_location: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub price: Option<i32>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub availability: Option<bool>,
    #[serde(default)]
    pub booking_url: Option<String>,
}

impl NewTransportOption {
    /// Start a payload with only the required fields set.
    pub fn new(
        kind: TransportKind,
        source_location: impl Into<String>,
        destination_location: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_location: source_location.into(),
            destination_location: destination_location.into(),
            provider: None,
            departure_time: None,
            arrival_time: None,
            duration: None,
            price: None,
            currency: None,
            availability: None,
            booking_url: None,
        }
    }
}
