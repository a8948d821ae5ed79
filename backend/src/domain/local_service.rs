//! Practical services travellers need on the ground.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Coordinates;
use super::text::contains_folded;

/// Category of a [`LocalService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Atm,
    CurrencyExchange,
    Taxi,
    FoodDelivery,
    Medical,
    TouristInfo,
}

/// A cash machine, taxi rank, clinic or similar point of service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalService {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub location: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub rating: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub opening_hours: Option<Value>,
    pub service_details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl LocalService {
    /// Build a stored service from a creation payload.
    pub fn from_new(id: Uuid, draft: &NewLocalService, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            kind: draft.kind,
            location: draft.location.clone(),
            address: draft.address.clone(),
            phone_number: draft.phone_number.clone(),
            rating: draft.rating.clone(),
            latitude: draft.latitude.clone(),
            longitude: draft.longitude.clone(),
            opening_hours: draft.opening_hours.clone(),
            service_details: draft.service_details.clone(),
            created_at,
        }
    }

    /// Parsed coordinates, when both sides are present and numeric.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(self.latitude.as_deref(), self.longitude.as_deref())
    }

    /// `None` matches every kind.
    pub fn is_kind(&self, kind: Option<ServiceKind>) -> bool {
        kind.is_none_or(|wanted| wanted == self.kind)
    }

    /// Location contains the folded search term.
    pub fn is_in(&self, location: &str) -> bool {
        contains_folded(&self.location, location)
    }
}

/// Creation payload for [`LocalService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocalService {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub location: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<Value>,
    #[serde(default)]
    pub service_details: Option<Value>,
}

impl NewLocalService {
    /// Start a payload with only the required fields set.
    pub fn new(name: impl Into<String>, kind: ServiceKind, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            location: location.into(),
            address: None,
            phone_number: None,
            rating: None,
            latitude: None,
            longitude: None,
            opening_hours: None,
            service_details: None,
        }
    }

    /// Attach decimal-string coordinates.
    pub fn at(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }
}
