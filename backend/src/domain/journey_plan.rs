//! Journey plans drafted by travellers.
//!
//! A plan belongs to exactly one user. Ownership checks happen in the routing
//! layer; storage trusts the `user_id` it is given and never lets an update
//! move a plan to another owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::UserId;

/// Traveller count assumed when a plan does not specify one.
pub const DEFAULT_TRAVELERS: i32 = 1;

/// Lifecycle of a journey plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    /// Still being edited.
    #[default]
    Draft,
    /// Itinerary settled, nothing booked.
    Planned,
    /// Bookings made.
    Booked,
    /// Trip finished.
    Completed,
}

/// Stored journey plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPlan {
    pub id: Uuid,
    pub user_id: UserId,
    pub source_location: String,
    pub destination_location: String,
    pub travel_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub travelers: i32,
    pub budget: Option<i32>,
    pub preferences: Option<Value>,
    pub status: JourneyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JourneyPlan {
    /// Build a stored plan from a creation payload, applying defaults.
    pub fn from_new(id: Uuid, draft: &NewJourneyPlan, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: draft.user_id.clone(),
            source_location: draft.source_location.clone(),
            destination_location: draft.destination_location.clone(),
            travel_date: draft.travel_date,
            return_date: draft.return_date,
            travelers: draft.travelers.unwrap_or(DEFAULT_TRAVELERS),
            budget: draft.budget,
            preferences: draft.preferences.clone(),
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `update` into this plan and stamp `updated_at`.
    ///
    /// Fields left as `None` in the update are kept as they are.
    pub fn apply(&mut self, update: JourneyPlanUpdate, now: DateTime<Utc>) {
        let JourneyPlanUpdate {
            source_location,
            destination_location,
            travel_date,
            return_date,
            travelers,
            budget,
            preferences,
            status,
        } = update;

        if let Some(value) = source_location {
            self.source_location = value;
        }
        if let Some(value) = destination_location {
            self.destination_location = value;
        }
        if travel_date.is_some() {
            self.travel_date = travel_date;
        }
        if return_date.is_some() {
            self.return_date = return_date;
        }
        if let Some(value) = travelers {
            self.travelers = value;
        }
        if budget.is_some() {
            self.budget = budget;
        }
        if preferences.is_some() {
            self.preferences = preferences;
        }
        if let Some(value) = status {
            self.status = value;
        }
        self.updated_at = now;
    }
}

/// Creation payload for [`JourneyPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJourneyPlan {
    pub user_id: UserId,
    pub source_location: String,
    pub destination_location: String,
    #[serde(default)]
    pub travel_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub travelers: Option<i32>,
    #[serde(default)]
    pub budget: Option<i32>,
    #[serde(default)]
    pub preferences: Option<Value>,
    #[serde(default)]
    pub status: Option<JourneyStatus>,
}

impl NewJourneyPlan {
    /// Start a payload with only the required fields set.
    pub fn new(
        user_id: UserId,
        source_location: impl Into<String>,
        destination_location: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            source_location: source_location.into(),
            destination_location: destination_location.into(),
            travel_date: None,
            return_date: None,
            travelers: None,
            budget: None,
            preferences: None,
            status: None,
        }
    }
}

/// Partial update for [`JourneyPlan`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyPlanUpdate {
    pub source_location: Option<String>,
    pub destination_location: Option<String>,
    pub travel_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub travelers: Option<i32>,
    pub budget: Option<i32>,
    pub preferences: Option<Value>,
    pub status: Option<JourneyStatus>,
}
