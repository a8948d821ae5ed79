//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{DEFAULT_COUNTRY, Destination, NewDestination};

use super::schema::destinations;

/// Row struct for reading from the destinations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = destinations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DestinationRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<String>,
    pub starting_price: Option<i32>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub featured: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            rating: row.rating,
            starting_price: row.starting_price,
            state: row.state,
            country: row.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
            latitude: row.latitude,
            longitude: row.longitude,
            featured: row.featured.unwrap_or(false),
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating destination records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = destinations)]
pub(crate) struct NewDestinationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub rating: Option<&'a str>,
    pub starting_price: Option<i32>,
    pub state: Option<&'a str>,
    pub country: &'a str,
    pub latitude: Option<&'a str>,
    pub longitude: Option<&'a str>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewDestinationRow<'a> {
    /// Row for `draft` with defaults applied.
    pub fn from_draft(id: Uuid, draft: &'a NewDestination, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: &draft.name,
            description: draft.description.as_deref(),
            image_url: draft.image_url.as_deref(),
            rating: draft.rating.as_deref(),
            starting_price: draft.starting_price,
            state: draft.state.as_deref(),
            country: draft.country_or_default(),
            latitude: draft.latitude.as_deref(),
            longitude: draft.longitude.as_deref(),
            featured: draft.featured.unwrap_or(false),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row() -> DestinationRow {
        DestinationRow {
            id: Uuid::new_v4(),
            name: "Hampi".to_owned(),
            description: None,
            image_url: None,
            rating: Some("4.7".to_owned()),
            starting_price: None,
            state: Some("Karnataka".to_owned()),
            country: None,
            latitude: None,
            longitude: None,
            featured: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn null_columns_take_domain_defaults() {
        let destination = Destination::from(row());
        assert_eq!(destination.country, DEFAULT_COUNTRY);
        assert!(!destination.featured);
        assert_eq!(destination.rating.as_deref(), Some("4.7"));
    }

    #[rstest]
    fn insert_row_applies_defaults() {
        let draft = NewDestination::named("Hampi");
        let insert = NewDestinationRow::from_draft(Uuid::new_v4(), &draft, Utc::now());
        assert_eq!(insert.country, DEFAULT_COUNTRY);
        assert!(!insert.featured);
    }
}
