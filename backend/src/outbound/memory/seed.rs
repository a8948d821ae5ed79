//! Sample catalogue used to seed the in-memory store.

use crate::domain::NewDestination;

/// Two featured destinations shown when no relational store is available.
pub fn sample_destinations() -> [NewDestination; 2] {
    [
        NewDestination {
            description: Some("Pristine beaches and beachside fun".to_owned()),
            rating: Some("4.8".to_owned()),
            starting_price: Some(5999),
            state: Some("Goa".to_owned()),
            latitude: Some("15.2993".to_owned()),
            longitude: Some("74.1240".to_owned()),
            featured: Some(true),
            ..NewDestination::named("Goa")
        },
        NewDestination {
            description: Some("Backwaters and hill stations".to_owned()),
            rating: Some("4.9".to_owned()),
            starting_price: Some(7500),
            state: Some("Kerala".to_owned()),
            latitude: Some("10.8505".to_owned()),
            longitude: Some("76.2711".to_owned()),
            featured: Some(true),
            ..NewDestination::named("Kerala")
        },
    ]
}
