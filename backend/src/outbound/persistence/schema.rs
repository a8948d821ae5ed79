//! Diesel table definitions for the PostgreSQL schema.
//!
//! The relational store only serves the destination catalogue. The table is
//! an external contract: these definitions must match it exactly. Decimal
//! values (`rating`, `latitude`, `longitude`) are stored as text so they round
//! trip without loss.

diesel::table! {
    /// Destination catalogue.
    destinations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        image_url -> Nullable<Varchar>,
        rating -> Nullable<Varchar>,
        starting_price -> Nullable<Int4>,
        state -> Nullable<Varchar>,
        /// Defaults to `India` on insert when the caller omits it.
        country -> Nullable<Varchar>,
        latitude -> Nullable<Varchar>,
        longitude -> Nullable<Varchar>,
        featured -> Nullable<Bool>,
        created_at -> Timestamptz,
    }
}
