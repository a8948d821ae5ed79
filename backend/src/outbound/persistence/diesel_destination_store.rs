//! PostgreSQL-backed destination catalogue.
//!
//! Every call acquires the shared pool from the [`ConnectionManager`]. When
//! the manager reports the store as unavailable the call fails with
//! [`StoreError::Connection`] so a fallback decorator can take over.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{DestinationStore, StoreError};
use crate::domain::{Destination, NewDestination};

use super::connection::{ConnectionManager, Connector, DieselConnector};
use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DestinationRow, NewDestinationRow};
use super::pool::DbPool;
use super::schema::destinations;

/// Diesel-backed implementation of [`DestinationStore`].
///
/// Creation timestamps come from the injected clock, as they do for the
/// in-memory store.
pub struct DieselDestinationStore<C: Connector<Handle = DbPool> = DieselConnector> {
    connections: ConnectionManager<C>,
    clock: Arc<dyn Clock>,
}

impl<C: Connector<Handle = DbPool>> Clone for DieselDestinationStore<C> {
    fn clone(&self) -> Self {
        Self {
            connections: self.connections.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: Connector<Handle = DbPool>> DieselDestinationStore<C> {
    /// Create a store drawing connections from `connections` and stamping
    /// new rows with `clock`.
    pub fn new(connections: ConnectionManager<C>, clock: Arc<dyn Clock>) -> Self {
        Self { connections, clock }
    }

    fn insert_row<'a>(&self, destination: &'a NewDestination) -> NewDestinationRow<'a> {
        NewDestinationRow::from_draft(Uuid::new_v4(), destination, self.clock.utc())
    }

    async fn pool(&self) -> Result<DbPool, StoreError> {
        self.connections
            .acquire()
            .await
            .ok_or_else(|| StoreError::connection("relational store unavailable"))
    }
}

fn into_destinations(rows: Vec<DestinationRow>) -> Vec<Destination> {
    rows.into_iter().map(Destination::from).collect()
}

#[async_trait]
impl<C: Connector<Handle = DbPool>> DestinationStore for DieselDestinationStore<C> {
    async fn all_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        let pool = self.pool().await?;
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        let rows = destinations::table
            .select(DestinationRow::as_select())
            .load::<DestinationRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list destinations"))?;
        Ok(into_destinations(rows))
    }

    async fn featured_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        let pool = self.pool().await?;
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        let rows = destinations::table
            .filter(destinations::featured.eq(true))
            .select(DestinationRow::as_select())
            .load::<DestinationRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list featured destinations"))?;
        Ok(into_destinations(rows))
    }

    async fn find_destination(&self, id: Uuid) -> Result<Option<Destination>, StoreError> {
        let pool = self.pool().await?;
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        let row = destinations::table
            .find(id)
            .select(DestinationRow::as_select())
            .first::<DestinationRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find destination"))?;
        Ok(row.map(Destination::from))
    }

    async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>, StoreError> {
        let pattern = format!("%{}%", escape_like(query));
        let pool = self.pool().await?;
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        let rows = destinations::table
            .filter(
                destinations::name
                    .ilike(pattern.clone())
                    .or(destinations::description.ilike(pattern.clone()))
                    .or(destinations::state.ilike(pattern)),
            )
            .select(DestinationRow::as_select())
            .load::<DestinationRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "search destinations"))?;
        Ok(into_destinations(rows))
    }

    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<Destination, StoreError> {
        let pool = self.pool().await?;
        let mut conn = pool.get().await.map_err(map_pool_error)?;
        let row = self.insert_row(destination);
        let stored = diesel::insert_into(destinations::table)
            .values(&row)
            .returning(DestinationRow::as_returning())
            .get_result::<DestinationRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "create destination"))?;
        Ok(stored.into())
    }
}

/// Escape `ILIKE` wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
