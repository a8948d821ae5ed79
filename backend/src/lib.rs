//! Travel planning storage core.
//!
//! `domain` holds the entities, store ports and the [`domain::StorageFacade`];
//! `outbound` holds the relational, in-memory and fallback adapters.

pub mod domain;
pub mod outbound;
