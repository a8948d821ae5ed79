//! Error type shared by every store port.

/// Errors raised by store adapters.
///
/// The facade turns `Connection` into a service-unavailable error and
/// `Query` into an internal error; the fallback decorator treats both as a
/// reason to consult the secondary store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// A query failed during execution or row conversion.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    /// The backing store could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// A query failed against a reachable store.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Whether the failure happened before any query ran.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
