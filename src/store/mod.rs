//! Remote store interface.
//!
//! The store is an external table service with insert, upsert (keyed by a
//! conflict column set) and filtered update. Each call is atomic on the
//! store side; nothing here retries.

pub mod rest;

pub use rest::RestStore;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Equality filter selecting the rows an update applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    /// Match rows where `column` equals `value`.
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Trait for table stores.
///
/// Implemented by [`RestStore`]. Methods are generic over the row type, so
/// the trait is used statically rather than boxed.
pub trait Store: Send + Sync {
    /// Insert one row, returning the stored row (with generated columns).
    ///
    /// `Ok(None)` means the store accepted the call but returned no row.
    fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        record: &T,
    ) -> impl std::future::Future<Output = Result<Option<Value>>> + Send;

    /// Insert or overwrite rows, resolving conflicts on `on_conflict`
    /// (a comma-separated column list).
    fn upsert<T: Serialize + Sync>(
        &self,
        table: &str,
        records: &[T],
        on_conflict: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Apply `patch` to every row matching `filter`.
    fn update<T: Serialize + Sync>(
        &self,
        table: &str,
        patch: &T,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
