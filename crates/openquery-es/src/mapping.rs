//! Mapping-lookup collaborator
//!
//! The execution client is a large surface; this crate needs exactly one
//! capability from it: report the engine-side type of a field within an
//! index. [`MappingLookup`] models that capability so the sortability check
//! can be tested without a cluster. Implementations should restrict
//! themselves to a local (non-cluster-wide) mapping read for latency;
//! timeout behavior is the implementation's own contract.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Failures while consulting the engine's field mappings.
///
/// These are infrastructure faults, not caller errors; they never surface to
/// callers as a distinct kind. The sortability check recovers by failing
/// closed.
#[derive(Debug, Clone, Error)]
pub enum MappingError {
    /// Network or client transport failure.
    #[error("mapping transport error: {0}")]
    Transport(String),

    /// The index reported no mapping for the field.
    #[error("no mapping for field {field} in index {index}")]
    MissingField {
        /// Index that was consulted.
        index: String,
        /// Field that had no mapping.
        field: String,
    },

    /// The mapping response could not be interpreted.
    #[error("malformed mapping response: {0}")]
    Malformed(String),
}

/// Field-mapping metadata source.
///
/// The only suspension point in query construction; callers must not assume
/// synchronous completion.
#[async_trait]
pub trait MappingLookup: Send + Sync {
    /// The engine-reported type string of `field` within `index` (first
    /// reported mapping wins).
    async fn field_type(&self, index: &str, field: &str) -> Result<String, MappingError>;
}

/// Fixed-table [`MappingLookup`] for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticMappingLookup {
    types: HashMap<(String, String), String>,
}

impl StaticMappingLookup {
    /// Empty table; every lookup reports a missing field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field type for `(index, field)`.
    #[must_use]
    pub fn with_field(
        mut self,
        index: impl Into<String>,
        field: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        self.types
            .insert((index.into(), field.into()), field_type.into());
        self
    }
}

#[async_trait]
impl MappingLookup for StaticMappingLookup {
    async fn field_type(&self, index: &str, field: &str) -> Result<String, MappingError> {
        self.types
            .get(&(index.to_owned(), field.to_owned()))
            .cloned()
            .ok_or_else(|| MappingError::MissingField {
                index: index.to_owned(),
                field: field.to_owned(),
            })
    }
}
