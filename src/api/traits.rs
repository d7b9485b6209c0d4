use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::types::{FilterParams, PagedResult};
use crate::models::Property;

/// Common trait for all listing sources (remote API, local fixtures).
/// Both must hand back the same `PagedResult` shape so callers stay
/// agnostic to where the data came from.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch one page of listings matching the given filters.
    async fn fetch_properties(
        &self,
        filters: &FilterParams,
    ) -> Result<PagedResult<Property>, ApiError>;

    /// Fetch a single listing by identifier.
    async fn fetch_property(&self, id: &str) -> Result<Property, ApiError>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
