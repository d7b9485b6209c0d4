use serde::{Deserialize, Serialize};

use crate::models::PropertyType;

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Key to sort listing results by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Date,
    Area,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Active listing query. Field names follow the listings API's query
/// parameters, so the whole struct serializes straight into a query string.
///
/// Changing any criterion other than the page number resets the page to 1;
/// the setters below encode that rule, so callers should prefer them over
/// writing fields directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    /// Minimum bedroom count, not an exact match. The UI maps its "5+"
    /// choice to a threshold of 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Minimum bathroom count, same threshold semantics as `bedrooms`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            search: None,
            property_type: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            location: None,
            sort_by: SortKey::Date,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterParams {
    pub fn set_search(&mut self, term: Option<String>) {
        self.search = term.filter(|t| !t.is_empty());
        self.page = 1;
    }

    pub fn set_type(&mut self, property_type: Option<PropertyType>) {
        self.property_type = property_type;
        self.page = 1;
    }

    pub fn set_price_range(&mut self, min: Option<i64>, max: Option<i64>) {
        self.min_price = min;
        self.max_price = max;
        self.page = 1;
    }

    pub fn set_min_bedrooms(&mut self, bedrooms: Option<u32>) {
        self.bedrooms = bedrooms;
        self.page = 1;
    }

    pub fn set_min_bathrooms(&mut self, bathrooms: Option<u32>) {
        self.bathrooms = bathrooms;
        self.page = 1;
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.location = location.filter(|l| !l.is_empty());
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_by = key;
        self.sort_order = order;
        self.page = 1;
    }

    /// Move to another page of the current query without touching the
    /// criteria.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// A bounded slice of a larger result set plus metadata for requesting
/// further slices. Both listing sources return this shape, so callers never
/// care which one they are talking to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}
