//! Pure filter/sort/paginate computation shared by the in-memory listing
//! source. All predicates compose conjunctively: a listing survives only if
//! it satisfies every provided criterion.

use crate::api::types::{FilterParams, PagedResult, SortKey, SortOrder};
use crate::models::Property;

/// Apply every provided filter criterion, then sort by the chosen key.
/// The sort is stable, so ties keep their source order.
pub fn filter_and_sort(properties: &[Property], filters: &FilterParams) -> Vec<Property> {
    let mut matched: Vec<Property> = properties
        .iter()
        .filter(|p| matches(p, filters))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        let ordering = match filters.sort_by {
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Area => a.area.total_cmp(&b.area),
            SortKey::Date => a.created_at.cmp(&b.created_at),
        };
        match filters.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    matched
}

fn matches(property: &Property, filters: &FilterParams) -> bool {
    if let Some(term) = filters.search.as_deref() {
        if !term.is_empty() && !matches_search(property, term) {
            return false;
        }
    }
    if let Some(wanted) = filters.property_type {
        if property.property_type != wanted {
            return false;
        }
    }
    if let Some(min) = filters.min_price {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = filters.max_price {
        if property.price > max {
            return false;
        }
    }
    // Room counts are minimum thresholds, not exact matches
    if let Some(min_bedrooms) = filters.bedrooms {
        if property.bedrooms < min_bedrooms {
            return false;
        }
    }
    if let Some(min_bathrooms) = filters.bathrooms {
        if property.bathrooms < min_bathrooms {
            return false;
        }
    }
    if let Some(location) = filters.location.as_deref() {
        if !location.is_empty()
            && !property.location.to_lowercase().contains(&location.to_lowercase())
        {
            return false;
        }
    }
    true
}

/// Case-insensitive substring match against title, description, or location.
fn matches_search(property: &Property, term: &str) -> bool {
    let term = term.to_lowercase();
    property.title.to_lowercase().contains(&term)
        || property.description.to_lowercase().contains(&term)
        || property.location.to_lowercase().contains(&term)
}

/// Slice one page out of the full result set. Pages are 1-based; requesting a
/// page past the end yields an empty slice, not an error.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> PagedResult<T> {
    let page = page.max(1);
    let limit = limit.max(1) as usize;
    let total = items.len();
    let total_pages = total.div_ceil(limit) as u32;
    let start = (page as usize - 1).saturating_mul(limit);

    let data: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(limit)
        .collect();

    PagedResult {
        data,
        total,
        page,
        total_pages,
        has_next: start + limit < total,
        has_prev: page > 1,
    }
}
