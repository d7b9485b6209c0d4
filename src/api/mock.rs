use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::query::{filter_and_sort, paginate};
use crate::api::traits::PropertySource;
use crate::api::types::{FilterParams, PagedResult};
use crate::models::{Property, PropertyImage, PropertyStatus, PropertyType};

/// In-memory listing source computing the same filter/sort/paginate result
/// over a fixed fixture set. Useful for development without the API and for
/// exercising callers; its `PagedResult` shape matches the remote source.
pub struct MockListings {
    properties: Vec<Property>,
}

impl MockListings {
    pub fn new() -> Self {
        Self {
            properties: fixture_properties(),
        }
    }

    /// Source backed by an arbitrary collection instead of the built-in
    /// fixtures.
    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// A handful of listings for a highlight strip: the first three fixtures.
    pub fn featured(&self) -> Vec<Property> {
        self.properties.iter().take(3).cloned().collect()
    }

    /// Distinct locations across the fixture set, in first-seen order.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for p in &self.properties {
            if !seen.contains(&p.location) {
                seen.push(p.location.clone());
            }
        }
        seen
    }
}

impl Default for MockListings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertySource for MockListings {
    async fn fetch_properties(
        &self,
        filters: &FilterParams,
    ) -> Result<PagedResult<Property>, ApiError> {
        let matched = filter_and_sort(&self.properties, filters);
        info!(
            "Mock source matched {} of {} listings",
            matched.len(),
            self.properties.len()
        );
        Ok(paginate(matched, filters.page, filters.limit))
    }

    async fn fetch_property(&self, id: &str) -> Result<Property, ApiError> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

fn image(id: &str, url: &str, alt: &str, is_primary: bool) -> PropertyImage {
    PropertyImage {
        id: id.to_string(),
        url: url.to_string(),
        alt: Some(alt.to_string()),
        is_primary,
    }
}

fn day(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Fixture listings used when no API is configured
fn fixture_properties() -> Vec<Property> {
    vec![
        Property {
            id: "1".to_string(),
            title: "Modern Downtown Apartment".to_string(),
            description: "Beautiful 2-bedroom apartment in the heart of downtown with stunning city views."
                .to_string(),
            price: 350_000,
            location: "Downtown".to_string(),
            address: Some("123 Main Street, Downtown".to_string()),
            bedrooms: 2,
            bathrooms: 2,
            area: 95.0,
            property_type: PropertyType::Apartment,
            status: PropertyStatus::Available,
            features: vec![
                "City View".to_string(),
                "Gym".to_string(),
                "Parking".to_string(),
                "Balcony".to_string(),
            ],
            images: vec![
                image("1-1", "https://images.unsplash.com/photo-1567496898669?w=800", "Living room", true),
                image("1-2", "https://images.unsplash.com/photo-1560448204?w=800", "Kitchen", false),
            ],
            created_at: day(2024, 1, 15),
            updated_at: day(2024, 1, 15),
        },
        Property {
            id: "2".to_string(),
            title: "Spacious Family House".to_string(),
            description: "Perfect family home with 4 bedrooms, large backyard, and excellent schools nearby."
                .to_string(),
            price: 650_000,
            location: "Suburbs".to_string(),
            address: Some("456 Oak Avenue, Westside".to_string()),
            bedrooms: 4,
            bathrooms: 3,
            area: 250.0,
            property_type: PropertyType::House,
            status: PropertyStatus::Available,
            features: vec![
                "Garden".to_string(),
                "Garage".to_string(),
                "Fireplace".to_string(),
                "Home Office".to_string(),
            ],
            images: vec![image(
                "2-1",
                "https://images.unsplash.com/photo-1568605114967?w=800",
                "House exterior",
                true,
            )],
            created_at: day(2024, 1, 20),
            updated_at: day(2024, 1, 20),
        },
        Property {
            id: "3".to_string(),
            title: "Luxury Beachfront Villa".to_string(),
            description: "Exclusive villa with private beach access, infinity pool, and ocean views."
                .to_string(),
            price: 2_500_000,
            location: "Beachfront".to_string(),
            address: Some("789 Coastal Highway".to_string()),
            bedrooms: 5,
            bathrooms: 4,
            area: 450.0,
            property_type: PropertyType::Villa,
            status: PropertyStatus::Available,
            features: vec![
                "Ocean View".to_string(),
                "Private Beach".to_string(),
                "Infinity Pool".to_string(),
                "Smart Home".to_string(),
            ],
            images: vec![image(
                "3-1",
                "https://images.unsplash.com/photo-1512917774080?w=800",
                "Villa exterior",
                true,
            )],
            created_at: day(2024, 2, 1),
            updated_at: day(2024, 2, 1),
        },
        Property {
            id: "4".to_string(),
            title: "Cozy Studio Apartment".to_string(),
            description: "Efficient studio perfect for students, close to public transportation."
                .to_string(),
            price: 150_000,
            location: "City Center".to_string(),
            address: Some("321 University Blvd".to_string()),
            bedrooms: 1,
            bathrooms: 1,
            area: 45.0,
            property_type: PropertyType::Studio,
            status: PropertyStatus::Available,
            features: vec!["Furnished".to_string(), "Laundry".to_string()],
            images: vec![image(
                "4-1",
                "https://images.unsplash.com/photo-1522708323590?w=800",
                "Studio interior",
                true,
            )],
            created_at: day(2024, 2, 10),
            updated_at: day(2024, 2, 10),
        },
        Property {
            id: "5".to_string(),
            title: "Modern Townhouse".to_string(),
            description: "Contemporary 3-story townhouse with rooftop terrace and garage."
                .to_string(),
            price: 480_000,
            location: "Midtown".to_string(),
            address: Some("555 Modern Lane".to_string()),
            bedrooms: 3,
            bathrooms: 2,
            area: 180.0,
            property_type: PropertyType::Townhouse,
            status: PropertyStatus::Available,
            features: vec![
                "Rooftop Terrace".to_string(),
                "Garage".to_string(),
                "Energy Efficient".to_string(),
            ],
            images: vec![image(
                "5-1",
                "https://images.unsplash.com/photo-1580587771525?w=800",
                "Townhouse exterior",
                true,
            )],
            created_at: day(2024, 2, 15),
            updated_at: day(2024, 2, 15),
        },
        Property {
            id: "6".to_string(),
            title: "Penthouse with City Views".to_string(),
            description: "Luxurious penthouse on the 30th floor with panoramic city views and private elevator."
                .to_string(),
            price: 1_800_000,
            location: "Downtown".to_string(),
            address: Some("999 Skyline Tower".to_string()),
            bedrooms: 3,
            bathrooms: 3,
            area: 280.0,
            property_type: PropertyType::Penthouse,
            status: PropertyStatus::Available,
            features: vec![
                "Panoramic Views".to_string(),
                "Private Elevator".to_string(),
                "Concierge Service".to_string(),
            ],
            images: vec![image(
                "6-1",
                "https://images.unsplash.com/photo-1600607687939?w=800",
                "Penthouse living room",
                true,
            )],
            created_at: day(2024, 3, 1),
            updated_at: day(2024, 3, 1),
        },
    ]
}
