use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::error::ApiError;
use crate::api::traits::PropertySource;
use crate::api::types::{FilterParams, PagedResult};
use crate::models::{Property, PropertyImage, PropertyStatus, PropertyType};

const DEFAULT_CITY: &str = "Santiago";

/// Listing source backed by the remote listings API
pub struct RemoteListings {
    client: Client,
    base_url: String,
    /// The API requires at least one location parameter on every search.
    city: String,
}

impl RemoteListings {
    /// Create a remote source against the given base URL, searching the
    /// default city.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_city(base_url, DEFAULT_CITY)
    }

    /// Create a remote source scoped to a specific city.
    pub fn with_city(base_url: impl Into<String>, city: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            city: city.into(),
        })
    }
}

#[async_trait]
impl PropertySource for RemoteListings {
    async fn fetch_properties(
        &self,
        filters: &FilterParams,
    ) -> Result<PagedResult<Property>, ApiError> {
        let url = format!("{}/properties", self.base_url);
        debug!("Fetching listings from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("city", self.city.as_str())])
            .query(filters)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ListingsEnvelope = response.json().await?;

        if envelope.status != "success" {
            warn!("Listings API returned status '{}'", envelope.status);
            return Err(ApiError::InvalidResponse(format!(
                "unexpected status '{}'",
                envelope.status
            )));
        }
        let raw = envelope
            .data
            .and_then(|d| d.properties)
            .ok_or_else(|| ApiError::InvalidResponse("missing properties list".to_string()))?;

        info!("Fetched {} listings from API", raw.len());

        let properties: Vec<Property> = raw.into_iter().map(normalize).collect();

        // The API does not page its results; report everything as one page.
        let total = properties.len();
        Ok(PagedResult {
            data: properties,
            total,
            page: 1,
            total_pages: 1,
            has_next: false,
            has_prev: false,
        })
    }

    async fn fetch_property(&self, id: &str) -> Result<Property, ApiError> {
        let url = format!("{}/properties/{}", self.base_url, id);
        debug!("Fetching listing {} from {}", id, url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.to_string()));
        }
        let response = response.error_for_status()?;

        let raw: RawListing = response.json().await?;
        Ok(normalize(raw))
    }

    fn source_name(&self) -> &'static str {
        "remote"
    }
}

/// Response envelope the listings API wraps every search in
#[derive(Debug, Deserialize)]
struct ListingsEnvelope {
    status: String,
    data: Option<EnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    properties: Option<Vec<RawListing>>,
}

/// Raw listing record as the API sends it. Most fields are optional on the
/// wire; normalization fills the gaps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListing {
    id: RawId,
    title: String,
    description: Option<String>,
    price: f64,
    location: Option<String>,
    bedrooms: Option<u32>,
    bathrooms: Option<u32>,
    size: Option<f64>,
    property_type: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    created_at: Option<DateTime<Utc>>,
}

/// Listing identifiers arrive as either strings or numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Normalize a raw API record into the client-side `Property` shape:
/// zero-default the counts, synthesize a description when the API omits one,
/// keep the first comma segment of the location as the display location, and
/// promote the first image URL to primary.
fn normalize(raw: RawListing) -> Property {
    let id = raw.id.into_string();
    let bedrooms = raw.bedrooms.unwrap_or(0);
    let bathrooms = raw.bathrooms.unwrap_or(0);
    let area = raw.size.unwrap_or(0.0);

    let description = raw
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("{bedrooms} bedrooms • {bathrooms} bathrooms • {area} m²"));

    let address = raw.location.clone();
    let location = raw
        .location
        .as_deref()
        .and_then(|l| l.split(',').next())
        .unwrap_or("")
        .trim()
        .to_string();

    let images = raw
        .images
        .into_iter()
        .enumerate()
        .map(|(index, url)| PropertyImage {
            id: format!("{id}-{index}"),
            url,
            alt: None,
            is_primary: index == 0,
        })
        .collect();

    let created_at = raw.created_at.unwrap_or_else(Utc::now);

    Property {
        id,
        title: raw.title,
        description,
        price: raw.price.round() as i64,
        location,
        address,
        bedrooms,
        bathrooms,
        area,
        property_type: PropertyType::parse_or_default(raw.property_type.as_deref()),
        status: PropertyStatus::Available,
        features: vec![],
        images,
        created_at,
        updated_at: created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_normalizes_the_search_envelope() {
        let body = r#"{
            "status": "success",
            "data": {
                "properties": [
                    {
                        "id": 17,
                        "title": "Depto luminoso",
                        "price": 185000.0,
                        "location": "Providencia, Santiago",
                        "propertyType": "Departamento",
                        "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"],
                        "createdAt": "2024-03-01T12:00:00Z"
                    }
                ]
            }
        }"#;

        let envelope: ListingsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.status, "success");
        let raw = envelope.data.unwrap().properties.unwrap();
        let property = normalize(raw.into_iter().next().unwrap());

        assert_eq!(property.id, "17");
        assert_eq!(property.price, 185_000);
        assert_eq!(property.location, "Providencia");
        assert_eq!(property.address.as_deref(), Some("Providencia, Santiago"));
        assert_eq!(property.property_type, PropertyType::Departamento);
        assert_eq!(property.status, PropertyStatus::Available);

        // Missing counts default to zero and feed the synthetic description
        assert_eq!(property.bedrooms, 0);
        assert_eq!(property.bathrooms, 0);
        assert_eq!(property.description, "0 bedrooms • 0 bathrooms • 0 m²");

        // First bare URL becomes the primary image
        assert_eq!(property.images.len(), 2);
        assert!(property.images[0].is_primary);
        assert!(!property.images[1].is_primary);
        assert_eq!(property.images[0].id, "17-0");
        assert_eq!(property.primary_image().unwrap().url, "https://img.example/a.jpg");
    }

    #[test]
    fn keeps_a_provided_description_and_unknown_types_fall_back() {
        let raw = RawListing {
            id: RawId::Text("abc".to_string()),
            title: "Casa quinta".to_string(),
            description: Some("Amplia casa con jardín".to_string()),
            price: 320_000.0,
            location: None,
            bedrooms: Some(3),
            bathrooms: Some(2),
            size: Some(140.0),
            property_type: Some("chalet".to_string()),
            images: vec![],
            created_at: None,
        };

        let property = normalize(raw);
        assert_eq!(property.description, "Amplia casa con jardín");
        assert_eq!(property.property_type, PropertyType::Apartment);
        assert_eq!(property.location, "");
        assert!(property.images.is_empty());
        assert!(property.primary_image().is_none());
    }

    #[test]
    fn missing_properties_list_is_an_invalid_response() {
        let body = r#"{ "status": "success" }"#;
        let envelope: ListingsEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_none());

        let body = r#"{ "status": "error", "data": null }"#;
        let envelope: ListingsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.status, "error");
    }
}
