use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Studio,
    Townhouse,
    Penthouse,
    Departamento,
    Casa,
    Terreno,
}

impl PropertyType {
    /// Parse a type label coming from the listings API. Unknown or missing
    /// labels fall back to `Apartment`, matching what the API itself defaults
    /// to for untyped listings.
    pub fn parse_or_default(label: Option<&str>) -> Self {
        match label.map(|l| l.to_lowercase()).as_deref() {
            Some("apartment") => Self::Apartment,
            Some("house") => Self::House,
            Some("villa") => Self::Villa,
            Some("studio") => Self::Studio,
            Some("townhouse") => Self::Townhouse,
            Some("penthouse") => Self::Penthouse,
            Some("departamento") => Self::Departamento,
            Some("casa") => Self::Casa,
            Some("terreno") => Self::Terreno,
            _ => Self::Apartment,
        }
    }
}

/// Sale/rental status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Sold,
    Rented,
    Pending,
}

/// One image attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: String,
    pub url: String,
    pub alt: Option<String>,
    pub is_primary: bool,
}

/// Core property data model. Listings are fetched from the API and never
/// edited locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    pub address: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub features: Vec<String>,
    pub images: Vec<PropertyImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Image to display for this listing: the one flagged primary, or the
    /// first one when nothing is flagged.
    pub fn primary_image(&self) -> Option<&PropertyImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }
}
