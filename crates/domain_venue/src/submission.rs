//! Venue submission draft and the listing it becomes

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use core_kernel::SubmissionId;

use crate::error::VenueError;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "23:00";
pub const DEFAULT_MINIMUM_HOURS: &str = "4";

/// How the base price is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    #[default]
    Hourly,
    Daily,
    Flat,
}

impl PricingModel {
    /// Label shown next to the price, e.g. "$150 per hour"
    pub fn unit_label(&self) -> &'static str {
        match self {
            PricingModel::Hourly => "per hour",
            PricingModel::Daily => "per day",
            PricingModel::Flat => "flat rate",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingModel::Hourly => write!(f, "hourly"),
            PricingModel::Daily => write!(f, "daily"),
            PricingModel::Flat => write!(f, "flat"),
        }
    }
}

/// A venue listing as it is being filled in
///
/// Text fields hold what the owner typed; numbers and times are only parsed
/// when the draft is turned into a [`VenueListing`]. Numeric inputs accept a
/// JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VenueSubmission {
    // Basic info
    pub venue_name: String,
    pub venue_type: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub website: String,

    // Location
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    // Features
    #[serde(deserialize_with = "text_or_number")]
    pub capacity: String,
    #[serde(deserialize_with = "text_or_number")]
    pub square_footage: String,
    pub amenities: Vec<String>,
    pub accessibility: Vec<String>,

    // Availability and pricing
    pub available_days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(deserialize_with = "text_or_number")]
    pub base_price: String,
    pub pricing_model: PricingModel,
    #[serde(deserialize_with = "text_or_number")]
    pub minimum_hours: String,

    // Media
    pub photos: Vec<String>,
    pub floor_plan: Option<String>,
    pub documents: Vec<String>,

    // Agreements
    pub terms_agreed: bool,
    pub listing_agreed: bool,
}

impl Default for VenueSubmission {
    fn default() -> Self {
        Self {
            venue_name: String::new(),
            venue_type: String::new(),
            description: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            capacity: String::new(),
            square_footage: String::new(),
            amenities: Vec::new(),
            accessibility: Vec::new(),
            available_days: Vec::new(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            base_price: String::new(),
            pricing_model: PricingModel::Hourly,
            minimum_hours: DEFAULT_MINIMUM_HOURS.to_string(),
            photos: Vec::new(),
            floor_plan: None,
            documents: Vec::new(),
            terms_agreed: false,
            listing_agreed: false,
        }
    }
}

impl VenueSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `value` in a checkbox group such as amenities or days
    pub fn toggle(list: &mut Vec<String>, value: &str, checked: bool) {
        let present = list.iter().any(|v| v == value);
        if checked && !present {
            list.push(value.to_string());
        } else if !checked {
            list.retain(|v| v != value);
        }
    }

    /// Parses the draft into a typed listing
    pub fn to_listing(&self, submitted_at: DateTime<Utc>) -> Result<VenueListing, VenueError> {
        Ok(VenueListing {
            id: SubmissionId::new(),
            venue_name: self.venue_name.trim().to_string(),
            venue_type: self.venue_type.trim().to_string(),
            description: self.description.trim().to_string(),
            phone: optional(&self.phone),
            email: self.email.trim().to_string(),
            website: optional(&self.website),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
            capacity: parse_count("capacity", &self.capacity)?,
            square_footage: parse_count("squareFootage", &self.square_footage)?,
            amenities: self.amenities.clone(),
            accessibility: self.accessibility.clone(),
            available_days: self.available_days.clone(),
            opens_at: parse_time("startTime", &self.start_time)?,
            closes_at: parse_time("endTime", &self.end_time)?,
            base_price: parse_price(&self.base_price)?,
            pricing_model: self.pricing_model,
            minimum_hours: parse_count("minimumHours", &self.minimum_hours)?,
            photos: self.photos.clone(),
            floor_plan: self.floor_plan.clone(),
            documents: self.documents.clone(),
            submitted_at,
        })
    }
}

/// A submitted venue with parsed values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueListing {
    pub id: SubmissionId,
    pub venue_name: String,
    pub venue_type: String,
    pub description: String,
    pub phone: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub capacity: u32,
    pub square_footage: u32,
    pub amenities: Vec<String>,
    pub accessibility: Vec<String>,
    pub available_days: Vec<String>,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub base_price: Decimal,
    pub pricing_model: PricingModel,
    pub minimum_hours: u32,
    pub photos: Vec<String>,
    pub floor_plan: Option<String>,
    pub documents: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl VenueListing {
    /// Price as displayed on the review step, e.g. "$150 per hour"
    pub fn price_label(&self) -> String {
        format!("${} {}", self.base_price, self.pricing_model.unit_label())
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Whole(u64),
        Fractional(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Whole(n) => n.to_string(),
        Raw::Fractional(n) => n.to_string(),
    })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, VenueError> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<u32>() {
        Ok(0) => Err(VenueError::invalid_field(field, "must be greater than zero")),
        Ok(count) => Ok(count),
        Err(_) => Err(VenueError::invalid_field(
            field,
            format!("'{}' is not a whole number", value.trim()),
        )),
    }
}

fn parse_price(value: &str) -> Result<Decimal, VenueError> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let price = Decimal::from_str(&cleaned).map_err(|_| {
        VenueError::invalid_field("basePrice", format!("'{}' is not an amount", value.trim()))
    })?;
    if price <= Decimal::ZERO {
        return Err(VenueError::invalid_field("basePrice", "must be greater than zero"));
    }
    Ok(price)
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, VenueError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| VenueError::invalid_field(field, format!("'{}' is not HH:MM", value.trim())))
}
