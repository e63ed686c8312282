use crate::utils::error::{RealtyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type CounterpartyId = u32;
pub type EstateId = u32;
pub type RequestId = u32;

/// Type of real estate property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealEstateType {
    Apartment,
    House,
    Office,
    Land,
    Garage,
}

impl RealEstateType {
    pub const ALL: [RealEstateType; 5] = [
        RealEstateType::Apartment,
        RealEstateType::House,
        RealEstateType::Office,
        RealEstateType::Land,
        RealEstateType::Garage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RealEstateType::Apartment => "apartment",
            RealEstateType::House => "house",
            RealEstateType::Office => "office",
            RealEstateType::Land => "land",
            RealEstateType::Garage => "garage",
        }
    }
}

impl fmt::Display for RealEstateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RealEstateType {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        RealEstateType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| RealtyError::UnknownVariant {
                kind: "real estate type".to_string(),
                value: s.to_string(),
            })
    }
}

/// Intended use of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealEstatePurpose {
    Residential,
    Commercial,
}

impl fmt::Display for RealEstatePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealEstatePurpose::Residential => f.write_str("residential"),
            RealEstatePurpose::Commercial => f.write_str("commercial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Buy,
    Sell,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Buy => f.write_str("buy"),
            RequestType::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for RequestType {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(RequestType::Buy),
            "sell" => Ok(RequestType::Sell),
            _ => Err(RealtyError::UnknownVariant {
                kind: "request type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A client of the agency, either a prospective buyer or a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    pub id: CounterpartyId,
    pub full_name: String,
    pub passport_number: String,
    pub phone: String,
}

/// A property with its physical and legal attributes.
///
/// The optional attributes depend on the kind of property: a land parcel has
/// no floors or rooms, a garage usually has no floor number. `None` means the
/// attribute does not apply, which is not the same as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstateObject {
    pub id: EstateId,
    #[serde(rename = "type")]
    pub estate_type: RealEstateType,
    pub purpose: RealEstatePurpose,
    pub cadastral_number: String,
    pub address: String,
    /// Square meters.
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    /// Meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_encumbrances: Option<bool>,
}

/// A single buy or sell intent linking one counterparty to one estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub counterparty_id: CounterpartyId,
    pub estate_id: EstateId,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub price: Decimal,
    pub date: NaiveDateTime,
}

/// Raw collections as produced by a data provider, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub counterparties: Vec<Counterparty>,
    #[serde(default)]
    pub estates: Vec<RealEstateObject>,
    #[serde(default)]
    pub requests: Vec<Request>,
}

fn invalid(entity: &str, id: u32, err: RealtyError) -> RealtyError {
    let reason = match err {
        RealtyError::InvalidConfigValueError { field, reason, .. } => format!("{}: {}", field, reason),
        other => other.to_string(),
    };
    RealtyError::InvalidEntity {
        entity: entity.to_string(),
        id,
        reason,
    }
}

impl Validate for Counterparty {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("full_name", &self.full_name)
            .map_err(|e| invalid("counterparty", self.id, e))
    }
}

impl Validate for RealEstateObject {
    fn validate(&self) -> Result<()> {
        let wrap = |e| invalid("estate", self.id, e);

        validate_non_empty_string("cadastral_number", &self.cadastral_number).map_err(wrap)?;

        if !(self.area > 0.0) {
            return Err(invalid(
                "estate",
                self.id,
                RealtyError::InvalidConfigValueError {
                    field: "area".to_string(),
                    value: self.area.to_string(),
                    reason: "Area must be greater than zero".to_string(),
                },
            ));
        }

        if let Some(height) = self.ceiling_height {
            if !(height > 0.0) {
                return Err(invalid(
                    "estate",
                    self.id,
                    RealtyError::InvalidConfigValueError {
                        field: "ceiling_height".to_string(),
                        value: height.to_string(),
                        reason: "Ceiling height must be greater than zero".to_string(),
                    },
                ));
            }
        }

        // floor numbers may be negative (basements), but never above the building
        if let (Some(floor), Some(floors)) = (self.floor, self.floors) {
            validate_range("floor", i64::from(floor), None, Some(i64::from(floors))).map_err(wrap)?;
        }

        Ok(())
    }
}

impl Validate for Request {
    fn validate(&self) -> Result<()> {
        if self.price <= Decimal::ZERO {
            return Err(RealtyError::InvalidEntity {
                entity: "request".to_string(),
                id: self.id,
                reason: format!("price must be greater than zero, got {}", self.price),
            });
        }
        Ok(())
    }
}
