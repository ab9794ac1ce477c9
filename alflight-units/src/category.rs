//! Unit categories
//!
//! Each category is a domain of measurement with its own set of unit codes
//! and exactly one storage unit used for at-rest persistence.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::units::TABLES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitCategory {
    Distance,
    Altitude,
    Speed,
    WindSpeed,
    VerticalSpeed,
    Weight,
    Fuel,
    FuelConsumption,
    Pressure,
    Temperature,
    ArmLength,
    Visibility,
    Runway,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 13] = [
        UnitCategory::Distance,
        UnitCategory::Altitude,
        UnitCategory::Speed,
        UnitCategory::WindSpeed,
        UnitCategory::VerticalSpeed,
        UnitCategory::Weight,
        UnitCategory::Fuel,
        UnitCategory::FuelConsumption,
        UnitCategory::Pressure,
        UnitCategory::Temperature,
        UnitCategory::ArmLength,
        UnitCategory::Visibility,
        UnitCategory::Runway,
    ];

    /// Key used in unit preference objects and `_metadata.units`
    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Distance => "distance",
            UnitCategory::Altitude => "altitude",
            UnitCategory::Speed => "speed",
            UnitCategory::WindSpeed => "windSpeed",
            UnitCategory::VerticalSpeed => "verticalSpeed",
            UnitCategory::Weight => "weight",
            UnitCategory::Fuel => "fuel",
            UnitCategory::FuelConsumption => "fuelConsumption",
            UnitCategory::Pressure => "pressure",
            UnitCategory::Temperature => "temperature",
            UnitCategory::ArmLength => "armLength",
            UnitCategory::Visibility => "visibility",
            UnitCategory::Runway => "runway",
        }
    }

    pub fn from_name(name: &str) -> Option<UnitCategory> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// The canonical at-rest unit of this category
    pub fn storage_unit(&self) -> &'static str {
        match self {
            UnitCategory::Distance => "nm",
            UnitCategory::Altitude => "ft",
            UnitCategory::Speed | UnitCategory::WindSpeed => "kt",
            UnitCategory::VerticalSpeed => "fpm",
            UnitCategory::Weight => "kg",
            UnitCategory::Fuel => "ltr",
            UnitCategory::FuelConsumption => "lph",
            UnitCategory::Pressure => "hPa",
            UnitCategory::Temperature => "C",
            UnitCategory::ArmLength => "mm",
            UnitCategory::Visibility => "km",
            UnitCategory::Runway => "m",
        }
    }

    /// Valid unit codes, storage unit first
    pub fn units(&self) -> Vec<&'static str> {
        TABLES.table(*self).codes()
    }

    /// Temperature scales share no zero point, so conversion is affine
    pub fn is_affine(&self) -> bool {
        matches!(self, UnitCategory::Temperature)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
