//! Shared field table
//!
//! One entry per unit-bearing aircraft field. Import, export and
//! cross-conversion all walk this table.

use alflight_units::{convert, ConversionError, ConversionOptions, UnitCategory, UnitSet};
use crate::record::AircraftRecord;

/// A unit-bearing field of [`AircraftRecord`]
pub struct FieldSpec {
    /// JSON name
    pub name: &'static str,
    pub category: UnitCategory,
    pub storage_unit: &'static str,
    pub get: fn(&AircraftRecord) -> Option<f64>,
    pub set: fn(&mut AircraftRecord, f64),
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("storage_unit", &self.storage_unit)
            .finish()
    }
}

macro_rules! field {
    ($name:literal, $field:ident, $category:ident, $storage:literal) => {
        FieldSpec {
            name: $name,
            category: UnitCategory::$category,
            storage_unit: $storage,
            get: |r| r.$field,
            set: |r, v| r.$field = Some(v),
        }
    };
}

pub static AIRCRAFT_FIELDS: [FieldSpec; 10] = [
    field!("fuelConsumption", fuel_consumption, FuelConsumption, "lph"),
    field!("fuelCapacity", fuel_capacity, Fuel, "ltr"),
    field!("cruiseSpeed", cruise_speed, Speed, "kt"),
    field!("maxSpeed", max_speed, Speed, "kt"),
    field!("climbRate", climb_rate, VerticalSpeed, "fpm"),
    field!("serviceCeiling", service_ceiling, Altitude, "ft"),
    field!("range", range, Distance, "nm"),
    field!("weight", weight, Weight, "kg"),
    field!("emptyWeight", empty_weight, Weight, "kg"),
    field!("maxTakeoffWeight", max_takeoff_weight, Weight, "kg"),
];

/// Categories whose units are stamped into export metadata
pub const NORMALIZED_CATEGORIES: [UnitCategory; 7] = [
    UnitCategory::Fuel,
    UnitCategory::FuelConsumption,
    UnitCategory::Speed,
    UnitCategory::VerticalSpeed,
    UnitCategory::Altitude,
    UnitCategory::Distance,
    UnitCategory::Weight,
];

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    AIRCRAFT_FIELDS.iter().find(|f| f.name == name)
}

pub fn category_for_property(property: &str) -> Result<UnitCategory, ConversionError> {
    field(property)
        .map(|f| f.category)
        .ok_or_else(|| ConversionError::UnknownProperty(property.to_string()))
}

pub fn storage_unit_for(property: &str) -> Result<&'static str, ConversionError> {
    field(property)
        .map(|f| f.storage_unit)
        .ok_or_else(|| ConversionError::UnknownProperty(property.to_string()))
}

pub fn fields_in(category: UnitCategory) -> impl Iterator<Item = &'static FieldSpec> {
    AIRCRAFT_FIELDS.iter().filter(move |f| f.category == category)
}

/// The units every normalized record is stamped with
pub fn storage_units() -> UnitSet {
    NORMALIZED_CATEGORIES
        .iter()
        .fold(UnitSet::new(), |set, c| set.with(*c, c.storage_unit()))
}

/// Convert a value of a named aircraft field
pub fn convert_property(
    value: f64,
    property: &str,
    from: &str,
    to: &str,
    options: &ConversionOptions,
) -> Result<f64, ConversionError> {
    let category = category_for_property(property)?;
    convert(value, from, to, category, options)
}
