//! Measurement type - a value with a unit code and its category

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::convert::convert;
use crate::format::{format_with_unit, DEFAULT_DECIMALS};
use crate::{ConversionError, ConversionOptions, UnitCategory};

/// A value with the unit it is expressed in.
///
/// The unit code only has meaning within `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
    pub category: UnitCategory,
}

impl Measurement {
    pub fn new(value: f64, unit: &str, category: UnitCategory) -> Self {
        Measurement { value, unit: unit.to_string(), category }
    }

    /// A value already in the category's storage unit
    pub fn storage(value: f64, category: UnitCategory) -> Self {
        Measurement::new(value, category.storage_unit(), category)
    }

    pub fn is_storage_unit(&self) -> bool {
        self.unit == self.category.storage_unit()
    }

    /// Convert to another unit of the same category
    pub fn convert_to(&self, unit: &str, options: &ConversionOptions) -> Result<Measurement, ConversionError> {
        let value = convert(self.value, &self.unit, unit, self.category, options)?;
        Ok(Measurement::new(value, unit, self.category))
    }

    /// Convert to the category's storage unit
    pub fn in_storage_units(&self, options: &ConversionOptions) -> Result<Measurement, ConversionError> {
        self.convert_to(self.category.storage_unit(), options)
    }

    /// Add another measurement of the same category, keeping this unit
    pub fn add(&self, other: &Measurement, options: &ConversionOptions) -> Result<Measurement, ConversionError> {
        if other.category != self.category {
            return Err(ConversionError::unsupported(self.category, &other.unit, &self.unit));
        }
        let converted = other.convert_to(&self.unit, options)?;
        Ok(Measurement::new(self.value + converted.value, &self.unit, self.category))
    }

    /// `"<value> <symbol>"`, or the placeholder for NaN
    pub fn format(&self, decimals: usize) -> String {
        format_with_unit(Some(self.value), &self.unit, decimals)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(DEFAULT_DECIMALS))
    }
}
