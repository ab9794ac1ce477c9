//! Unit definitions and conversion rules

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use alflight_core::Diagnostic;
use crate::UnitCategory;

/// A unit code registered in one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitDef {
    /// Internal code (e.g., "ltr", "kt")
    pub code: &'static str,
    /// Display symbol (e.g., "L", "kt")
    pub symbol: &'static str,
    /// Unit name (e.g., "litre")
    pub name: &'static str,
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A pure conversion from one unit to another within a category.
///
/// Rules come in exact inverse pairs: `Scale` / `InverseScale`,
/// `Affine` / `InverseAffine` and `VolumeToMass` / `MassToVolume`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Conversion {
    /// to = from * factor
    Scale(f64),
    /// to = from / factor
    InverseScale(f64),
    /// to = from * scale + offset
    Affine { scale: f64, offset: f64 },
    /// to = (from - offset) / scale
    InverseAffine { scale: f64, offset: f64 },
    /// Fuel volume to fuel mass through density (kg/L)
    VolumeToMass { litres_per_unit: f64, kg_per_unit: f64 },
    /// Fuel mass to fuel volume through density (kg/L)
    MassToVolume { kg_per_unit: f64, litres_per_unit: f64 },
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion::Scale(1.0);

    /// Apply the rule. `density` is only read by mass <-> volume rules.
    pub fn apply(&self, value: f64, density: f64) -> f64 {
        match *self {
            Conversion::Scale(factor) => value * factor,
            Conversion::InverseScale(factor) => value / factor,
            Conversion::Affine { scale, offset } => value * scale + offset,
            Conversion::InverseAffine { scale, offset } => (value - offset) / scale,
            Conversion::VolumeToMass { litres_per_unit, kg_per_unit } => {
                value * litres_per_unit * density / kg_per_unit
            }
            Conversion::MassToVolume { kg_per_unit, litres_per_unit } => {
                value * kg_per_unit / density / litres_per_unit
            }
        }
    }

    /// The exact algebraic inverse of this rule
    pub fn inverse(&self) -> Conversion {
        match *self {
            Conversion::Scale(factor) => Conversion::InverseScale(factor),
            Conversion::InverseScale(factor) => Conversion::Scale(factor),
            Conversion::Affine { scale, offset } => Conversion::InverseAffine { scale, offset },
            Conversion::InverseAffine { scale, offset } => Conversion::Affine { scale, offset },
            Conversion::VolumeToMass { litres_per_unit, kg_per_unit } => {
                Conversion::MassToVolume { kg_per_unit, litres_per_unit }
            }
            Conversion::MassToVolume { kg_per_unit, litres_per_unit } => {
                Conversion::VolumeToMass { litres_per_unit, kg_per_unit }
            }
        }
    }

    pub fn is_density_dependent(&self) -> bool {
        matches!(self, Conversion::VolumeToMass { .. } | Conversion::MassToVolume { .. })
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No rule exists for the pair in either direction
    #[error("no {category} conversion {key} ({from} -> {to})")]
    UnsupportedConversion {
        category: String,
        from: String,
        to: String,
        key: String,
    },

    /// A record property has no registered category
    #[error("unknown property for conversion: {0}")]
    UnknownProperty(String),
}

impl ConversionError {
    pub fn unsupported(category: UnitCategory, from: &str, to: &str) -> Self {
        ConversionError::UnsupportedConversion {
            category: category.name().to_string(),
            from: from.to_string(),
            to: to.to_string(),
            key: lookup_key(from, to),
        }
    }
}

impl From<&ConversionError> for Diagnostic {
    fn from(err: &ConversionError) -> Self {
        match err {
            ConversionError::UnsupportedConversion { category, from, to, .. } => {
                Diagnostic::unsupported_conversion(category, from, to)
            }
            ConversionError::UnknownProperty(property) => Diagnostic::unknown_property(property),
        }
    }
}

impl From<ConversionError> for Diagnostic {
    fn from(err: ConversionError) -> Self {
        Diagnostic::from(&err)
    }
}

/// Legacy lookup key for a pair, e.g. `nmToKm`
pub fn lookup_key(from: &str, to: &str) -> String {
    let mut chars = to.chars();
    match chars.next() {
        Some(first) => format!("{}To{}{}", from, first.to_uppercase(), chars.as_str()),
        None => format!("{}To", from),
    }
}
