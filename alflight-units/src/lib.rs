//! ALFlight Units - Aviation unit conversion
//!
//! Converts measurements between the units a pilot picks for display and the
//! canonical storage units used at rest. Every conversion is scoped by a unit
//! category; a unit code has no meaning outside its category.
//!
//! Categories:
//! - Distance (nm, km, mi)
//! - Altitude (ft, m)
//! - Speed / wind speed (kt, km/h, mph, m/s)
//! - Vertical speed (fpm, m/s)
//! - Weight (kg, lbs)
//! - Fuel (ltr, gal, kg, lbs; mass <-> volume uses fuel density)
//! - Fuel consumption (lph, gph)
//! - Pressure (hPa, inHg, mb)
//! - Temperature (C, F; affine)
//! - Arm length (mm, cm, m, in)
//! - Visibility (km, sm, m)
//! - Runway length (m, ft)

pub mod constants;
mod category;
mod unit;
mod units;
mod fuel;
mod convert;
mod format;
mod measurement;
mod preferences;

pub use category::UnitCategory;
pub use unit::{Conversion, ConversionError, UnitDef};
pub use units::{ConversionTable, UnitRegistry, TABLES};
pub use fuel::{ConversionOptions, FuelType, DEFAULT_FUEL_DENSITY};
pub use convert::{
    convert, convert_optional, convert_value, convert_value_with, BLANK_VALUE,
};
pub use format::{
    convert_and_format, format_with_unit, get_unit_symbol, DEFAULT_DECIMALS, PLACEHOLDER,
};
pub use measurement::Measurement;
pub use preferences::UnitSet;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        convert, convert_value, format_with_unit, get_unit_symbol, ConversionError,
        ConversionOptions, FuelType, Measurement, UnitCategory, UnitSet,
    };
}
