//! Exact unit definitions used by the conversion tables

/// International nautical mile
pub const NAUTICAL_MILE_IN_METERS: f64 = 1852.0;
/// International statute mile
pub const STATUTE_MILE_IN_METERS: f64 = 1609.344;
/// International foot
pub const FOOT_IN_METERS: f64 = 0.3048;
/// International inch
pub const INCH_IN_MILLIMETERS: f64 = 25.4;
/// International avoirdupois pound
pub const POUND_IN_KILOGRAMS: f64 = 0.45359237;
/// US liquid gallon
pub const US_GALLON_IN_LITRES: f64 = 3.785411784;
/// Inch of mercury at 0 °C
pub const INHG_IN_HECTOPASCALS: f64 = 33.8638866667;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Degrees Fahrenheit per degree Celsius
pub const FAHRENHEIT_PER_CELSIUS: f64 = 1.8;
/// Water freezing point on the Fahrenheit scale
pub const FAHRENHEIT_FREEZING_POINT: f64 = 32.0;

// Derived factors

pub const KNOT_IN_KMH: f64 = NAUTICAL_MILE_IN_METERS / 1000.0;
pub const KNOT_IN_MPH: f64 = NAUTICAL_MILE_IN_METERS / STATUTE_MILE_IN_METERS;
pub const KNOT_IN_MPS: f64 = NAUTICAL_MILE_IN_METERS / SECONDS_PER_HOUR;
pub const MPH_IN_MPS: f64 = STATUTE_MILE_IN_METERS / SECONDS_PER_HOUR;
pub const MPS_IN_KMH: f64 = 3.6;
pub const FPM_IN_MPS: f64 = FOOT_IN_METERS / SECONDS_PER_MINUTE;
