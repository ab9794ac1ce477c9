//! Import, export and cross-conversion of aircraft records
//!
//! Records at rest hold storage units. Import converts from the units named
//! in the record's `_metadata`, export converts to the consumer's units, and
//! both re-stamp `_metadata`. Inputs are never mutated, and a field that
//! cannot be converted is left as it was with a diagnostic.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use alflight_core::{Diagnostic, Diagnostics};
use alflight_units::{convert, ConversionOptions, FuelType, UnitSet};
use crate::fields::{fields_in, storage_units, FieldSpec, AIRCRAFT_FIELDS, NORMALIZED_CATEGORIES};
use crate::lenient::parse_number;
use crate::metadata::{source_unit, unknown_unit_keys, Metadata};
use crate::record::{AircraftRecord, WeightBalance};
use crate::weight_balance::{map_legacy_arms, merge_weight_balance, normalize_compartments, resolve_cg_limits};

/// Exported values this close to an integer are written as that integer
pub const NEAR_INTEGER_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid aircraft record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

impl From<&NormalizeError> for Diagnostic {
    fn from(err: &NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidRecord(e) => Diagnostic::invalid_record(e.to_string()),
        }
    }
}

/// A transformed record with the degradations met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub aircraft: AircraftRecord,
    pub diagnostics: Diagnostics,
}

impl Normalized {
    /// No warnings; info-level diagnostics are allowed
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_warning_or_worse)
    }
}

/// Density for fuel mass <-> volume from the aircraft's own fuel type
fn options_for(record: &AircraftRecord) -> ConversionOptions {
    match record.fuel_type.as_deref().map(FuelType::from_label) {
        Some(Some(fuel_type)) => ConversionOptions::new().with_fuel_type(fuel_type),
        Some(None) => {
            debug!(fuel_type = ?record.fuel_type, "unknown fuel type, using default density");
            ConversionOptions::default()
        }
        None => ConversionOptions::default(),
    }
}

fn round_near_integer(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < NEAR_INTEGER_TOLERANCE {
        rounded
    } else {
        value
    }
}

/// Convert one field in place. Failures leave the field untouched.
fn convert_field(
    record: &mut AircraftRecord,
    field: &FieldSpec,
    from: &str,
    to: &str,
    options: &ConversionOptions,
    round: bool,
    diagnostics: &mut Diagnostics,
) {
    let Some(value) = (field.get)(record) else {
        return;
    };
    if from == to {
        return;
    }
    match convert(value, from, to, field.category, options) {
        Ok(converted) => {
            let converted = if round { round_near_integer(converted) } else { converted };
            debug!(field = field.name, value, from, to, converted, "converted field");
            (field.set)(record, converted);
        }
        Err(err) => {
            warn!(field = field.name, %err, "field left unconverted");
            diagnostics.push(Diagnostic::from(&err).on_field(field.name));
        }
    }
}

fn resolved_units(units: &UnitSet) -> UnitSet {
    NORMALIZED_CATEGORIES
        .iter()
        .fold(UnitSet::new(), |set, c| set.with(*c, units.unit_for(*c)))
}

/// Convert an imported record to storage units and reconcile W&B data
pub fn normalize_aircraft_import(record: &AircraftRecord) -> Normalized {
    normalize_aircraft_import_at(record, Utc::now())
}

pub fn normalize_aircraft_import_at(record: &AircraftRecord, now: DateTime<Utc>) -> Normalized {
    let mut aircraft = record.clone();
    let mut diagnostics = Diagnostics::new();
    let options = options_for(record);
    let source_units = record.metadata.as_ref().and_then(|m| m.units.as_ref());

    info!(registration = record.label(), has_units = source_units.is_some(), "normalizing aircraft import");

    if let Some(units) = source_units {
        for key in unknown_unit_keys(units) {
            diagnostics.push(Diagnostic::unknown_category(key).on_field(format!("_metadata.units.{}", key)));
        }
    }

    for field in &AIRCRAFT_FIELDS {
        let from = source_unit(source_units, field);
        convert_field(&mut aircraft, field, &from, field.storage_unit, &options, false, &mut diagnostics);
    }

    let mut wb = match (record.arms.as_ref(), record.weight_balance.as_ref()) {
        (Some(arms), Some(existing)) => merge_weight_balance(map_legacy_arms(arms), existing),
        (Some(arms), None) => map_legacy_arms(arms),
        (None, Some(existing)) => existing.clone(),
        (None, None) => WeightBalance::default(),
    };
    wb.cg_limits = Some(resolve_cg_limits(wb.cg_limits.as_ref(), record.cg_envelope.as_ref(), &mut diagnostics));
    aircraft.weight_balance = Some(wb);

    if let Some(compartments) = record.baggage_compartments.as_deref() {
        aircraft.baggage_compartments = Some(normalize_compartments(compartments));
    }

    aircraft.metadata = Some(Metadata::for_storage(storage_units(), now));
    Normalized { aircraft, diagnostics }
}

const CG_POINT_LISTS: [(&str, &str); 2] = [
    ("weightBalance.cgLimits.forwardVariable", "/weightBalance/cgLimits/forwardVariable"),
    ("weightBalance.cgLimits.aftVariable", "/weightBalance/cgLimits/aftVariable"),
];

/// Parse JSON and normalize it.
///
/// Only input that is not an aircraft object at all fails. Field values that
/// cannot be read as numbers, and CG points that cannot be read, are dropped
/// with an `INVALID_NUMERIC_INPUT` diagnostic.
pub fn normalize_aircraft_json(json: &str) -> Result<Normalized, NormalizeError> {
    let raw: Value = serde_json::from_str(json)?;
    let mut unreadable: Vec<&str> = AIRCRAFT_FIELDS
        .iter()
        .filter(|f| raw.get(f.name).is_some_and(|v| !v.is_null() && parse_number(v).is_none()))
        .map(|f| f.name)
        .collect();
    let raw_points = CG_POINT_LISTS.map(|(_, pointer)| {
        raw.pointer(pointer).and_then(Value::as_array).map_or(0, Vec::len)
    });

    let record = AircraftRecord::from_value(raw)?;
    if let Some(limits) = record.weight_balance.as_ref().and_then(|wb| wb.cg_limits.as_ref()) {
        let kept = [limits.forward_variable.len(), limits.aft_variable.len()];
        for (i, (name, _)) in CG_POINT_LISTS.iter().enumerate() {
            if kept[i] < raw_points[i] {
                unreadable.push(*name);
            }
        }
    }

    let mut normalized = normalize_aircraft_import(&record);
    for name in unreadable {
        debug!(field = name, "non-numeric field value dropped");
        normalized.diagnostics.push(Diagnostic::invalid_numeric_input(name));
    }
    Ok(normalized)
}

/// Convert a stored record to the consumer's units for export
pub fn prepare_aircraft_export(record: &AircraftRecord, user_units: &UnitSet) -> Normalized {
    prepare_aircraft_export_at(record, user_units, Utc::now())
}

pub fn prepare_aircraft_export_at(
    record: &AircraftRecord,
    user_units: &UnitSet,
    now: DateTime<Utc>,
) -> Normalized {
    let mut aircraft = record.clone();
    let mut diagnostics = Diagnostics::new();
    let options = options_for(record);

    info!(registration = record.label(), "preparing aircraft export");

    for field in &AIRCRAFT_FIELDS {
        let to = user_units.unit_for(field.category);
        convert_field(&mut aircraft, field, field.storage_unit, to, &options, true, &mut diagnostics);
    }

    aircraft.metadata = Some(Metadata::for_export(resolved_units(user_units), now));
    Normalized { aircraft, diagnostics }
}

/// Convert a record between two unit sets without passing through storage
pub fn convert_aircraft_units(record: &AircraftRecord, source: &UnitSet, target: &UnitSet) -> Normalized {
    convert_aircraft_units_at(record, source, target, Utc::now())
}

pub fn convert_aircraft_units_at(
    record: &AircraftRecord,
    source: &UnitSet,
    target: &UnitSet,
    now: DateTime<Utc>,
) -> Normalized {
    let mut aircraft = record.clone();
    let mut diagnostics = Diagnostics::new();
    let options = options_for(record);

    for category in NORMALIZED_CATEGORIES {
        let from = source.unit_for(category);
        let to = target.unit_for(category);
        if from == to {
            continue;
        }
        for field in fields_in(category) {
            convert_field(&mut aircraft, field, from, to, &options, false, &mut diagnostics);
        }
    }

    aircraft.metadata = Some(Metadata::for_conversion(resolved_units(target), now));
    Normalized { aircraft, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alflight_core::codes;
    use alflight_units::UnitCategory;
    use crate::metadata::has_units_metadata;
    use crate::record::CgLimits;
    use serde_json::json;

    fn record(value: Value) -> AircraftRecord {
        AircraftRecord::from_value(value).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        "2024-05-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_import_converts_to_storage() {
        let input = record(json!({
            "registration": "N12345",
            "fuelCapacity": 100,
            "fuelConsumption": 10,
            "emptyWeight": 1500,
            "serviceCeiling": 4000,
            "climbRate": 3.5,
            "cruiseSpeed": 110,
            "_metadata": { "units": { "fuel": "gal", "fuelConsumption": "gph", "weight": "lbs",
                                      "altitude": "m", "verticalSpeed": "m/s" } },
        }));
        let out = normalize_aircraft_import_at(&input, fixed_now());
        let a = &out.aircraft;
        assert!((a.fuel_capacity.unwrap() - 378.541).abs() < 0.001);
        assert!((a.fuel_consumption.unwrap() - 37.854).abs() < 0.001);
        assert!((a.empty_weight.unwrap() - 680.389).abs() < 0.001);
        assert!((a.service_ceiling.unwrap() - 13_123.36).abs() < 0.01);
        assert!((a.climb_rate.unwrap() - 688.976).abs() < 0.001);
        assert_eq!(a.cruise_speed, Some(110.0));

        let meta = a.metadata.as_ref().unwrap();
        let units = meta.units.as_ref().unwrap();
        assert_eq!(units.get(UnitCategory::Fuel), Some("ltr"));
        assert_eq!(units.get(UnitCategory::Weight), Some("kg"));
        assert_eq!(meta.normalized_at, Some(fixed_now()));
        assert_eq!(meta.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_import_does_not_mutate_input() {
        let input = record(json!({ "fuelCapacity": 50, "_metadata": { "units": { "fuel": "gal" } } }));
        let before = input.clone();
        let _ = normalize_aircraft_import(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_import_without_metadata_keeps_values() {
        let input = record(json!({ "fuelCapacity": 120, "maxTakeoffWeight": 1150 }));
        let out = normalize_aircraft_import(&input);
        assert_eq!(out.aircraft.fuel_capacity, Some(120.0));
        assert_eq!(out.aircraft.max_takeoff_weight, Some(1150.0));
        assert!(has_units_metadata(&out.aircraft));
    }

    #[test]
    fn test_import_export_round_trip() {
        let input = record(json!({
            "registration": "N12345",
            "fuelCapacity": 100,
            "_metadata": { "units": { "fuel": "gal" } },
        }));
        let stored = normalize_aircraft_import(&input).aircraft;
        assert!((stored.fuel_capacity.unwrap() - 378.541).abs() < 0.001);

        let exported = prepare_aircraft_export(&stored, &UnitSet::usa()).aircraft;
        assert_eq!(exported.fuel_capacity, Some(100.0));
        let units = exported.metadata.as_ref().unwrap().units.as_ref().unwrap();
        assert_eq!(units.get(UnitCategory::Fuel), Some("gal"));
    }

    #[test]
    fn test_export_metadata() {
        let stored = record(json!({ "cruiseSpeed": 100, "climbRate": 700 }));
        let units = UnitSet::metric();
        let out = prepare_aircraft_export_at(&stored, &units, fixed_now());
        assert!((out.aircraft.cruise_speed.unwrap() - 185.2).abs() < 1e-9);
        assert_eq!(out.aircraft.climb_rate, Some(700.0));

        let meta = out.aircraft.metadata.unwrap();
        assert_eq!(meta.exported_at, Some(fixed_now()));
        assert_eq!(meta.exported_by.as_deref(), Some("ALFlight-User"));
        let stamped = meta.units.unwrap();
        assert_eq!(stamped.len(), NORMALIZED_CATEGORIES.len());
        assert_eq!(stamped.get(UnitCategory::Speed), Some("km/h"));
        assert_eq!(stamped.get(UnitCategory::VerticalSpeed), Some("fpm"));
        assert_eq!(stamped.get(UnitCategory::Pressure), None);
    }

    #[test]
    fn test_near_integer_rounding() {
        assert_eq!(round_near_integer(39.00001), 39.0);
        assert_eq!(round_near_integer(38.995), 39.0);
        assert_eq!(round_near_integer(39.02), 39.02);
    }

    #[test]
    fn test_legacy_arms_blank_to_zero() {
        let input = record(json!({
            "arms": { "empty": "2.1", "fuelMain": "2.5", "frontSeats": "1.0",
                      "rearSeats": "", "baggageFwd": "3.0", "baggageAft": null },
        }));
        let wb = normalize_aircraft_import(&input).aircraft.weight_balance.unwrap();
        assert_eq!(wb.rear_left_seat_arm, Some(0.0));
        assert_eq!(wb.rear_right_seat_arm, Some(0.0));
        assert_eq!(wb.empty_weight_arm, Some(2.1));
        assert_eq!(wb.baggage_arm, Some(3.0));
    }

    #[test]
    fn test_cg_fallback_is_null_not_zero() {
        let out = normalize_aircraft_import(&record(json!({ "registration": "F-ABCD" })));
        let limits = out.aircraft.weight_balance.as_ref().unwrap().cg_limits.clone().unwrap();
        assert_eq!(limits, CgLimits::disabled());
        assert!(!out.is_clean());
        assert!(out.diagnostics.iter().any(|d| d.code == codes::MISSING_CG_DATA));

        let json = out.aircraft.to_value().unwrap();
        assert_eq!(
            json["weightBalance"]["cgLimits"],
            json!({ "forward": null, "aft": null, "forwardVariable": [] })
        );
    }

    #[test]
    fn test_cg_from_envelope_on_import() {
        let input = record(json!({
            "cgEnvelope": { "forwardPoints": [{ "mass": 780, "cg": 2.40 }], "aftCG": 2.59 },
        }));
        let out = normalize_aircraft_import(&input);
        assert!(out.is_clean());
        let limits = out.aircraft.weight_balance.unwrap().cg_limits.unwrap();
        assert_eq!(limits.forward, Some(2.40));
        assert_eq!(limits.aft, Some(2.59));
    }

    #[test]
    fn test_loose_cg_points_do_not_reject_record() {
        let out = normalize_aircraft_json(
            r#"{"fuelCapacity":100,"weightBalance":{"cgLimits":{"forward":2.4,"aft":2.59,
                "forwardVariable":[{"weight":"780","cg":"2.40"},{"mass":980,"cg":2.40},{"weight":"x","cg":2.5}]}}}"#,
        )
        .unwrap();
        assert_eq!(out.aircraft.fuel_capacity, Some(100.0));
        let limits = out.aircraft.weight_balance.as_ref().unwrap().cg_limits.clone().unwrap();
        assert!(limits.is_verification_enabled());
        let weights: Vec<f64> = limits.forward_variable.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![780.0, 980.0]);
        assert!(out.diagnostics.iter().any(|d| d.code == codes::INVALID_NUMERIC_INPUT
            && d.field.as_deref() == Some("weightBalance.cgLimits.forwardVariable")));
    }

    #[test]
    fn test_zero_cg_limits_on_import() {
        let input = record(json!({ "weightBalance": { "cgLimits": { "forward": 0, "aft": 0 } } }));
        let out = normalize_aircraft_import(&input);
        let limits = out.aircraft.weight_balance.as_ref().unwrap().cg_limits.clone().unwrap();
        assert_eq!(limits, CgLimits::disabled());
        assert!(!limits.is_verification_enabled());
        assert!(out.diagnostics.iter().any(|d| d.code == codes::MISSING_CG_DATA));
    }

    #[test]
    fn test_unsupported_unit_is_reported() {
        let input = record(json!({
            "range": 500,
            "fuelCapacity": 100,
            "_metadata": { "units": { "distance": "furlong", "fuel": "gal" } },
        }));
        let out = normalize_aircraft_import(&input);
        assert_eq!(out.aircraft.range, Some(500.0));
        assert!((out.aircraft.fuel_capacity.unwrap() - 378.541).abs() < 0.001);
        let diag = out.diagnostics.iter().find(|d| d.code == codes::UNSUPPORTED_CONVERSION).unwrap();
        assert_eq!(diag.field.as_deref(), Some("range"));
    }

    #[test]
    fn test_fuel_type_density() {
        let input = record(json!({
            "fuelType": "JET A-1",
            "fuelCapacity": 168,
            "_metadata": { "units": { "fuel": "kg" } },
        }));
        let out = normalize_aircraft_import(&input);
        assert!((out.aircraft.fuel_capacity.unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_entry_point() {
        let out = normalize_aircraft_json(r#"{"fuelCapacity": "abc", "range": "450"}"#).unwrap();
        assert_eq!(out.aircraft.fuel_capacity, None);
        assert_eq!(out.aircraft.range, Some(450.0));
        assert!(out.diagnostics.iter().any(|d| d.code == codes::INVALID_NUMERIC_INPUT
            && d.field.as_deref() == Some("fuelCapacity")));

        let err = normalize_aircraft_json("[1, 2]").unwrap_err();
        assert_eq!(Diagnostic::from(&err).code, codes::INVALID_RECORD);
    }

    #[test]
    fn test_unknown_metadata_keys() {
        let input = record(json!({
            "_metadata": { "units": { "fuel": "ltr", "timeFormat": "24h", "wingspan": "ft" } },
            "weightBalance": { "cgLimits": { "forward": 2.4, "aft": 2.59 } },
        }));
        let out = normalize_aircraft_import(&input);
        let unknown: Vec<_> = out.diagnostics.iter().filter(|d| d.code == codes::UNKNOWN_CATEGORY).collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].field.as_deref(), Some("_metadata.units.wingspan"));
        assert!(out.is_clean());
    }

    #[test]
    fn test_cross_conversion() {
        let stored = record(json!({ "fuelCapacity": 100, "emptyWeight": 1000, "range": 400 }));
        let source = UnitSet::usa();
        let target = UnitSet::metric();
        let out = convert_aircraft_units_at(&stored, &source, &target, fixed_now());
        let a = &out.aircraft;
        assert!((a.fuel_capacity.unwrap() - 378.5411784).abs() < 1e-9);
        assert!((a.empty_weight.unwrap() - 453.59237).abs() < 1e-9);
        assert!((a.range.unwrap() - 740.8).abs() < 1e-9);
        let meta = a.metadata.as_ref().unwrap();
        assert_eq!(meta.converted_at, Some(fixed_now()));
        assert_eq!(meta.units.as_ref().unwrap().get(UnitCategory::Distance), Some("km"));
    }

    #[test]
    fn test_unknown_keys_survive_normalization() {
        let input = record(json!({ "registration": "F-HSTR", "armLengths": { "fuelArm": 2.18 } }));
        let out = normalize_aircraft_import(&input).aircraft.to_value().unwrap();
        assert_eq!(out["armLengths"]["fuelArm"], json!(2.18));
    }
}
