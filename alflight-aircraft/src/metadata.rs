//! `_metadata` block of aircraft records

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use alflight_units::{UnitCategory, UnitSet};
use crate::fields::{field, FieldSpec};
use crate::record::AircraftRecord;

pub const METADATA_VERSION: &str = "1.0";

/// Exporter name written into exported records
pub const EXPORTED_BY: &str = "ALFlight-User";

/// Describes the units a record's values are in. Descriptive only: values
/// are already converted when the block is stamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    fn stamped(units: UnitSet) -> Self {
        Metadata {
            version: Some(METADATA_VERSION.to_string()),
            units: Some(units),
            ..Default::default()
        }
    }

    pub fn for_storage(units: UnitSet, now: DateTime<Utc>) -> Self {
        Metadata { normalized_at: Some(now), ..Self::stamped(units) }
    }

    pub fn for_export(units: UnitSet, now: DateTime<Utc>) -> Self {
        Metadata {
            exported_at: Some(now),
            exported_by: Some(EXPORTED_BY.to_string()),
            ..Self::stamped(units)
        }
    }

    pub fn for_conversion(units: UnitSet, now: DateTime<Utc>) -> Self {
        Metadata { converted_at: Some(now), ..Self::stamped(units) }
    }

    /// Unit a field was authored in: category key, then field-name key,
    /// then the storage unit.
    pub fn source_unit(&self, field: &FieldSpec) -> String {
        source_unit(self.units.as_ref(), field)
    }
}

pub(crate) fn source_unit(units: Option<&UnitSet>, field: &FieldSpec) -> String {
    units
        .and_then(|u| u.get(field.category).or_else(|| u.get_key(field.name)))
        .unwrap_or(field.storage_unit)
        .to_string()
}

/// Display-only preference keys that carry no unit category
const PREFERENCE_KEYS: [&str; 2] = ["coordinates", "timeFormat"];

/// Keys of a units block that name neither a category nor a field
pub fn unknown_unit_keys(units: &UnitSet) -> Vec<&str> {
    units
        .iter()
        .map(|(key, _)| key)
        .filter(|key| {
            UnitCategory::from_name(key).is_none()
                && field(key).is_none()
                && !PREFERENCE_KEYS.contains(key)
        })
        .collect()
}

/// True when the record carries a `units` block, even an empty one
pub fn has_units_metadata(record: &AircraftRecord) -> bool {
    record.metadata.as_ref().is_some_and(|m| m.units.is_some())
}

pub fn get_aircraft_metadata(record: &AircraftRecord) -> Option<&Metadata> {
    record.metadata.as_ref()
}
