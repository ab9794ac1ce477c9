//! Unit preference sets
//!
//! A `UnitSet` maps category names to unit codes. It is both the pilot's
//! display preference and the `units` block of record metadata, so unknown
//! keys (older exports keyed some units by field name) are kept verbatim.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::UnitCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitSet(BTreeMap<String, String>);

const EUROPE: [(UnitCategory, &str); 12] = [
    (UnitCategory::Distance, "nm"),
    (UnitCategory::Altitude, "ft"),
    (UnitCategory::Runway, "m"),
    (UnitCategory::Visibility, "km"),
    (UnitCategory::Speed, "kt"),
    (UnitCategory::WindSpeed, "kt"),
    (UnitCategory::Weight, "kg"),
    (UnitCategory::Fuel, "ltr"),
    (UnitCategory::Pressure, "hPa"),
    (UnitCategory::Temperature, "C"),
    (UnitCategory::FuelConsumption, "lph"),
    (UnitCategory::ArmLength, "mm"),
];

const USA: [(UnitCategory, &str); 12] = [
    (UnitCategory::Distance, "nm"),
    (UnitCategory::Altitude, "ft"),
    (UnitCategory::Runway, "ft"),
    (UnitCategory::Visibility, "sm"),
    (UnitCategory::Speed, "kt"),
    (UnitCategory::WindSpeed, "kt"),
    (UnitCategory::Weight, "lbs"),
    (UnitCategory::Fuel, "gal"),
    (UnitCategory::Pressure, "inHg"),
    (UnitCategory::Temperature, "C"),
    (UnitCategory::FuelConsumption, "gph"),
    (UnitCategory::ArmLength, "in"),
];

const METRIC: [(UnitCategory, &str); 12] = [
    (UnitCategory::Distance, "km"),
    (UnitCategory::Altitude, "m"),
    (UnitCategory::Runway, "m"),
    (UnitCategory::Visibility, "km"),
    (UnitCategory::Speed, "km/h"),
    (UnitCategory::WindSpeed, "km/h"),
    (UnitCategory::Weight, "kg"),
    (UnitCategory::Fuel, "ltr"),
    (UnitCategory::Pressure, "hPa"),
    (UnitCategory::Temperature, "C"),
    (UnitCategory::FuelConsumption, "lph"),
    (UnitCategory::ArmLength, "cm"),
];

impl UnitSet {
    pub const PRESETS: [&'static str; 4] = ["europe", "usa", "metric", "aviation"];

    /// An empty set; every lookup through `unit_for` gives storage units
    pub fn new() -> Self {
        UnitSet(BTreeMap::new())
    }

    fn from_pairs(pairs: &[(UnitCategory, &str)]) -> Self {
        pairs.iter().fold(UnitSet::new(), |set, (c, u)| set.with(*c, u))
    }

    pub fn europe() -> Self {
        Self::from_pairs(&EUROPE)
    }

    pub fn usa() -> Self {
        Self::from_pairs(&USA)
    }

    pub fn metric() -> Self {
        Self::from_pairs(&METRIC)
    }

    /// Europe with fuel by mass
    pub fn aviation() -> Self {
        Self::europe().with(UnitCategory::Fuel, "kg")
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "europe" => Some(Self::europe()),
            "usa" => Some(Self::usa()),
            "metric" => Some(Self::metric()),
            "aviation" => Some(Self::aviation()),
            _ => None,
        }
    }

    /// The storage unit of every category
    pub fn storage() -> Self {
        UnitCategory::ALL
            .iter()
            .fold(UnitSet::new(), |set, c| set.with(*c, c.storage_unit()))
    }

    pub fn get(&self, category: UnitCategory) -> Option<&str> {
        self.get_key(category.name())
    }

    /// Lookup by raw key, e.g. a field name in older metadata
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Chosen unit, or the storage unit when unset
    pub fn unit_for(&self, category: UnitCategory) -> &str {
        self.get(category).unwrap_or_else(|| category.storage_unit())
    }

    pub fn set(&mut self, category: UnitCategory, unit: &str) {
        self.insert_key(category.name(), unit);
    }

    pub fn with(mut self, category: UnitCategory, unit: &str) -> Self {
        self.set(category, unit);
        self
    }

    pub fn insert_key(&mut self, key: &str, unit: &str) {
        self.0.insert(key.to_string(), unit.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for UnitSet {
    fn default() -> Self {
        Self::europe()
    }
}

impl FromIterator<(UnitCategory, String)> for UnitSet {
    fn from_iter<I: IntoIterator<Item = (UnitCategory, String)>>(iter: I) -> Self {
        let mut set = UnitSet::new();
        for (category, unit) in iter {
            set.set(category, &unit);
        }
        set
    }
}
