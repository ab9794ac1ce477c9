//! Conversion tables - one per unit category
//!
//! Every pair is registered once with its forward rule; the registrar stores
//! the exact inverse for the opposite direction at the same time, so lookups
//! never have to invert a rule at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::constants::*;
use crate::{Conversion, UnitCategory, UnitDef};

/// Global conversion tables
pub static TABLES: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Units, aliases and conversion rules of a single category
#[derive(Debug, Clone)]
pub struct ConversionTable {
    category: UnitCategory,
    units: Vec<UnitDef>,
    aliases: HashMap<&'static str, &'static str>,
    rules: HashMap<(&'static str, &'static str), Conversion>,
}

impl ConversionTable {
    fn new(category: UnitCategory) -> Self {
        ConversionTable {
            category,
            units: Vec::new(),
            aliases: HashMap::new(),
            rules: HashMap::new(),
        }
    }

    pub fn category(&self) -> UnitCategory {
        self.category
    }

    /// Resolve a code or alias to the registered code
    pub fn resolve(&self, code: &str) -> Option<&'static str> {
        if let Some(unit) = self.units.iter().find(|u| u.code == code) {
            return Some(unit.code);
        }
        self.aliases.get(code).copied()
    }

    pub fn unit(&self, code: &str) -> Option<&UnitDef> {
        let code = self.resolve(code)?;
        self.units.iter().find(|u| u.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.resolve(code).is_some()
    }

    /// Registered codes in registration order
    pub fn codes(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.code).collect()
    }

    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    /// Rule for a pair, after alias resolution
    pub fn get(&self, from: &str, to: &str) -> Option<&Conversion> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        if from == to {
            return Some(&Conversion::IDENTITY);
        }
        self.rules.get(&(from, to))
    }

    /// All registered directed pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.keys().copied()
    }

    fn unit_def(&mut self, code: &'static str, symbol: &'static str, name: &'static str) {
        self.units.push(UnitDef { code, symbol, name });
    }

    fn alias(&mut self, alias: &'static str, code: &'static str) {
        self.aliases.insert(alias, code);
    }

    fn pair(&mut self, from: &'static str, to: &'static str, rule: Conversion) {
        debug_assert!(self.contains(from) && self.contains(to), "unregistered unit in pair");
        self.rules.insert((from, to), rule);
        self.rules.insert((to, from), rule.inverse());
    }

    /// `to = from * factor`, and the inverse
    fn scale(&mut self, from: &'static str, to: &'static str, factor: f64) {
        self.pair(from, to, Conversion::Scale(factor));
    }
}

/// Registry of every category's table
pub struct UnitRegistry {
    tables: HashMap<UnitCategory, ConversionTable>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry { tables: HashMap::new() };
        registry.register_all_tables();
        registry
    }

    /// Table of a category. Every category has one.
    pub fn table(&self, category: UnitCategory) -> &ConversionTable {
        &self.tables[&category]
    }

    pub fn get(&self, category: UnitCategory, from: &str, to: &str) -> Option<&Conversion> {
        self.table(category).get(from, to)
    }

    /// Display symbol of a code in any category
    pub fn symbol(&self, code: &str) -> Option<&'static str> {
        UnitCategory::ALL
            .iter()
            .filter_map(|c| self.table(*c).unit(code))
            .map(|u| u.symbol)
            .next()
    }

    fn insert(&mut self, table: ConversionTable) {
        self.tables.insert(table.category, table);
    }

    fn register_all_tables(&mut self) {
        self.register_distance();
        self.register_altitude();
        self.register_speed(UnitCategory::Speed);
        self.register_speed(UnitCategory::WindSpeed);
        self.register_vertical_speed();
        self.register_weight();
        self.register_fuel();
        self.register_fuel_consumption();
        self.register_pressure();
        self.register_temperature();
        self.register_arm_length();
        self.register_visibility();
        self.register_runway();
    }

    fn register_distance(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Distance);
        t.unit_def("nm", "NM", "nautical mile");
        t.unit_def("km", "km", "kilometre");
        t.unit_def("mi", "mi", "statute mile");

        t.scale("nm", "km", NAUTICAL_MILE_IN_METERS / 1000.0);
        t.scale("nm", "mi", NAUTICAL_MILE_IN_METERS / STATUTE_MILE_IN_METERS);
        t.scale("mi", "km", STATUTE_MILE_IN_METERS / 1000.0);
        self.insert(t);
    }

    fn register_altitude(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Altitude);
        t.unit_def("ft", "ft", "foot");
        t.unit_def("m", "m", "metre");

        t.scale("ft", "m", FOOT_IN_METERS);
        self.insert(t);
    }

    fn register_speed(&mut self, category: UnitCategory) {
        let mut t = ConversionTable::new(category);
        t.unit_def("kt", "kt", "knot");
        t.unit_def("km/h", "km/h", "kilometre per hour");
        t.unit_def("mph", "mph", "mile per hour");
        t.unit_def("m/s", "m/s", "metre per second");
        t.alias("kmh", "km/h");
        t.alias("mi/h", "mph");
        t.alias("ms", "m/s");

        t.scale("kt", "km/h", KNOT_IN_KMH);
        t.scale("kt", "mph", KNOT_IN_MPH);
        t.scale("kt", "m/s", KNOT_IN_MPS);
        t.scale("mph", "km/h", STATUTE_MILE_IN_METERS / 1000.0);
        t.scale("mph", "m/s", MPH_IN_MPS);
        t.scale("m/s", "km/h", MPS_IN_KMH);
        self.insert(t);
    }

    fn register_vertical_speed(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::VerticalSpeed);
        t.unit_def("fpm", "ft/min", "foot per minute");
        t.unit_def("m/s", "m/s", "metre per second");
        t.alias("ms", "m/s");

        t.scale("fpm", "m/s", FPM_IN_MPS);
        self.insert(t);
    }

    fn register_weight(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Weight);
        t.unit_def("kg", "kg", "kilogram");
        t.unit_def("lbs", "lbs", "pound");
        t.alias("lb", "lbs");

        t.scale("lbs", "kg", POUND_IN_KILOGRAMS);
        self.insert(t);
    }

    fn register_fuel(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Fuel);
        t.unit_def("ltr", "L", "litre");
        t.unit_def("gal", "gal", "US gallon");
        t.unit_def("kg", "kg", "kilogram");
        t.unit_def("lbs", "lbs", "pound");
        t.alias("l", "ltr");
        t.alias("L", "ltr");
        t.alias("lb", "lbs");

        // Volume <-> volume and mass <-> mass are density independent
        t.scale("gal", "ltr", US_GALLON_IN_LITRES);
        t.scale("lbs", "kg", POUND_IN_KILOGRAMS);

        t.pair("ltr", "kg", Conversion::VolumeToMass { litres_per_unit: 1.0, kg_per_unit: 1.0 });
        t.pair("ltr", "lbs", Conversion::VolumeToMass {
            litres_per_unit: 1.0,
            kg_per_unit: POUND_IN_KILOGRAMS,
        });
        t.pair("gal", "kg", Conversion::VolumeToMass {
            litres_per_unit: US_GALLON_IN_LITRES,
            kg_per_unit: 1.0,
        });
        t.pair("gal", "lbs", Conversion::VolumeToMass {
            litres_per_unit: US_GALLON_IN_LITRES,
            kg_per_unit: POUND_IN_KILOGRAMS,
        });
        self.insert(t);
    }

    fn register_fuel_consumption(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::FuelConsumption);
        t.unit_def("lph", "L/h", "litre per hour");
        t.unit_def("gph", "gal/h", "US gallon per hour");

        t.scale("gph", "lph", US_GALLON_IN_LITRES);
        self.insert(t);
    }

    fn register_pressure(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Pressure);
        t.unit_def("hPa", "hPa", "hectopascal");
        t.unit_def("inHg", "inHg", "inch of mercury");
        t.unit_def("mb", "mb", "millibar");

        t.scale("inHg", "hPa", INHG_IN_HECTOPASCALS);
        t.scale("inHg", "mb", INHG_IN_HECTOPASCALS);
        t.scale("mb", "hPa", 1.0);
        self.insert(t);
    }

    fn register_temperature(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Temperature);
        t.unit_def("C", "°C", "degree Celsius");
        t.unit_def("F", "°F", "degree Fahrenheit");

        t.pair("C", "F", Conversion::Affine {
            scale: FAHRENHEIT_PER_CELSIUS,
            offset: FAHRENHEIT_FREEZING_POINT,
        });
        self.insert(t);
    }

    fn register_arm_length(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::ArmLength);
        t.unit_def("mm", "mm", "millimetre");
        t.unit_def("cm", "cm", "centimetre");
        t.unit_def("m", "m", "metre");
        t.unit_def("in", "in", "inch");

        t.scale("cm", "mm", 10.0);
        t.scale("m", "mm", 1000.0);
        t.scale("m", "cm", 100.0);
        t.scale("in", "mm", INCH_IN_MILLIMETERS);
        t.scale("in", "cm", INCH_IN_MILLIMETERS / 10.0);
        t.scale("in", "m", INCH_IN_MILLIMETERS / 1000.0);
        self.insert(t);
    }

    fn register_visibility(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Visibility);
        t.unit_def("km", "km", "kilometre");
        t.unit_def("sm", "SM", "statute mile");
        t.unit_def("m", "m", "metre");

        t.scale("km", "m", 1000.0);
        t.scale("sm", "km", STATUTE_MILE_IN_METERS / 1000.0);
        t.scale("sm", "m", STATUTE_MILE_IN_METERS);
        self.insert(t);
    }

    fn register_runway(&mut self) {
        let mut t = ConversionTable::new(UnitCategory::Runway);
        t.unit_def("m", "m", "metre");
        t.unit_def("ft", "ft", "foot");

        t.scale("ft", "m", FOOT_IN_METERS);
        self.insert(t);
    }
}
