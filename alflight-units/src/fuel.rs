//! Fuel densities for mass <-> volume fuel conversions
//!
//! Density varies by fuel type, so a mass <-> volume conversion is only as
//! good as the fuel type it is given. Without one, AVGAS is assumed.

use serde::{Serialize, Deserialize};

/// Nominal AVGAS 100LL density (kg/L)
pub const DEFAULT_FUEL_DENSITY: f64 = 0.72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FuelType {
    #[default]
    #[serde(rename = "AVGAS")]
    Avgas,
    #[serde(rename = "JET A-1")]
    JetA1,
    #[serde(rename = "MOGAS")]
    Mogas,
    #[serde(rename = "DIESEL")]
    Diesel,
}

/// Fuel density entry
#[derive(Debug, Clone)]
struct FuelData {
    fuel: FuelType,
    label: &'static str,
    density: f64,
    aliases: &'static [&'static str],
}

static FUELS: [FuelData; 4] = [
    FuelData { fuel: FuelType::Avgas, label: "AVGAS", density: DEFAULT_FUEL_DENSITY,
        aliases: &["100LL", "AVGAS 100LL", "100UL"] },
    FuelData { fuel: FuelType::JetA1, label: "JET A-1", density: 0.84,
        aliases: &["JET A1", "JETA1", "JET A", "JET-A1", "KEROSENE"] },
    FuelData { fuel: FuelType::Mogas, label: "MOGAS", density: 0.72,
        aliases: &["UL91", "SP98", "SP95"] },
    FuelData { fuel: FuelType::Diesel, label: "DIESEL", density: 0.84,
        aliases: &["GAZOLE"] },
];

/// Normalize a fuel label (uppercase, trim, standardize separators)
fn normalize_label(label: &str) -> String {
    label.trim()
        .to_uppercase()
        .replace(['_', '-'], " ")
}

impl FuelType {
    fn data(&self) -> &'static FuelData {
        FUELS.iter()
            .find(|f| f.fuel == *self)
            .unwrap_or(&FUELS[0])
    }

    /// Density in kg/L
    pub fn density(&self) -> f64 {
        self.data().density
    }

    pub fn label(&self) -> &'static str {
        self.data().label
    }

    /// Look up a fuel type by its label or a common spelling of it
    pub fn from_label(label: &str) -> Option<FuelType> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        FUELS.iter()
            .find(|f| {
                normalize_label(f.label) == wanted
                    || f.aliases.iter().any(|a| normalize_label(a) == wanted)
            })
            .map(|f| f.fuel)
    }
}

/// Extra inputs for a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConversionOptions {
    /// Explicit density in kg/L, wins over `fuel_type`
    pub density: Option<f64>,
    pub fuel_type: Option<FuelType>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    /// Density to use: explicit, then fuel type, then AVGAS
    pub fn density(&self) -> f64 {
        match self.density {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => self.fuel_type.map(|f| f.density()).unwrap_or(DEFAULT_FUEL_DENSITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_avgas() {
        assert_eq!(FuelType::default(), FuelType::Avgas);
        assert_eq!(ConversionOptions::default().density(), DEFAULT_FUEL_DENSITY);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(FuelType::from_label("JET A-1"), Some(FuelType::JetA1));
        assert_eq!(FuelType::from_label("jet_a1"), Some(FuelType::JetA1));
        assert_eq!(FuelType::from_label(" avgas "), Some(FuelType::Avgas));
        assert_eq!(FuelType::from_label("100LL"), Some(FuelType::Avgas));
        assert_eq!(FuelType::from_label("ul91"), Some(FuelType::Mogas));
        assert_eq!(FuelType::from_label(""), None);
        assert_eq!(FuelType::from_label("hydrogen"), None);
    }

    #[test]
    fn test_density_resolution() {
        let opts = ConversionOptions::new().with_fuel_type(FuelType::JetA1);
        assert_eq!(opts.density(), 0.84);

        let opts = opts.with_density(0.80);
        assert_eq!(opts.density(), 0.80);

        // Invalid explicit density falls back to the fuel type
        let opts = ConversionOptions::new().with_density(0.0).with_fuel_type(FuelType::Diesel);
        assert_eq!(opts.density(), 0.84);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&FuelType::JetA1).unwrap();
        assert_eq!(json, "\"JET A-1\"");
        let back: FuelType = serde_json::from_str("\"AVGAS\"").unwrap();
        assert_eq!(back, FuelType::Avgas);
    }

    #[test]
    fn test_label_round_trip() {
        for fuel in [FuelType::Avgas, FuelType::JetA1, FuelType::Mogas, FuelType::Diesel] {
            assert_eq!(FuelType::from_label(fuel.label()), Some(fuel));
        }
    }
}
