//! Aircraft record model
//!
//! Only the fields the normalizer reads are typed. Everything else lands in
//! the flattened `extra` maps and is written back unchanged.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use crate::lenient;
use crate::metadata::Metadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Fuel label as entered (`"AVGAS"`, `"JET A-1"`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub fuel_capacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub fuel_consumption: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub cruise_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub climb_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub service_ceiling: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub empty_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub max_takeoff_weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_balance: Option<WeightBalance>,
    /// Legacy station arms, superseded by `weight_balance`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arms: Option<LegacyArms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cg_envelope: Option<CgEnvelope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baggage_compartments: Option<Vec<BaggageCompartment>>,

    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AircraftRecord {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn label(&self) -> &str {
        self.registration.as_deref().unwrap_or("<unregistered>")
    }
}

/// Canonical weight-and-balance block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightBalance {
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub empty_weight_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub fuel_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub front_left_seat_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub front_right_seat_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub rear_left_seat_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub rear_right_seat_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub baggage_arm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64", skip_serializing_if = "Option::is_none")]
    pub auxiliary_arm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cg_limits: Option<CgLimits>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// CG limits. A `None` bound means "no limit data", never a bound at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgLimits {
    #[serde(default, deserialize_with = "lenient::option_nonzero_f64")]
    pub forward: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_nonzero_f64")]
    pub aft: Option<f64>,
    #[serde(default, deserialize_with = "cg_points")]
    pub forward_variable: Vec<CgPoint>,
    #[serde(default, deserialize_with = "cg_points", skip_serializing_if = "Vec::is_empty")]
    pub aft_variable: Vec<CgPoint>,
}

impl CgLimits {
    pub fn new(forward: f64, aft: f64) -> Self {
        CgLimits { forward: Some(forward), aft: Some(aft), ..Default::default() }
    }

    /// Limits that switch CG verification off for the aircraft
    pub fn disabled() -> Self {
        CgLimits::default()
    }

    /// Same limits with zero bounds treated as missing
    pub fn sanitized(&self) -> Self {
        CgLimits {
            forward: self.forward.filter(|v| *v != 0.0),
            aft: self.aft.filter(|v| *v != 0.0),
            ..self.clone()
        }
    }

    pub fn has_bounds(&self) -> bool {
        self.forward.is_some() && self.aft.is_some()
    }

    /// W&B checks may only run against limits with both bounds
    pub fn is_verification_enabled(&self) -> bool {
        self.has_bounds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgPoint {
    #[serde(alias = "mass")]
    pub weight: f64,
    pub cg: f64,
}

impl CgPoint {
    /// Read a raw point keyed `weight` or `mass`, values numeric or strings.
    /// A missing weight or a missing or zero cg gives `None`.
    pub fn from_value(point: &Value) -> Option<CgPoint> {
        let weight = lenient::parse_optional(point.get("weight"))
            .or_else(|| lenient::parse_optional(point.get("mass")))?;
        let cg = lenient::parse_optional(point.get("cg")).filter(|cg| *cg != 0.0)?;
        Some(CgPoint { weight, cg })
    }
}

/// Readable points of a raw point list; unreadable points are dropped
fn cg_points<'de, D>(deserializer: D) -> Result<Vec<CgPoint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().iter().filter_map(CgPoint::from_value).collect())
}

/// Legacy `arms` block; values are raw because forms stored strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyArms {
    #[serde(default)]
    pub empty: Option<Value>,
    #[serde(default)]
    pub fuel_main: Option<Value>,
    #[serde(default)]
    pub front_seats: Option<Value>,
    #[serde(default)]
    pub rear_seats: Option<Value>,
    #[serde(default)]
    pub baggage_fwd: Option<Value>,
    #[serde(default)]
    pub baggage_aft: Option<Value>,
}

/// Envelope shape `{ forwardPoints: [{ weight|mass, cg }], aftCG }`.
///
/// Points stay raw so their original keys survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgEnvelope {
    #[serde(default)]
    pub forward_points: Vec<Value>,
    #[serde(rename = "aftCG", default, skip_serializing_if = "Option::is_none")]
    pub aft_cg: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaggageCompartment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub arm: Option<Value>,
    #[serde(default)]
    pub max_weight: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
