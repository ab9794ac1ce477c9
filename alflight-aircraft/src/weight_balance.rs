//! Weight-and-balance reconciliation
//!
//! Legacy `arms` and `cgEnvelope` shapes are folded into the canonical
//! `weightBalance` block. Two blank policies apply and must stay apart:
//! a blank arm is 0 (a station at the datum is physical), a blank CG limit
//! is `None` (no limit data, CG verification off).

use serde_json::Value;
use tracing::{debug, warn};
use alflight_core::{Diagnostic, Diagnostics};
use crate::lenient::parse_optional;
use crate::record::{BaggageCompartment, CgEnvelope, CgLimits, CgPoint, LegacyArms, WeightBalance};

/// Value of a blank or unreadable arm
pub const MISSING_ARM: f64 = 0.0;

/// Value of a blank, zero or unreadable CG limit
pub const MISSING_CG_LIMIT: Option<f64> = None;

pub fn parse_arm(value: Option<&Value>) -> f64 {
    parse_optional(value).unwrap_or(MISSING_ARM)
}

/// Zero is not a valid CG limit
pub fn parse_cg_limit(value: Option<&Value>) -> Option<f64> {
    match parse_optional(value) {
        Some(v) if v != 0.0 => Some(v),
        _ => MISSING_CG_LIMIT,
    }
}

pub fn map_legacy_arms(arms: &LegacyArms) -> WeightBalance {
    let front = parse_arm(arms.front_seats.as_ref());
    let rear = parse_arm(arms.rear_seats.as_ref());
    WeightBalance {
        empty_weight_arm: Some(parse_arm(arms.empty.as_ref())),
        fuel_arm: Some(parse_arm(arms.fuel_main.as_ref())),
        front_left_seat_arm: Some(front),
        front_right_seat_arm: Some(front),
        rear_left_seat_arm: Some(rear),
        rear_right_seat_arm: Some(rear),
        baggage_arm: Some(parse_arm(arms.baggage_fwd.as_ref())),
        auxiliary_arm: Some(parse_arm(arms.baggage_aft.as_ref())),
        ..Default::default()
    }
}

/// Overlay `existing` on `mapped`: a field present in `existing` wins.
pub fn merge_weight_balance(mapped: WeightBalance, existing: &WeightBalance) -> WeightBalance {
    let mut extra = mapped.extra;
    extra.extend(existing.extra.clone());
    WeightBalance {
        empty_weight_arm: existing.empty_weight_arm.or(mapped.empty_weight_arm),
        fuel_arm: existing.fuel_arm.or(mapped.fuel_arm),
        front_left_seat_arm: existing.front_left_seat_arm.or(mapped.front_left_seat_arm),
        front_right_seat_arm: existing.front_right_seat_arm.or(mapped.front_right_seat_arm),
        rear_left_seat_arm: existing.rear_left_seat_arm.or(mapped.rear_left_seat_arm),
        rear_right_seat_arm: existing.rear_right_seat_arm.or(mapped.rear_right_seat_arm),
        baggage_arm: existing.baggage_arm.or(mapped.baggage_arm),
        auxiliary_arm: existing.auxiliary_arm.or(mapped.auxiliary_arm),
        cg_limits: existing.cg_limits.clone().or(mapped.cg_limits),
        extra,
    }
}

fn envelope_limits(envelope: &CgEnvelope) -> CgLimits {
    let forward = parse_cg_limit(envelope.forward_points.first().and_then(|p| p.get("cg")));
    let aft = parse_cg_limit(envelope.aft_cg.as_ref());

    let mut forward_variable: Vec<CgPoint> = envelope
        .forward_points
        .iter()
        .filter_map(CgPoint::from_value)
        .collect();
    forward_variable.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    CgLimits { forward, aft, forward_variable, aft_variable: Vec::new() }
}

/// CG limits from the first source that has data:
/// existing limits with both bounds, then the envelope, then disabled.
pub fn resolve_cg_limits(
    existing: Option<&CgLimits>,
    envelope: Option<&CgEnvelope>,
    diagnostics: &mut Diagnostics,
) -> CgLimits {
    let existing = existing.map(CgLimits::sanitized);
    if let Some(limits) = existing.as_ref().filter(|l| l.has_bounds()) {
        return limits.clone();
    }

    if let Some(envelope) = envelope {
        let limits = envelope_limits(envelope);
        if limits.forward.is_some() || limits.aft.is_some() {
            debug!(forward = ?limits.forward, aft = ?limits.aft, "CG limits taken from envelope");
            return limits;
        }
    }

    // Partial existing limits beat nothing
    if let Some(limits) = existing.filter(|l| l.forward.is_some() || l.aft.is_some()) {
        return limits;
    }

    warn!("no CG limit data, CG verification disabled");
    diagnostics.push(Diagnostic::missing_cg_data());
    CgLimits::disabled()
}

/// Parse compartment `arm` and `maxWeight` with zero fallback
pub fn normalize_compartments(compartments: &[BaggageCompartment]) -> Vec<BaggageCompartment> {
    compartments
        .iter()
        .map(|c| BaggageCompartment {
            arm: Some(Value::from(parse_arm(c.arm.as_ref()))),
            max_weight: Some(Value::from(parse_arm(c.max_weight.as_ref()))),
            ..c.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alflight_core::codes;
    use serde_json::json;

    fn legacy(value: Value) -> LegacyArms {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_blank_policies() {
        assert_eq!(parse_arm(Some(&json!(""))), 0.0);
        assert_eq!(parse_arm(Some(&Value::Null)), 0.0);
        assert_eq!(parse_arm(Some(&json!("abc"))), 0.0);
        assert_eq!(parse_arm(None), 0.0);
        assert_eq!(parse_arm(Some(&json!("2.1"))), 2.1);

        assert_eq!(parse_cg_limit(Some(&json!(""))), None);
        assert_eq!(parse_cg_limit(Some(&json!(0))), None);
        assert_eq!(parse_cg_limit(Some(&json!("0"))), None);
        assert_eq!(parse_cg_limit(None), None);
        assert_eq!(parse_cg_limit(Some(&json!("2.59"))), Some(2.59));
    }

    #[test]
    fn test_map_legacy_arms() {
        let arms = legacy(json!({
            "empty": "2.1",
            "fuelMain": "2.5",
            "frontSeats": "1.0",
            "rearSeats": "",
            "baggageFwd": "3.0",
            "baggageAft": null,
        }));
        let wb = map_legacy_arms(&arms);
        assert_eq!(wb.empty_weight_arm, Some(2.1));
        assert_eq!(wb.fuel_arm, Some(2.5));
        assert_eq!(wb.front_left_seat_arm, Some(1.0));
        assert_eq!(wb.front_right_seat_arm, Some(1.0));
        assert_eq!(wb.rear_left_seat_arm, Some(0.0));
        assert_eq!(wb.rear_right_seat_arm, Some(0.0));
        assert_eq!(wb.baggage_arm, Some(3.0));
        assert_eq!(wb.auxiliary_arm, Some(0.0));
    }

    #[test]
    fn test_existing_fields_win() {
        let mapped = map_legacy_arms(&legacy(json!({ "empty": "2.1", "fuelMain": "2.5" })));
        let existing: WeightBalance = serde_json::from_value(json!({
            "fuelArm": 2.18,
            "cgLimits": { "forward": 2.4, "aft": 2.59 },
        }))
        .unwrap();
        let merged = merge_weight_balance(mapped, &existing);
        assert_eq!(merged.empty_weight_arm, Some(2.1));
        assert_eq!(merged.fuel_arm, Some(2.18));
        assert_eq!(merged.cg_limits, Some(CgLimits::new(2.4, 2.59)));
    }

    #[test]
    fn test_cg_from_existing() {
        let mut diags = Diagnostics::new();
        let existing = CgLimits::new(2.4, 2.59);
        let limits = resolve_cg_limits(Some(&existing), None, &mut diags);
        assert_eq!(limits, existing);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_zero_existing_limits_disable_verification() {
        let mut diags = Diagnostics::new();
        let zeros = CgLimits { forward: Some(0.0), aft: Some(0.0), ..Default::default() };
        let limits = resolve_cg_limits(Some(&zeros), None, &mut diags);
        assert_eq!(limits.forward, None);
        assert_eq!(limits.aft, None);
        assert!(!limits.is_verification_enabled());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::MISSING_CG_DATA);
    }

    #[test]
    fn test_cg_from_envelope() {
        let envelope: CgEnvelope = serde_json::from_value(json!({
            "forwardPoints": [
                { "mass": 980, "cg": 2.40 },
                { "mass": 780, "cg": 2.40 },
                { "mass": 1150, "cg": 2.46 },
            ],
            "aftCG": 2.59,
        }))
        .unwrap();
        let mut diags = Diagnostics::new();
        let limits = resolve_cg_limits(None, Some(&envelope), &mut diags);
        assert_eq!(limits.forward, Some(2.40));
        assert_eq!(limits.aft, Some(2.59));
        let weights: Vec<f64> = limits.forward_variable.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![780.0, 980.0, 1150.0]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_envelope_zero_is_no_limit() {
        let envelope: CgEnvelope = serde_json::from_value(json!({
            "forwardPoints": [{ "weight": 900, "cg": 0 }],
            "aftCG": "2.5",
        }))
        .unwrap();
        let mut diags = Diagnostics::new();
        let limits = resolve_cg_limits(None, Some(&envelope), &mut diags);
        assert_eq!(limits.forward, None);
        assert_eq!(limits.aft, Some(2.5));
        assert!(limits.forward_variable.is_empty());
        assert!(!limits.is_verification_enabled());
    }

    #[test]
    fn test_cg_fallback_disabled() {
        let mut diags = Diagnostics::new();
        let limits = resolve_cg_limits(None, None, &mut diags);
        assert_eq!(limits, CgLimits::disabled());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::MISSING_CG_DATA);

        let empty: CgEnvelope = serde_json::from_value(json!({ "forwardPoints": [], "aftCG": "" })).unwrap();
        let mut diags = Diagnostics::new();
        assert_eq!(resolve_cg_limits(None, Some(&empty), &mut diags), CgLimits::disabled());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_normalize_compartments() {
        let input: Vec<BaggageCompartment> = serde_json::from_value(json!([
            { "name": "Fwd", "arm": "3.0", "maxWeight": "" , "door": "left" },
            { "name": "Aft", "arm": null, "maxWeight": 20 },
        ]))
        .unwrap();
        let out = normalize_compartments(&input);
        assert_eq!(out[0].arm, Some(json!(3.0)));
        assert_eq!(out[0].max_weight, Some(json!(0.0)));
        assert_eq!(out[0].extra.get("door"), Some(&json!("left")));
        assert_eq!(out[1].arm, Some(json!(0.0)));
        assert_eq!(out[1].max_weight, Some(json!(20.0)));
    }
}
