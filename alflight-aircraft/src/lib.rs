//! ALFlight Aircraft - Aircraft record normalization
//!
//! Aircraft records are held in storage units while resident. This crate
//! moves them across the boundary:
//! - import: authored units (from `_metadata.units`) to storage units, with
//!   legacy `arms` / `cgEnvelope` shapes folded into `weightBalance`
//! - export: storage units to the consumer's units
//! - cross-conversion between two arbitrary unit sets
//!
//! Every operation returns a new record together with the diagnostics it
//! produced. A field that cannot be converted never aborts the record.

pub mod lenient;
mod record;
mod fields;
mod metadata;
mod weight_balance;
mod normalize;

pub use record::{
    AircraftRecord, BaggageCompartment, CgEnvelope, CgLimits, CgPoint, LegacyArms, WeightBalance,
};
pub use fields::{
    category_for_property, convert_property, field, fields_in, storage_unit_for, storage_units,
    FieldSpec, AIRCRAFT_FIELDS, NORMALIZED_CATEGORIES,
};
pub use metadata::{
    get_aircraft_metadata, has_units_metadata, unknown_unit_keys, Metadata, EXPORTED_BY,
    METADATA_VERSION,
};
pub use weight_balance::{
    map_legacy_arms, merge_weight_balance, normalize_compartments, parse_arm, parse_cg_limit,
    resolve_cg_limits, MISSING_ARM, MISSING_CG_LIMIT,
};
pub use normalize::{
    convert_aircraft_units, convert_aircraft_units_at, normalize_aircraft_import,
    normalize_aircraft_import_at, normalize_aircraft_json, prepare_aircraft_export,
    prepare_aircraft_export_at, NormalizeError, Normalized, NEAR_INTEGER_TOLERANCE,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        convert_aircraft_units, normalize_aircraft_import, prepare_aircraft_export,
        AircraftRecord, Normalized,
    };
    pub use alflight_units::UnitSet;
}
