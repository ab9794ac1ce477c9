//! Structured diagnostics for unit conversion and record normalization
//!
//! Diagnostics never abort processing. They are values collected next to a
//! result so a UI can flag "this aircraft's data may be incomplete" without
//! failing the whole operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard diagnostic codes (machine-readable)
pub mod codes {
    pub const UNSUPPORTED_CONVERSION: &str = "UNSUPPORTED_CONVERSION";
    pub const INVALID_NUMERIC_INPUT: &str = "INVALID_NUMERIC_INPUT";
    pub const UNKNOWN_PROPERTY: &str = "UNKNOWN_PROPERTY";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const MISSING_CG_DATA: &str = "MISSING_CG_DATA";
    pub const INVALID_RECORD: &str = "INVALID_RECORD";
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, the result is complete
    Info,
    /// Processing continued with a degraded result
    Warning,
    /// The affected value could not be produced
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Structured report attached to a conversion or normalization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Machine-readable code from [`codes`]
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Record field the diagnostic refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Suggestion for fixing the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    pub severity: Severity,
}

/// Collected diagnostics of one operation
pub type Diagnostics = Vec<Diagnostic>;

impl Diagnostic {
    /// Create a new warning-level diagnostic
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            suggestion: None,
            severity: Severity::Warning,
        }
    }

    /// Builder: attach the record field
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_warning_or_worse(&self) -> bool {
        self.severity >= Severity::Warning
    }

    // ========== Common Constructors ==========

    pub fn unsupported_conversion(category: &str, from: &str, to: &str) -> Self {
        Self::new(
            codes::UNSUPPORTED_CONVERSION,
            format!("No {} conversion from '{}' to '{}'; value left unconverted", category, from, to),
        )
        .with_suggestion(format!("Use one of the registered {} units", category))
    }

    pub fn invalid_numeric_input(field: &str) -> Self {
        Self::new(
            codes::INVALID_NUMERIC_INPUT,
            format!("Blank or non-numeric value for '{}'", field),
        )
        .on_field(field)
        .with_severity(Severity::Info)
    }

    pub fn unknown_property(property: &str) -> Self {
        Self::new(
            codes::UNKNOWN_PROPERTY,
            format!("Unknown property for conversion: {}", property),
        )
        .on_field(property)
    }

    pub fn unknown_category(category: &str) -> Self {
        Self::new(
            codes::UNKNOWN_CATEGORY,
            format!("Unknown unit category '{}' ignored", category),
        )
        .with_severity(Severity::Info)
    }

    pub fn missing_cg_data() -> Self {
        Self::new(
            codes::MISSING_CG_DATA,
            "No CG limits found; CG verification is disabled for this aircraft",
        )
        .on_field("weightBalance.cgLimits")
        .with_suggestion("Enter forward and aft CG limits from the flight manual")
    }

    pub fn invalid_record(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_RECORD, format!("Invalid aircraft record: {}", details.into()))
            .with_severity(Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severity_is_warning() {
        let d = Diagnostic::new(codes::UNKNOWN_PROPERTY, "x");
        assert_eq!(d.severity, Severity::Warning);
        assert!(d.is_warning_or_worse());
    }

    #[test]
    fn test_builders() {
        let d = Diagnostic::unknown_property("wingspan");
        assert_eq!(d.code, codes::UNKNOWN_PROPERTY);
        assert_eq!(d.field.as_deref(), Some("wingspan"));
    }

    #[test]
    fn test_invalid_numeric_input_is_info() {
        let d = Diagnostic::invalid_numeric_input("arms.rearSeats");
        assert_eq!(d.severity, Severity::Info);
        assert!(!d.is_warning_or_worse());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::missing_cg_data();
        let s = d.to_string();
        assert!(s.starts_with("[MISSING_CG_DATA]"));
        assert!(s.contains("weightBalance.cgLimits"));
    }

    #[test]
    fn test_serialize_skips_empty() {
        let d = Diagnostic::new(codes::UNKNOWN_CATEGORY, "msg");
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("field").is_none());
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["severity"], "warning");
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
