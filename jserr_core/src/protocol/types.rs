/**
 * Data carried through the reporting pipeline.
 *
 * An `ErrorOccurrence` is what the host hands us for every uncaught
 * script error. A `Report` is what goes over the wire: the five report
 * fields keyed by the names configured in `FieldMapping`.
 */
use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_COLNO_FIELD, DEFAULT_FILENAME_FIELD, DEFAULT_LINENO_FIELD, DEFAULT_LOCATION_FIELD,
    DEFAULT_MESSAGE_FIELD,
};

// ---------------------------------------------------------------------------
// ErrorOccurrence
// ---------------------------------------------------------------------------

/**
 * A single uncaught script error, as delivered by the host's error-event
 * channel.
 *
 * `filename` is the absolute URL of the script that raised the error.
 * Some embedded app webviews deliver an empty filename together with
 * `lineno == 0 && colno == 0`; such occurrences are never reported.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOccurrence {
    /// Human-readable description, e.g. `"Uncaught ReferenceError: x is not defined"`.
    pub message: String,

    /// URL of the script the error was raised in. May be empty.
    pub filename: String,

    /// 1-based line number (0 when unknown).
    pub lineno: u32,

    /// 1-based column number (0 when unknown).
    pub colno: u32,
}

impl ErrorOccurrence {
    pub fn new(message: impl Into<String>, filename: impl Into<String>, lineno: u32, colno: u32) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            lineno,
            colno,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldMapping
// ---------------------------------------------------------------------------

/**
 * Wire names used for the five report fields.
 *
 * Every name falls back to its default independently, so a configuration
 * that only renames `message` keeps the other four names intact.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldMapping {
    /// Field carrying the current document location.
    pub location: String,
    pub message: String,
    pub filename: String,
    pub lineno: String,
    pub colno: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION_FIELD.to_string(),
            message: DEFAULT_MESSAGE_FIELD.to_string(),
            filename: DEFAULT_FILENAME_FIELD.to_string(),
            lineno: DEFAULT_LINENO_FIELD.to_string(),
            colno: DEFAULT_COLNO_FIELD.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/**
 * The wire payload: ordered `(field name, value)` pairs.
 *
 * Pairs are kept in insertion order (location, message, filename, lineno,
 * colno) so the form encoding matches what a browser `FormData` would
 * produce. Duplicate names are possible when the mapping reuses a name;
 * the encoders decide how to treat them.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    fields: Vec<(String, String)>,
}

impl Report {
    /**
     * Builds a report for `occurrence`.
     *
     * `location` is the host's current location at the time the report is
     * built, not the location at the time the error was raised.
     */
    pub fn new(mapping: &FieldMapping, location: &str, occurrence: &ErrorOccurrence) -> Self {
        let fields = vec![
            (mapping.location.clone(), location.to_string()),
            (mapping.message.clone(), occurrence.message.clone()),
            (mapping.filename.clone(), occurrence.filename.clone()),
            (mapping.lineno.clone(), occurrence.lineno.to_string()),
            (mapping.colno.clone(), occurrence.colno.to_string()),
        ];

        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorOccurrence {
        ErrorOccurrence::new("x is not defined", "https://app.example/app.js", 10, 5)
    }

    #[test]
    fn test_default_mapping_names() {
        let mapping = FieldMapping::default();
        assert_eq!(mapping.location, "location");
        assert_eq!(mapping.message, "message");
        assert_eq!(mapping.filename, "filename");
        assert_eq!(mapping.lineno, "lineno");
        assert_eq!(mapping.colno, "colno");
    }

    #[test]
    fn test_report_uses_default_mapping() {
        let report = Report::new(&FieldMapping::default(), "https://app.example/page", &sample());

        let expected = [
            ("location", "https://app.example/page"),
            ("message", "x is not defined"),
            ("filename", "https://app.example/app.js"),
            ("lineno", "10"),
            ("colno", "5"),
        ];
        let actual: Vec<(&str, &str)> = report
            .fields()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_report_uses_custom_mapping() {
        let mapping = FieldMapping {
            message: "msg".into(),
            lineno: "line".into(),
            ..Default::default()
        };
        let report = Report::new(&mapping, "https://app.example/page", &sample());

        assert_eq!(report.get("msg"), Some("x is not defined"));
        assert_eq!(report.get("line"), Some("10"));
        assert_eq!(report.get("colno"), Some("5"));
        assert_eq!(report.get("message"), None);
    }

    /**
     * A partial mapping in JSON only overrides the names it mentions.
     */
    #[test]
    fn test_partial_mapping_deserializes_with_defaults() {
        let mapping: FieldMapping = serde_json::from_str(r#"{"message":"m"}"#).unwrap();
        assert_eq!(mapping.message, "m");
        assert_eq!(mapping.location, "location");
        assert_eq!(mapping.colno, "colno");
    }

    #[test]
    fn test_zero_position_is_stringified() {
        let occurrence = ErrorOccurrence::new("Script error.", "https://app.example/a.js", 0, 0);
        let report = Report::new(&FieldMapping::default(), "about:blank", &occurrence);
        assert_eq!(report.get("lineno"), Some("0"));
        assert_eq!(report.get("colno"), Some("0"));
    }
}
