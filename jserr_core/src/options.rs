/**
 * Reporter configuration.
 *
 * `Options` is moved into `Reporter::new`, so the caller's value is never
 * touched after construction; defaults live in the reporter's own copy.
 *
 * # Example
 * ```ignore
 * let options = jserr_core::Options {
 *     encoding: Some(jserr_core::Encoding::Json),
 *     deny_filename_patterns: Some(jserr_core::PatternList::new([r"^chrome-extension:"])?),
 *     ..Default::default()
 * };
 * ```
 *
 * The same configuration as JSON:
 * ```json
 * {
 *   "encoding": "application/json",
 *   "fieldMapping": { "message": "msg" },
 *   "extraHeaders": { "X-Api-Key": "abc" },
 *   "denyFilenamePatterns": ["^chrome-extension:"],
 *   "allowIdentityPatterns": ["Firefox", "Chrome"]
 * }
 * ```
 */
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filter::{Filter, PatternList};
use crate::protocol::encoding::Encoding;
use crate::protocol::headers::HeaderList;
use crate::protocol::types::FieldMapping;

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Wire names for the five report fields.
    pub field_mapping: FieldMapping,

    /// Body framing. `None` sends a form body without forcing a content type.
    pub encoding: Option<Encoding>,

    /// Headers added to every report request.
    pub extra_headers: HeaderList,

    /// Script filenames matching any of these are never reported.
    pub deny_filename_patterns: Option<PatternList>,

    /// When set, only script filenames matching one of these are reported.
    pub allow_filename_patterns: Option<PatternList>,

    /// Clients whose user agent matches any of these never subscribe.
    pub deny_identity_patterns: Option<PatternList>,

    /// When set, only clients whose user agent matches one of these subscribe.
    pub allow_identity_patterns: Option<PatternList>,
}

impl Options {
    /**
     * Parses options from JSON.
     *
     * # Errors
     * `ConfigError::Options` for malformed JSON or unknown keys,
     * `ConfigError::InvalidPattern` for a pattern that does not compile.
     */
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawOptions = serde_json::from_str(json)?;
        raw.compile()
    }

    pub(crate) fn filename_filter(&self) -> Filter {
        Filter::new(
            self.deny_filename_patterns.clone(),
            self.allow_filename_patterns.clone(),
        )
    }

    pub(crate) fn identity_filter(&self) -> Filter {
        Filter::new(
            self.deny_identity_patterns.clone(),
            self.allow_identity_patterns.clone(),
        )
    }
}

/// JSON shape of `Options`, with patterns still uncompiled.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct RawOptions {
    field_mapping: FieldMapping,
    encoding: Option<Encoding>,
    extra_headers: HeaderList,
    deny_filename_patterns: Option<Vec<String>>,
    allow_filename_patterns: Option<Vec<String>>,
    deny_identity_patterns: Option<Vec<String>>,
    allow_identity_patterns: Option<Vec<String>>,
}

impl RawOptions {
    fn compile(self) -> Result<Options, ConfigError> {
        let compile = |patterns: Option<Vec<String>>| patterns.map(PatternList::new).transpose();

        Ok(Options {
            field_mapping: self.field_mapping,
            encoding: self.encoding,
            extra_headers: self.extra_headers,
            deny_filename_patterns: compile(self.deny_filename_patterns)?,
            allow_filename_patterns: compile(self.allow_filename_patterns)?,
            deny_identity_patterns: compile(self.deny_identity_patterns)?,
            allow_identity_patterns: compile(self.allow_identity_patterns)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Verdict;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.field_mapping, FieldMapping::default());
        assert_eq!(options.encoding, None);
        assert!(options.extra_headers.is_empty());
        assert_eq!(options.filename_filter().check("anything"), Verdict::Accepted);
    }

    #[test]
    fn test_from_json() {
        let options = Options::from_json(
            r#"{
                "encoding": "application/json",
                "fieldMapping": { "message": "msg" },
                "extraHeaders": { "X-Api-Key": "abc" },
                "denyFilenamePatterns": ["^chrome-extension:"],
                "allowIdentityPatterns": ["Firefox"]
            }"#,
        )
        .unwrap();

        assert_eq!(options.encoding, Some(Encoding::Json));
        assert_eq!(options.field_mapping.message, "msg");
        assert_eq!(options.field_mapping.lineno, "lineno");
        assert_eq!(options.extra_headers.get("x-api-key"), Some("abc"));
        assert_eq!(
            options.filename_filter().check("chrome-extension://abc/content.js"),
            Verdict::Denied
        );
        assert_eq!(options.identity_filter().check("Chrome/120"), Verdict::NotAllowed);
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        assert!(matches!(
            Options::from_json(r#"{"denyUaPatterns": []}"#),
            Err(ConfigError::Options(_))
        ));
    }

    #[test]
    fn test_from_json_bad_pattern_is_invalid_pattern() {
        let err = Options::from_json(r#"{"denyFilenamePatterns": ["("]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)), "{err:?}");
        assert!(err.to_string().contains("unclosed group"), "{err}");

        let err = Options::from_json(r#"{"allowIdentityPatterns": ["ok", "["]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)), "{err:?}");
    }
}
