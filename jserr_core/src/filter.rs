/**
 * Deny/allow pattern filtering.
 *
 * The same two-stage rule is applied to the client identity (once, at
 * `init`) and to the script filename (per occurrence):
 *
 * 1. a deny list is present and any of its patterns matches → `Denied`
 * 2. an allow list is present and none of its patterns matches → `NotAllowed`
 * 3. otherwise → `Accepted`
 *
 * Patterns search anywhere in the value (`Regex::is_match`), like
 * `RegExp.prototype.test`. An absent list imposes nothing; a present but
 * empty allow list rejects every value.
 */
use regex::Regex;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// PatternList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compiles every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(value))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Matched a deny pattern.
    Denied,
    /// An allow list exists and nothing in it matched.
    NotAllowed,
}

/**
 * A deny list and an allow list over one kind of value.
 */
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub deny: Option<PatternList>,
    pub allow: Option<PatternList>,
}

impl Filter {
    pub fn new(deny: Option<PatternList>, allow: Option<PatternList>) -> Self {
        Self { deny, allow }
    }

    pub fn check(&self, value: &str) -> Verdict {
        if self.deny.as_ref().is_some_and(|deny| deny.is_match(value)) {
            return Verdict::Denied;
        }
        if self.allow.as_ref().is_some_and(|allow| !allow.is_match(value)) {
            return Verdict::NotAllowed;
        }
        Verdict::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(patterns: &[&str]) -> Option<PatternList> {
        Some(PatternList::new(patterns).unwrap())
    }

    const APP_JS: &str = "https://app.example/app.js";

    #[test]
    fn test_no_lists_accepts_everything() {
        assert_eq!(Filter::default().check(APP_JS), Verdict::Accepted);
        assert_eq!(Filter::default().check(""), Verdict::Accepted);
    }

    #[test]
    fn test_deny_only() {
        let filter = Filter::new(list(&[r"app\.example", r"^chrome-extension:"]), None);
        assert_eq!(filter.check(APP_JS), Verdict::Denied);
        assert_eq!(filter.check("https://cdn.example/lib.js"), Verdict::Accepted);
    }

    #[test]
    fn test_allow_only() {
        let filter = Filter::new(None, list(&[r"^https://app\.example/"]));
        assert_eq!(filter.check(APP_JS), Verdict::Accepted);
        assert_eq!(filter.check("https://ads.example/x.js"), Verdict::NotAllowed);
    }

    #[test]
    fn test_deny_wins_over_allow() {
        let filter = Filter::new(list(&["app"]), list(&["app"]));
        assert_eq!(filter.check(APP_JS), Verdict::Denied);
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let filter = Filter::new(None, list(&[]));
        assert_eq!(filter.check(APP_JS), Verdict::NotAllowed);
    }

    #[test]
    fn test_empty_deny_list_rejects_nothing() {
        let filter = Filter::new(list(&[]), None);
        assert_eq!(filter.check(APP_JS), Verdict::Accepted);
    }

    /**
     * Patterns are searched, not anchored, and keep their own flags.
     */
    #[test]
    fn test_unanchored_and_case_flags() {
        let filter = Filter::new(list(&["(?i)headlesschrome"]), None);
        assert_eq!(
            filter.check("Mozilla/5.0 (X11; Linux x86_64) HeadlessChrome/120.0"),
            Verdict::Denied
        );
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = PatternList::new(["ok", "("]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("invalid filter pattern:"), "{err}");
    }

    #[test]
    fn test_pattern_list_size() {
        let patterns = PatternList::new([r"a\.js$", "^https://"]).unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(!patterns.is_empty());
        assert!(patterns.is_match("https://x/a.js"));
    }
}
