//! Email syntax validation
//!
//! Purely syntactic: `local@domain.tld` with no whitespace and exactly the
//! `@` separators the pattern allows. No DNS/MX lookup, no trimming, no case
//! folding.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Returns true iff `candidate` looks like `local@domain.tld`
pub fn validate_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}
