//! Lookup key normalization.

/// Normalize a user name, email or role name for lookups.
///
/// Surrounding whitespace is dropped and the remainder is upper-cased, so
/// `" Alice@Example.com"` and `"ALICE@EXAMPLE.COM"` resolve to the same key.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
