//! Identifier normalization
//!
//! Names, handles and phone numbers are compared in a canonical form:
//! lowercase, with whitespace, periods, underscores and hyphens removed.
//! "Ana Perez", "ana.perez" and "ANA_PEREZ" all normalize to "anaperez".

/// Normalize an identifier or query for comparison.
///
/// Pure and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !is_separator(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '_' | '-')
}
