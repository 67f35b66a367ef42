//! Codepoint classification and case mapping
//!
//! Thin wrappers over the standard library's Unicode property tables. Case
//! conversion here is strictly one codepoint to one codepoint: characters
//! whose full case mapping expands to multiple codepoints (such as U+00DF)
//! are left unchanged, which keeps every mapped string the same length as
//! its input.

/// Tests whether the codepoint is whitespace.
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Tests whether the codepoint is lower case.
pub fn is_lower(c: char) -> bool {
    c.is_lowercase()
}

/// Tests whether the codepoint is upper case.
pub fn is_upper(c: char) -> bool {
    c.is_uppercase()
}

/// Maps the codepoint to upper case, or returns it unchanged when the
/// mapping is not one-to-one.
pub fn to_upper(c: char) -> char {
    let mut mapping = c.to_uppercase();
    match (mapping.next(), mapping.next()) {
        (Some(mapped), None) => mapped,
        _ => c,
    }
}

/// Maps the codepoint to lower case, or returns it unchanged when the
/// mapping is not one-to-one.
pub fn to_lower(c: char) -> char {
    let mut mapping = c.to_lowercase();
    match (mapping.next(), mapping.next()) {
        (Some(mapped), None) => mapped,
        _ => c,
    }
}
