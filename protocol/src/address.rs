//! Address canonicalization.
//!
//! Every address that enters the core goes through [`normalize`] so that
//! two spellings of the same account compare and hash identically. Hex case
//! is preserved as given.

use crate::config::ADDRESS_PREFIX;

/// Strips the `0x` prefix from `address`.
///
/// Repeated prefixes are all removed, which keeps the function idempotent:
/// `normalize(normalize(x)) == normalize(x)` for every input.
///
/// ```
/// use lndr_protocol::address::normalize;
///
/// assert_eq!(normalize("0xABC"), "ABC");
/// assert_eq!(normalize("ABC"), "ABC");
/// ```
pub fn normalize(address: &str) -> &str {
    address.trim_start_matches(ADDRESS_PREFIX)
}

/// Compares two addresses after canonicalizing both.
pub fn same_address(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
