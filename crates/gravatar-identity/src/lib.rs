//! Identifier normalization and validation for Gravatar lookups.
//!
//! Gravatar keys every resource on a hexadecimal digest of a normalized email
//! address. This crate owns the three leaf operations the rest of the
//! workspace builds on:
//!
//! - [`normalize_email()`] — trim + lowercase, idempotent.
//! - [`derive_hash()`] — SHA-256 digest of the normalized address.
//! - [`is_valid_hash()`] — syntactic check for the two accepted digest forms.

use gravatar_core::{GravatarError, GravatarResult};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Permissive email shape: local part, `@`, dotted domain, 2+ letter TLD.
/// Deliverability is the upstream API's problem, not ours.
#[allow(clippy::expect_used)]
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
    })
}

/// Normalize an email address: trim surrounding whitespace, lowercase.
///
/// Never fails and is idempotent.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the avatar/profile lookup hash from an email address.
///
/// The address is normalized first, so the result is case- and
/// whitespace-insensitive. Always produces the current 64-hex SHA-256 form;
/// legacy 32-hex digests are accepted on input (see [`is_valid_hash()`]) but
/// never generated.
pub fn derive_hash(raw: &str) -> GravatarResult<String> {
    let normalized = normalize_email(raw);
    if !email_pattern().is_match(&normalized) {
        return Err(GravatarError::Validation(format!(
            "invalid email address: '{normalized}'"
        )));
    }
    Ok(hex::encode(Sha256::digest(normalized.as_bytes())))
}

/// True iff `s` is a syntactically valid lookup hash: exactly 32 (legacy MD5)
/// or 64 (SHA-256) hex characters, either case.
///
/// Validity is purely syntactic; existence upstream is never checked here.
pub fn is_valid_hash(s: &str) -> bool {
    (s.len() == 32 || s.len() == 64) && s.bytes().all(|b| b.is_ascii_hexdigit())
}
