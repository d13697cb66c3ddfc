//! Document identifiers: `<prefix>_<base62 suffix>`.
//!
//! The suffix is a random 128-bit value compressed to base62 (digits, then
//! uppercase, then lowercase), most-significant digit first, unpadded. A v4
//! UUID therefore becomes a suffix of at most 22 characters.
//!
//! ```
//! use entity_schema::id;
//!
//! let suffix = id::compress_uuid("a2455f7c-1a42-4d98-9fb2-28e4de1b5790").unwrap();
//! assert_eq!(suffix, "4wCSYDmd7Mt6jO7gR1VKdM");
//!
//! let doc_id = id::generate("usr");
//! assert!(id::validate(&["usr"], &doc_id));
//! assert!(!id::validate(&["acct"], &doc_id));
//! ```

use uuid::Uuid;

use crate::error::IdError;

/// The 62 symbols used for suffix encoding, in digit order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Separator between prefix and suffix.
pub const SEPARATOR: char = '_';

/// Encode a 128-bit value as base62 without leading zeros.
pub fn compress(value: u128) -> String {
    let mut digits = Vec::with_capacity(22);
    let mut n = value;
    loop {
        digits.push(BASE62_ALPHABET[(n % 62) as usize]);
        n /= 62;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// Compress a hexadecimal UUID string (dashes optional) to base62.
///
/// # Errors
///
/// Returns `IdError::InvalidArgument` if the input is empty, contains a
/// non-hex character, or does not fit in 128 bits.
pub fn compress_uuid(uuid: &str) -> Result<String, IdError> {
    let hex: String = uuid.chars().filter(|c| *c != '-').collect();
    if hex.is_empty() || hex.len() > 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(IdError::InvalidArgument {
            message: format!("not a 128-bit hexadecimal value: \"{}\"", uuid),
        });
    }
    let value = u128::from_str_radix(&hex, 16).map_err(|e| IdError::InvalidArgument {
        message: e.to_string(),
    })?;
    Ok(compress(value))
}

/// Generate a fresh identifier for the given prefix.
pub fn generate(prefix: &str) -> String {
    format!("{}{}{}", prefix, SEPARATOR, compress(Uuid::new_v4().as_u128()))
}

/// Returns true if `c` belongs to the base62 alphabet.
pub fn is_base62(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Split an identifier at its last separator into `(prefix, suffix)`.
///
/// Everything before the last `_` is the prefix, so multi-segment prefixes
/// such as `org_team` are supported. A string with no separator has an empty
/// prefix.
pub fn split(candidate: &str) -> (&str, &str) {
    match candidate.rfind(SEPARATOR) {
        Some(i) => (&candidate[..i], &candidate[i + 1..]),
        None => ("", candidate),
    }
}

/// Check an identifier against a set of allowed prefixes.
///
/// True iff the prefix equals one of `allowed_prefixes` exactly and the
/// suffix is a non-empty run of base62 characters. A bare prefix such as
/// `usr_` is rejected even though its empty suffix has no invalid
/// characters.
pub fn validate<S: AsRef<str>>(allowed_prefixes: &[S], candidate: &str) -> bool {
    parse(allowed_prefixes, candidate).is_ok()
}

/// Like [`validate`], but the empty string is accepted.
///
/// Used for optional foreign keys, whose unset value is `""`.
pub fn validate_or_empty<S: AsRef<str>>(allowed_prefixes: &[S], candidate: &str) -> bool {
    candidate.is_empty() || validate(allowed_prefixes, candidate)
}

/// Parse an identifier into `(prefix, suffix)`, checking it on the way.
///
/// # Errors
///
/// Returns `IdError::InvalidIdentifier` naming the first check that failed.
pub fn parse<'a, S: AsRef<str>>(
    allowed_prefixes: &[S],
    candidate: &'a str,
) -> Result<(&'a str, &'a str), IdError> {
    let invalid = |reason: String| IdError::InvalidIdentifier {
        value: candidate.to_string(),
        reason,
    };

    let (prefix, suffix) = split(candidate);
    if !allowed_prefixes.iter().any(|p| p.as_ref() == prefix) {
        return Err(invalid(format!("prefix \"{}\" is not allowed", prefix)));
    }
    if suffix.is_empty() {
        return Err(invalid("suffix is empty".to_string()));
    }
    if let Some(c) = suffix.chars().find(|c| !is_base62(*c)) {
        return Err(invalid(format!("'{}' is not a base62 character", c)));
    }
    Ok((prefix, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_reference_vectors() {
        assert_eq!(
            compress_uuid("a2455f7c-1a42-4d98-9fb2-28e4de1b5790").unwrap(),
            "4wCSYDmd7Mt6jO7gR1VKdM"
        );
        assert_eq!(
            compress_uuid("a2455f7c-1a42-4d98-9fb2-28e4de1b5780").unwrap(),
            "4wCSYDmd7Mt6jO7gR1VKd6"
        );
        assert_eq!(
            compress_uuid("2d8f3151-f46e-43a1-b3ad-204a0116a2ac").unwrap(),
            "1Ny5p6sOjBt6bfijfrhnJs"
        );
    }

    #[test]
    fn compress_bounds() {
        assert_eq!(compress(0), "0");
        assert_eq!(compress(61), "z");
        assert_eq!(compress(62), "10");
        assert_eq!(compress(u128::MAX), "7n42DGM5Tflk9n8mt7Fhc7");
    }

    #[test]
    fn compress_uuid_rejects_non_hex() {
        for bad in ["", "---", "not-a-uuid", "+1", "a2455f7c-1a42-4d98-9fb2-28e4de1b5790ff"] {
            assert!(
                matches!(compress_uuid(bad), Err(IdError::InvalidArgument { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_reference_ids() {
        assert!(validate(&["usr"], "usr_4wCSYDmd7Mt6jO7gR1VKdM"));
        assert!(!validate(&["acct"], "usr_4wCSYDmd7Mt6jO7gR1VKdM"));
        assert!(validate(&["acct", "usr"], "usr_4wCSYDmd7Mt6jO7gR1VKdM"));
    }

    #[test]
    fn validate_multi_segment_prefix() {
        assert!(validate(&["org_team"], "org_team_1Ny5p6sOjBt6bfijfrhnJs"));
        assert!(!validate(&["org"], "org_team_1Ny5p6sOjBt6bfijfrhnJs"));
        assert!(!validate(&["team"], "org_team_1Ny5p6sOjBt6bfijfrhnJs"));
    }

    #[test]
    fn validate_rejects_bad_suffix() {
        assert!(!validate(&["usr"], "usr_"));
        assert!(!validate(&["usr"], "usr_abc-def"));
        assert!(!validate(&["usr"], "usr_héllo"));
        assert!(!validate(&["usr"], "usr"));
    }

    #[test]
    fn validate_or_empty_accepts_empty() {
        assert!(validate_or_empty(&["usr"], ""));
        assert!(!validate(&["usr"], ""));
        assert!(!validate_or_empty(&["usr"], "acct_1"));
    }

    #[test]
    fn parse_reports_reason() {
        let err = parse(&["usr"], "acct_abc").unwrap_err();
        assert!(err.to_string().contains("prefix \"acct\""));

        let (prefix, suffix) = parse(&["usr"], "usr_abc").unwrap();
        assert_eq!(prefix, "usr");
        assert_eq!(suffix, "abc");
    }

    #[test]
    fn generated_ids_use_prefix() {
        let id = generate("test");
        assert!(id.starts_with("test_"));
        let (_, suffix) = split(&id);
        assert!(!suffix.is_empty() && suffix.len() <= 22);
        assert_ne!(generate("test"), id);
    }
}
