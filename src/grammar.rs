use std::sync::LazyLock;

use fancy_regex::Regex;

/// RFC 8941 sf-string: the entire value wrapped in double quotes.
static SF_STRING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.*)"$"#).expect("pre-validated pattern"));

/// Decode an RFC 8941 sf-boolean: `?0` is false, `?1` is true.
///
/// Anything else is not a boolean and yields `None`. The grammar is
/// literal — no whitespace trimming, no case folding.
pub fn parse_sf_boolean(value: &str) -> Option<bool> {
    match value {
        "?0" => Some(false),
        "?1" => Some(true),
        _ => None,
    }
}

/// Decode an RFC 8941 sf-string: the payload between surrounding `"` quotes.
///
/// The payload is trimmed of surrounding whitespace; a payload that is empty
/// after trimming yields `None` rather than an empty string. Values not
/// wrapped in quotes yield `None`.
///
/// Only the boolean and string subset of RFC 8941 is implemented: the
/// supported `Sec-CH-UA-*` headers use no other structured type, and any
/// other type in a header value is simply unparseable.
pub fn parse_sf_string(value: &str) -> Option<&str> {
    let captures = SF_STRING_PATTERN.captures(value).ok()??;
    let payload = captures.get(1)?.as_str().trim();
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}
