use std::collections::HashMap;

use crate::cache::DecodeCache;
use crate::grammar::{parse_sf_boolean, parse_sf_string};
use crate::types::ClientHints;

/// The structured-field type a header's value grammar declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    SfString,
    SfBoolean,
}

/// One supported client-hint dimension. Each variant knows its canonical
/// header name, its value grammar, and which [`ClientHints`] attribute it
/// writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HintField {
    Architecture,
    Bitness,
    FullVersion,
    Mobile,
    Model,
    Platform,
    PlatformVersion,
    Wow64,
}

impl HintField {
    pub(crate) const ALL: [HintField; 8] = [
        HintField::Architecture,
        HintField::Bitness,
        HintField::FullVersion,
        HintField::Mobile,
        HintField::Model,
        HintField::Platform,
        HintField::PlatformVersion,
        HintField::Wow64,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Architecture => "Sec-CH-UA-Arch",
            Self::Bitness => "Sec-CH-UA-Bitness",
            Self::FullVersion => "Sec-CH-UA-Full-Version",
            Self::Mobile => "Sec-CH-UA-Mobile",
            Self::Model => "Sec-CH-UA-Model",
            Self::Platform => "Sec-CH-UA-Platform",
            Self::PlatformVersion => "Sec-CH-UA-Platform-Version",
            Self::Wow64 => "Sec-CH-UA-WoW64",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            Self::Mobile | Self::Wow64 => ValueKind::SfBoolean,
            _ => ValueKind::SfString,
        }
    }

    fn set(self, hints: &mut ClientHints, value: HintValue) {
        match (self, value) {
            (Self::Architecture, HintValue::Str(v)) => hints.architecture = Some(v),
            (Self::Bitness, HintValue::Str(v)) => hints.bitness = Some(v),
            (Self::FullVersion, HintValue::Str(v)) => hints.full_version = Some(v),
            (Self::Mobile, HintValue::Flag(v)) => hints.mobile = Some(v),
            (Self::Model, HintValue::Str(v)) => hints.model = Some(v),
            (Self::Platform, HintValue::Str(v)) => hints.platform = Some(v),
            (Self::PlatformVersion, HintValue::Str(v)) => hints.platform_version = Some(v),
            (Self::Wow64, HintValue::Flag(v)) => hints.wow64 = Some(v),
            // A kind mismatch cannot occur: decode() produced the value
            // through this field's own grammar.
            _ => {}
        }
    }
}

/// A decoded structured-field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HintValue {
    Str(String),
    Flag(bool),
}

/// Decoder for a single client-hint request header.
pub(crate) struct HeaderParser {
    field: HintField,
    cache: Option<DecodeCache>,
}

impl HeaderParser {
    pub fn new(field: HintField) -> Self {
        Self { field, cache: None }
    }

    /// Canonical header name. Used for registry construction only — runtime
    /// matching goes through the dispatcher's case-insensitive lookup.
    pub fn input_field(&self) -> &'static str {
        self.field.header()
    }

    /// Decode the value under `matched_header_name` — the exact key present
    /// in `headers`, which may differ in case from [`input_field`] — and on
    /// success set this parser's attribute on `hints`.
    ///
    /// A missing key, a grammar mismatch, or an empty decoded string leaves
    /// `hints` untouched: client hints are best-effort signals and one
    /// malformed header must never fail the request.
    ///
    /// [`input_field`]: Self::input_field
    pub fn parse(
        &self,
        headers: &HashMap<String, String>,
        hints: &mut ClientHints,
        matched_header_name: &str,
    ) {
        let Some(raw) = headers.get(matched_header_name) else {
            return;
        };
        if let Some(value) = self.decode(raw) {
            self.field.set(hints, value);
        }
    }

    fn decode(&self, raw: &str) -> Option<HintValue> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(raw) {
                return cached;
            }
            let decoded = self.decode_value(raw);
            cache.put(raw, decoded.clone());
            return decoded;
        }
        self.decode_value(raw)
    }

    fn decode_value(&self, raw: &str) -> Option<HintValue> {
        match self.field.kind() {
            ValueKind::SfString => parse_sf_string(raw).map(|s| HintValue::Str(s.to_string())),
            ValueKind::SfBoolean => parse_sf_boolean(raw).map(HintValue::Flag),
        }
    }

    /// Install (or replace) the bounded decode cache. Decoding through the
    /// cache always equals decoding without it.
    pub fn initialize_cache(&mut self, capacity: usize) {
        self.cache = Some(DecodeCache::new(capacity));
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn platform_parser_sets_platform() {
        let parser = HeaderParser::new(HintField::Platform);
        let headers = header_map(&[("Sec-CH-UA-Platform", "\"Windows\"")]);
        let mut hints = ClientHints::default();
        parser.parse(&headers, &mut hints, "Sec-CH-UA-Platform");
        assert_eq!(hints.platform.as_deref(), Some("Windows"));
    }

    #[test]
    fn malformed_value_leaves_hints_untouched() {
        let parser = HeaderParser::new(HintField::Platform);
        let headers = header_map(&[("Sec-CH-UA-Platform", "Windows")]);
        let mut hints = ClientHints {
            platform: Some("prior".to_string()),
            ..ClientHints::default()
        };
        parser.parse(&headers, &mut hints, "Sec-CH-UA-Platform");
        assert_eq!(hints.platform.as_deref(), Some("prior"));
    }

    #[test]
    fn parser_uses_the_exact_key_it_was_given() {
        let parser = HeaderParser::new(HintField::Platform);
        let headers = header_map(&[("sec-ch-ua-platform", "\"Linux\"")]);
        let mut hints = ClientHints::default();
        parser.parse(&headers, &mut hints, "sec-ch-ua-platform");
        assert_eq!(hints.platform.as_deref(), Some("Linux"));
    }

    #[test]
    fn boolean_parser_sets_flag() {
        let parser = HeaderParser::new(HintField::Mobile);
        let mut hints = ClientHints::default();
        let on = header_map(&[("Sec-CH-UA-Mobile", "?1")]);
        parser.parse(&on, &mut hints, "Sec-CH-UA-Mobile");
        assert_eq!(hints.mobile, Some(true));
        let off = header_map(&[("Sec-CH-UA-Mobile", "?0")]);
        parser.parse(&off, &mut hints, "Sec-CH-UA-Mobile");
        assert_eq!(hints.mobile, Some(false));
    }

    #[test]
    fn cache_is_transparent() {
        let mut cached = HeaderParser::new(HintField::Model);
        cached.initialize_cache(16);
        let plain = HeaderParser::new(HintField::Model);
        // Repeat each value so the second pass hits the cache.
        for raw in ["\"Pixel 8\"", "\"Pixel 8\"", "not quoted", "not quoted", "\"  \""] {
            let headers = header_map(&[("Sec-CH-UA-Model", raw)]);
            let mut with_cache = ClientHints::default();
            let mut without = ClientHints::default();
            cached.parse(&headers, &mut with_cache, "Sec-CH-UA-Model");
            plain.parse(&headers, &mut without, "Sec-CH-UA-Model");
            assert_eq!(with_cache, without, "raw: {raw:?}");
        }
    }

    #[test]
    fn full_cache_still_decodes() {
        let mut parser = HeaderParser::new(HintField::Model);
        parser.initialize_cache(1);
        let mut hints = ClientHints::default();
        let first = header_map(&[("Sec-CH-UA-Model", "\"A\"")]);
        parser.parse(&first, &mut hints, "Sec-CH-UA-Model");
        let second = header_map(&[("Sec-CH-UA-Model", "\"B\"")]);
        parser.parse(&second, &mut hints, "Sec-CH-UA-Model");
        assert_eq!(hints.model.as_deref(), Some("B"));
    }

    #[test]
    fn every_field_has_a_distinct_header() {
        let names: std::collections::HashSet<&str> =
            HintField::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(names.len(), HintField::ALL.len());
    }
}
