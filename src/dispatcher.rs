use std::collections::HashMap;

use crate::parser::{HeaderParser, HintField};
use crate::types::ClientHints;

/// Routes incoming request headers to the registered per-header parsers.
///
/// Header names are matched case-insensitively: the registry is keyed by
/// lower-cased canonical name, while each parser receives the original-case
/// name actually present in the map and does its own exact-key lookup.
pub struct ClientHintsDispatcher {
    parsers: HashMap<String, HeaderParser>,
}

impl ClientHintsDispatcher {
    /// Build a dispatcher with every supported header parser registered.
    pub fn new() -> Self {
        let parsers = HintField::ALL
            .into_iter()
            .map(|field| {
                let parser = HeaderParser::new(field);
                (parser.input_field().to_lowercase(), parser)
            })
            .collect();
        Self { parsers }
    }

    /// Canonical names of all recognized headers, e.g. for advertising via
    /// `Accept-CH`.
    pub fn supported_headers(&self) -> Vec<&'static str> {
        HintField::ALL.iter().map(|field| field.header()).collect()
    }

    /// Parse all recognized client-hint headers into a fresh record.
    pub fn parse(&self, headers: &HashMap<String, String>) -> ClientHints {
        let mut hints = ClientHints::default();
        self.parse_into(headers, &mut hints);
        hints
    }

    /// Parse all recognized client-hint headers, accumulating into `hints`.
    ///
    /// Headers with no registered parser are ignored. Each parser writes its
    /// own disjoint attribute, so iteration order does not matter.
    pub fn parse_into(&self, headers: &HashMap<String, String>, hints: &mut ClientHints) {
        for name in headers.keys() {
            if let Some(parser) = self.parsers.get(&name.to_lowercase()) {
                parser.parse(headers, hints, name);
            }
        }
    }

    /// Install a bounded decode cache of `capacity` entries on every parser.
    pub fn initialize_caches(&mut self, capacity: usize) {
        for parser in self.parsers.values_mut() {
            parser.initialize_cache(capacity);
        }
    }

    /// Evict all cached decode results.
    pub fn clear_caches(&self) {
        for parser in self.parsers.values() {
            parser.clear_cache();
        }
    }
}

impl Default for ClientHintsDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
