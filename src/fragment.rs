use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::types::{MatcherConfig, TestCase};

/// A named lookup contribution: its key/value pairs plus the names of other
/// lookups whose contents must be merged in at finalization time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupEntry {
    #[serde(default)]
    pub merge: Vec<String>,
    #[serde(default)]
    pub map: IndexMap<String, String>,
}

/// A named lookup-set contribution: its members plus the names of lookups
/// or sets whose keys/members must be merged in at finalization time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupSetEntry {
    #[serde(default)]
    pub merge: Vec<String>,
    #[serde(default)]
    pub values: BTreeSet<String>,
}

/// One independently loaded unit of analyzer configuration.
///
/// Fragments are plain data: nothing is validated or merged until the whole
/// collection is finalized by [`AnalyzerConfigBuilder::build`], so a fragment
/// may freely reference lookups that another fragment — loaded earlier or
/// later — defines.
///
/// The YAML shape mirrors the struct:
///
/// ```yaml
/// lookups:
///   mobile_brands:
///     merge:
///       - extra_brands
///     map:
///       Samsung: Samsung
/// sets:
///   known_brands:
///     merge:
///       - mobile_brands
/// matchers:
///   - require:
///       - IsNull[agent.product.name]
///     extract:
///       - "DeviceBrand: lookup[mobile_brands; agent.product.comments.entry.text]"
/// tests:
///   - input: "Mozilla/5.0 (Linux; Android 14; SM-S918B)"
///     expected:
///       DeviceBrand: Samsung
/// wanted_fields:
///   - DeviceBrand
/// user_agent_max_length: 2048
/// ```
///
/// [`AnalyzerConfigBuilder::build`]: crate::AnalyzerConfigBuilder::build
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFragment {
    #[serde(default)]
    pub lookups: IndexMap<String, LookupEntry>,
    #[serde(default)]
    pub sets: IndexMap<String, LookupSetEntry>,
    #[serde(default)]
    pub matchers: Vec<MatcherConfig>,
    #[serde(default)]
    pub tests: Vec<TestCase>,
    /// Explicit field allow-list; an absent key means "all fields wanted".
    #[serde(default)]
    pub wanted_fields: Option<BTreeSet<String>>,
    /// Maximum accepted user-agent length; a negative value selects the
    /// built-in default.
    #[serde(default)]
    pub user_agent_max_length: Option<i64>,
}

impl ConfigFragment {
    /// Deserialize a fragment from one YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
