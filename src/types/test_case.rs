use indexmap::IndexMap;
use serde::Deserialize;

/// A recorded analysis test case carried inside the rule database.
///
/// Test cases are kept in load order and never deduplicated — the analyzer
/// replays them against itself to validate a loaded rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    /// The user-agent string under test.
    pub input: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    /// Expected field name → value pairs.
    #[serde(default)]
    pub expected: IndexMap<String, String>,
}
