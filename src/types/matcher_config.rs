use serde::Deserialize;

/// One matcher rule body.
///
/// Opaque at the assembly stage: the pattern-matching engine downstream is
/// what interprets the require/extract expressions. Assembly only collects
/// and keys these by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub require: Vec<String>,
    #[serde(default)]
    pub extract: Vec<String>,
}
