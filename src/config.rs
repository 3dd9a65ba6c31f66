use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::fragment::ConfigFragment;
use crate::types::{MatcherConfig, TestCase};

/// Applied when a contribution requests the default maximum user-agent
/// length (negative sentinel), and when no contribution sets a length.
pub const DEFAULT_USER_AGENT_MAX_LENGTH: usize = 2048;

/// Which analyzer output fields the merged configuration asks for.
///
/// "All" absorbs: once any contribution wants every field, explicit
/// allow-lists from other contributions no longer narrow the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum WantedFields {
    /// No contribution made yet.
    #[default]
    Unset,
    /// At least one contribution wants every field.
    All,
    /// Every contribution so far named an explicit allow-list; this is
    /// their union.
    Subset(BTreeSet<String>),
}

/// The frozen, queryable rule database: lookups, lookup sets, matcher rule
/// bodies and test cases collected from every fragment, with all merge
/// directives resolved and lookup keys canonically lower-cased.
///
/// Immutable after [`AnalyzerConfigBuilder::build`]; safe to share across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    wanted_field_names: Option<BTreeSet<String>>,
    matcher_configs: IndexMap<String, MatcherConfig>,
    lookups: IndexMap<String, IndexMap<String, String>>,
    lookup_sets: IndexMap<String, BTreeSet<String>>,
    user_agent_max_length: usize,
    test_cases: Vec<TestCase>,
}

impl AnalyzerConfig {
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// `None` means every field is wanted.
    pub fn wanted_field_names(&self) -> Option<&BTreeSet<String>> {
        self.wanted_field_names.as_ref()
    }

    /// Matcher rule bodies keyed by origin id (source + position).
    pub fn matcher_configs(&self) -> &IndexMap<String, MatcherConfig> {
        &self.matcher_configs
    }

    /// Lookup tables. Keys are lower-cased at finalization, so callers must
    /// lower-case before probing.
    pub fn lookups(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.lookups
    }

    pub fn lookup_sets(&self) -> &IndexMap<String, BTreeSet<String>> {
        &self.lookup_sets
    }

    pub fn user_agent_max_length(&self) -> usize {
        self.user_agent_max_length
    }

    /// Test cases in load order, duplicates included.
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }
}

/// Accumulates configuration fragments and deferred merge directives, then
/// resolves everything in one deterministic pass.
///
/// Unresolved references only become an error at [`build`](Self::build)
/// time: fragments may arrive in any order, including a merge directive
/// naming a lookup that a later fragment defines. `build` consumes the
/// builder, so directives can never be applied twice.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    wanted: WantedFields,
    matcher_configs: IndexMap<String, MatcherConfig>,
    lookups: IndexMap<String, IndexMap<String, String>>,
    lookup_sets: IndexMap<String, BTreeSet<String>>,
    // target name → source names still to be merged in, in declared order
    lookup_merges: IndexMap<String, IndexSet<String>>,
    lookup_set_merges: IndexMap<String, IndexSet<String>>,
    user_agent_max_length: Option<usize>,
    test_cases: Vec<TestCase>,
}

impl AnalyzerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one loaded fragment. `source` names the fragment's origin
    /// (typically a file path) and keys its matcher configs.
    pub fn add_fragment(&mut self, source: &str, fragment: ConfigFragment) -> &mut Self {
        tracing::debug!(
            source,
            lookups = fragment.lookups.len(),
            sets = fragment.sets.len(),
            matchers = fragment.matchers.len(),
            tests = fragment.tests.len(),
            "adding config fragment"
        );
        for (name, entry) in fragment.lookups {
            if !entry.merge.is_empty() {
                self.put_lookup_merge(&name, entry.merge);
            }
            // A merge-only entry declares the lookup but must not clobber a
            // definition contributed by another fragment.
            if !entry.map.is_empty() || !self.lookups.contains_key(&name) {
                self.put_lookup(&name, entry.map);
            }
        }
        for (name, entry) in fragment.sets {
            if !entry.merge.is_empty() {
                self.put_lookup_set_merge(&name, entry.merge);
            }
            if !entry.values.is_empty() || !self.lookup_sets.contains_key(&name) {
                self.put_lookup_set(&name, entry.values);
            }
        }
        for (index, matcher) in fragment.matchers.into_iter().enumerate() {
            self.add_matcher_config(format!("{source}#{index}"), matcher);
        }
        for test_case in fragment.tests {
            self.add_test_case(test_case);
        }
        if let Some(length) = fragment.user_agent_max_length {
            self.user_agent_max_length(length);
        }
        self.wanted_field_names(fragment.wanted_fields);
        self
    }

    /// Store a lookup's key/value pairs. A name contributed twice is
    /// replaced (last write wins).
    pub fn put_lookup(&mut self, name: &str, values: IndexMap<String, String>) -> &mut Self {
        self.lookups.insert(name.to_string(), values);
        self
    }

    /// Record lookup names whose contents must be merged into `name` at
    /// finalization. Directives against the same target accumulate.
    pub fn put_lookup_merge(&mut self, name: &str, sources: Vec<String>) -> &mut Self {
        self.lookup_merges
            .entry(name.to_string())
            .or_default()
            .extend(sources);
        self
    }

    /// Store a lookup set's members. A name contributed twice is replaced
    /// (last write wins).
    pub fn put_lookup_set(&mut self, name: &str, values: BTreeSet<String>) -> &mut Self {
        self.lookup_sets.insert(name.to_string(), values);
        self
    }

    /// Record lookup or set names whose keys/members must be merged into
    /// the set `name` at finalization.
    pub fn put_lookup_set_merge(&mut self, name: &str, sources: Vec<String>) -> &mut Self {
        self.lookup_set_merges
            .entry(name.to_string())
            .or_default()
            .extend(sources);
        self
    }

    /// Store one matcher rule body under its origin id (e.g. file plus
    /// position). A colliding id replaces the earlier body (last write
    /// wins).
    pub fn add_matcher_config(&mut self, origin: String, config: MatcherConfig) -> &mut Self {
        self.matcher_configs.insert(origin, config);
        self
    }

    /// Append a test case. Order is preserved; duplicates are kept.
    pub fn add_test_case(&mut self, test_case: TestCase) -> &mut Self {
        self.test_cases.push(test_case);
        self
    }

    /// Contribute a field allow-list. `None` (or an empty set) asks for all
    /// fields and absorbs every explicit allow-list; explicit sets union.
    pub fn wanted_field_names(&mut self, wanted: Option<BTreeSet<String>>) -> &mut Self {
        match wanted {
            None => self.wanted = WantedFields::All,
            Some(set) if set.is_empty() => self.wanted = WantedFields::All,
            Some(set) => match &mut self.wanted {
                WantedFields::All => {}
                WantedFields::Unset => self.wanted = WantedFields::Subset(set),
                WantedFields::Subset(current) => current.extend(set),
            },
        }
        self
    }

    /// Contribute a maximum user-agent length. A negative value selects the
    /// built-in default; across contributions the minimum (most
    /// restrictive) wins.
    pub fn user_agent_max_length(&mut self, requested: i64) -> &mut Self {
        let requested = if requested < 0 {
            DEFAULT_USER_AGENT_MAX_LENGTH
        } else {
            requested as usize
        };
        self.user_agent_max_length = Some(match self.user_agent_max_length {
            Some(current) => current.min(requested),
            None => requested,
        });
        self
    }

    /// Resolve all merge directives and freeze the configuration.
    ///
    /// Runs in a fixed order: lookup merges first, then one-time key
    /// lower-casing, then set merges — sets may pull keys out of lookups,
    /// so they must see the merged, canonical form. On error no
    /// configuration is produced.
    pub fn build(mut self) -> Result<AnalyzerConfig> {
        self.apply_lookup_merges()?;
        self.fold_lookup_keys();
        self.apply_lookup_set_merges()?;

        let wanted_field_names = match self.wanted {
            WantedFields::Subset(set) => Some(set),
            WantedFields::All | WantedFields::Unset => None,
        };

        tracing::debug!(
            matchers = self.matcher_configs.len(),
            lookups = self.lookups.len(),
            lookup_sets = self.lookup_sets.len(),
            test_cases = self.test_cases.len(),
            "analyzer config assembled"
        );

        Ok(AnalyzerConfig {
            wanted_field_names,
            matcher_configs: self.matcher_configs,
            lookups: self.lookups,
            lookup_sets: self.lookup_sets,
            user_agent_max_length: self
                .user_agent_max_length
                .unwrap_or(DEFAULT_USER_AGENT_MAX_LENGTH),
            test_cases: self.test_cases,
        })
    }

    fn apply_lookup_merges(&mut self) -> Result<()> {
        let directives = std::mem::take(&mut self.lookup_merges);
        for (target, sources) in &directives {
            let Some(mut merged) = self.lookups.get(target).cloned() else {
                // Directive against a lookup nobody defined: nothing to
                // merge into.
                continue;
            };
            for source in sources {
                let extra =
                    self.lookups
                        .get(source)
                        .ok_or_else(|| Error::UnresolvedLookupMerge {
                            target: target.clone(),
                            source: source.clone(),
                        })?;
                // Sources are applied in declared order; on a key collision
                // the source value wins.
                merged.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            self.lookups.insert(target.clone(), merged);
        }
        Ok(())
    }

    /// Lower-case every lookup key, exactly once, after merges — merge
    /// sources may use any original casing. Keys colliding after folding
    /// resolve last-write-wins in iteration order.
    fn fold_lookup_keys(&mut self) {
        for (name, map) in &mut self.lookups {
            let mut folded: IndexMap<String, String> = IndexMap::with_capacity(map.len());
            for (key, value) in map.drain(..) {
                let lower = key.to_lowercase();
                if let Some(previous) = folded.insert(lower.clone(), value) {
                    if folded[&lower] != previous {
                        tracing::warn!(
                            lookup = %name,
                            key = %lower,
                            "differently-cased keys with different values collide; keeping the later one"
                        );
                    }
                }
            }
            *map = folded;
        }
    }

    fn apply_lookup_set_merges(&mut self) -> Result<()> {
        let directives = std::mem::take(&mut self.lookup_set_merges);
        for (target, sources) in &directives {
            if !self.lookup_sets.contains_key(target) {
                continue;
            }
            let mut additions: Vec<String> = Vec::new();
            for source in sources {
                // A lookup contributes its keys, a set its members; one
                // name may resolve to both.
                let mut found = false;
                if let Some(lookup) = self.lookups.get(source) {
                    additions.extend(lookup.keys().cloned());
                    found = true;
                }
                if let Some(set) = self.lookup_sets.get(source) {
                    additions.extend(set.iter().cloned());
                    found = true;
                }
                if !found {
                    return Err(Error::UnresolvedSetMerge {
                        target: target.clone(),
                        source: source.clone(),
                    });
                }
            }
            if let Some(target_set) = self.lookup_sets.get_mut(target) {
                target_set.extend(additions);
            }
        }
        Ok(())
    }
}
