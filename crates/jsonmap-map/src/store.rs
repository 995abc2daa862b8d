//! Ordered collection of mapping rules.
//!
//! The order of rules matters twice: the transform uses the first rule for a
//! source path, and connectors take their colour from a rule's position.

use serde::{Deserialize, Serialize};
use tracing::debug;

use jsonmap_model::{FieldPath, MappingRule};

/// What to do when a rule is appended for a source path that already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOutPolicy {
    /// Keep every rule. Only the first rule for a source affects the transform.
    #[default]
    Allow,
    /// Drop existing rules for the same source before appending.
    ReplaceExisting,
}

/// Result of [`MappingSet::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The rule was added at the end.
    Appended,
    /// An identical (source, target) pair already exists; nothing changed.
    Duplicate,
    /// Rules for the same source were removed and the new rule appended.
    Replaced { removed: usize },
}

impl AppendOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, Self::Duplicate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    rules: Vec<MappingRule>,
    policy: FanOutPolicy,
}

impl MappingSet {
    pub fn new(policy: FanOutPolicy) -> Self {
        Self {
            rules: Vec::new(),
            policy,
        }
    }

    /// Build a set by appending `rules` in order under `policy`.
    pub fn from_rules(rules: impl IntoIterator<Item = MappingRule>, policy: FanOutPolicy) -> Self {
        let mut set = Self::new(policy);
        for rule in rules {
            set.append(rule);
        }
        set
    }

    pub fn policy(&self) -> FanOutPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FanOutPolicy) {
        self.policy = policy;
    }

    /// Add `rule` at the end unless the same pair is already present.
    pub fn append(&mut self, rule: MappingRule) -> AppendOutcome {
        if self.rules.contains(&rule) {
            debug!(rule = %rule, "mapping already present");
            return AppendOutcome::Duplicate;
        }
        let outcome = match self.policy {
            FanOutPolicy::Allow => AppendOutcome::Appended,
            FanOutPolicy::ReplaceExisting => match self.remove_by_source(&rule.source) {
                0 => AppendOutcome::Appended,
                removed => AppendOutcome::Replaced { removed },
            },
        };
        debug!(rule = %rule, ?outcome, "mapping appended");
        self.rules.push(rule);
        outcome
    }

    /// Remove every rule whose source is `source`. Returns how many were removed.
    pub fn remove_by_source(&mut self, source: &FieldPath) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| &rule.source != source);
        let removed = before - self.rules.len();
        if removed > 0 {
            debug!(source = %source, removed, "mappings removed");
        }
        removed
    }

    /// The rule the transform uses for `source`.
    pub fn first_for_source(&self, source: &FieldPath) -> Option<&MappingRule> {
        self.rules.iter().find(|rule| &rule.source == source)
    }

    /// Targets of every rule for `source`, in rule order.
    pub fn targets_of<'a, 's>(
        &'a self,
        source: &'s FieldPath,
    ) -> impl Iterator<Item = &'a FieldPath> + use<'a, 's> {
        self.rules
            .iter()
            .filter(move |rule| &rule.source == source)
            .map(|rule| &rule.target)
    }

    pub fn sources_for_target<'a, 't>(
        &'a self,
        target: &'t FieldPath,
    ) -> impl Iterator<Item = &'a FieldPath> + use<'a, 't> {
        self.rules
            .iter()
            .filter(move |rule| &rule.target == target)
            .map(|rule| &rule.source)
    }

    pub fn is_source_mapped(&self, source: &FieldPath) -> bool {
        self.rules.iter().any(|rule| &rule.source == source)
    }

    pub fn is_target_mapped(&self, target: &FieldPath) -> bool {
        self.rules.iter().any(|rule| &rule.target == target)
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw)
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut set = MappingSet::default();
        set.append(MappingRule::new("b", "y"));
        set.append(MappingRule::new("a", "x"));
        let sources: Vec<&str> = set.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_pair_is_a_no_op() {
        let mut set = MappingSet::default();
        assert_eq!(set.append(MappingRule::new("age", "years")), AppendOutcome::Appended);
        assert_eq!(set.append(MappingRule::new("age", "years")), AppendOutcome::Duplicate);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn allow_policy_keeps_fan_out() {
        let mut set = MappingSet::new(FanOutPolicy::Allow);
        set.append(MappingRule::new("user.name", "a"));
        set.append(MappingRule::new("user.name", "b"));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.first_for_source(&path("user.name")).map(|r| r.target.as_str()),
            Some("a")
        );
        let targets: Vec<&str> = set
            .targets_of(&path("user.name"))
            .map(FieldPath::as_str)
            .collect();
        assert_eq!(targets, vec!["a", "b"]);
    }

    #[test]
    fn replace_policy_moves_rule_to_end() {
        let mut set = MappingSet::new(FanOutPolicy::ReplaceExisting);
        set.append(MappingRule::new("name", "a"));
        set.append(MappingRule::new("age", "years"));
        let outcome = set.append(MappingRule::new("name", "b"));
        assert_eq!(outcome, AppendOutcome::Replaced { removed: 1 });
        assert_eq!(
            set.rules(),
            &[MappingRule::new("age", "years"), MappingRule::new("name", "b")]
        );
    }

    #[test]
    fn replace_policy_ignores_identical_pair() {
        let mut set = MappingSet::new(FanOutPolicy::ReplaceExisting);
        set.append(MappingRule::new("name", "a"));
        set.append(MappingRule::new("age", "years"));
        assert_eq!(set.append(MappingRule::new("name", "a")), AppendOutcome::Duplicate);
        assert_eq!(set.rules()[0], MappingRule::new("name", "a"));
    }

    #[test]
    fn remove_by_source_drops_every_match() {
        let mut set = MappingSet::default();
        set.append(MappingRule::new("user.name", "a"));
        set.append(MappingRule::new("age", "years"));
        set.append(MappingRule::new("user.name", "b"));
        assert_eq!(set.remove_by_source(&path("user.name")), 2);
        assert_eq!(set.rules(), &[MappingRule::new("age", "years")]);
    }

    #[test]
    fn remove_by_unknown_source_is_a_no_op() {
        let mut set = MappingSet::default();
        set.append(MappingRule::new("age", "years"));
        assert_eq!(set.remove_by_source(&path("missing")), 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lookups_outlive_the_query_key() {
        let set = MappingSet::from_rules(
            [MappingRule::new("name", "a"), MappingRule::new("name", "b")],
            FanOutPolicy::Allow,
        );
        let targets: Vec<&FieldPath> = {
            let key = path("name");
            set.targets_of(&key).collect()
        };
        assert_eq!(targets, vec![&path("a"), &path("b")]);
        let sources: Vec<&FieldPath> = {
            let key = path("b");
            set.sources_for_target(&key).collect()
        };
        assert_eq!(sources, vec![&path("name")]);
    }

    #[test]
    fn target_lookup_lists_all_sources() {
        let set = MappingSet::from_rules(
            [MappingRule::new("first", "name"), MappingRule::new("given", "name")],
            FanOutPolicy::Allow,
        );
        assert!(set.is_target_mapped(&path("name")));
        assert!(!set.is_target_mapped(&path("other")));
        let sources: Vec<&str> = set
            .sources_for_target(&path("name"))
            .map(FieldPath::as_str)
            .collect();
        assert_eq!(sources, vec!["first", "given"]);
    }
}
