//! The ordered list of mapping rules.
//!
//! Operations return a new store rather than mutating in place, so an
//! application state holding a store can be replaced as a whole.
use crate::error::RuleError;
use crate::rule::{MappingRule, RuleId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingStore {
    rules: Vec<MappingRule>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing rules, validating each and rejecting
    /// duplicate ids.
    pub fn from_rules(rules: Vec<MappingRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.id.clone()) {
                return Err(RuleError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Loads a JSON array of rules in the camelCase mapping-file shape.
    pub fn from_json(text: &str) -> Result<Self, RuleError> {
        let rules: Vec<MappingRule> = serde_json::from_str(text)?;
        Self::from_rules(rules)
    }

    pub fn to_json(&self) -> Result<String, RuleError> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
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

    pub fn get(&self, id: &RuleId) -> Option<&MappingRule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub fn last(&self) -> Option<&MappingRule> {
        self.rules.last()
    }

    /// A fresh id derived from the current time in milliseconds, suffixed
    /// with `-N` when rules are created within the same millisecond.
    pub fn next_id(&self) -> RuleId {
        let base = Utc::now().timestamp_millis().to_string();
        let mut candidate = RuleId::new(base.as_str());
        let mut suffix = 0u32;
        while self.get(&candidate).is_some() {
            suffix += 1;
            candidate = RuleId::new(format!("{}-{}", base, suffix));
        }
        candidate
    }

    /// Appends a validated rule.
    pub fn with_rule(&self, rule: MappingRule) -> Result<Self, RuleError> {
        rule.validate()?;
        if self.get(&rule.id).is_some() {
            return Err(RuleError::DuplicateId(rule.id));
        }
        log::trace!("Adding mapping {} ({})", rule.id, rule);
        let mut rules = self.rules.clone();
        rules.push(rule);
        Ok(Self { rules })
    }

    /// Appends a direct rule with a generated id.
    pub fn with_direct(&self, output_path: &str, source_path: &str) -> Result<Self, RuleError> {
        self.with_rule(MappingRule::direct(self.next_id(), output_path, source_path))
    }

    /// Appends a constant rule with a generated id.
    pub fn with_constant(&self, output_path: &str, value: &str) -> Result<Self, RuleError> {
        self.with_rule(MappingRule::constant(self.next_id(), output_path, value))
    }

    /// Removes the rule with `id`, keeping the order of the rest.
    pub fn without(&self, id: &RuleId) -> Self {
        let rules: Vec<MappingRule> = self.rules.iter().filter(|r| &r.id != id).cloned().collect();
        if rules.len() == self.rules.len() {
            log::debug!("No mapping with id '{}' to delete", id);
        }
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a MappingStore {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
