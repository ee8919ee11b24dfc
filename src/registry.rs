//! @ai:module:intent Ordered store of property rules with native-first lookup
//! @ai:module:layer application
//! @ai:module:public_api RuleRegistry, RuleOrigin, RuleInfo
//! @ai:module:depends_on rule, entity, rules

use crate::entity::EntityKind;
use crate::rule::{ComplexPropertyRule, PropertyRule, SimplePropertyRule};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// @ai:intent Where a rule comes from; native rules always take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOrigin {
    Native,
    User,
}

/// @ai:intent Listing entry describing one registered rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub name: String,
    pub description: String,
    pub complex: bool,
    pub origin: RuleOrigin,
}

/// @ai:intent Rules split into native and user tiers, each in registration order
#[derive(Clone, Default)]
pub struct RuleRegistry {
    native_simple: Vec<Arc<dyn SimplePropertyRule>>,
    user_simple: Vec<Arc<dyn SimplePropertyRule>>,
    native_complex: Vec<Arc<dyn ComplexPropertyRule>>,
    user_complex: Vec<Arc<dyn ComplexPropertyRule>>,
}

impl RuleRegistry {
    /// @ai:intent Create an empty registry, without native rules
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Create a registry holding the built-in native rules
    pub fn with_native_rules() -> Self {
        let mut registry = Self::new();
        crate::rules::native::register(&mut registry);
        registry
    }

    pub fn register_simple_rule(&mut self, rule: Arc<dyn SimplePropertyRule>) {
        tracing::debug!(rule = rule.name(), "registered user simple rule");
        self.user_simple.push(rule);
    }

    pub fn register_complex_rule(&mut self, rule: Arc<dyn ComplexPropertyRule>) {
        tracing::debug!(rule = rule.name(), "registered user complex rule");
        self.user_complex.push(rule);
    }

    pub fn register_native_simple_rule(&mut self, rule: Arc<dyn SimplePropertyRule>) {
        self.native_simple.push(rule);
    }

    pub fn register_native_complex_rule(&mut self, rule: Arc<dyn ComplexPropertyRule>) {
        self.native_complex.push(rule);
    }

    /// @ai:intent Search order for simple rules: natives, then user rules, newest first in each tier
    pub fn simple_rules_by_precedence(
        &self,
    ) -> impl Iterator<Item = (RuleOrigin, &Arc<dyn SimplePropertyRule>)> {
        self.native_simple
            .iter()
            .rev()
            .map(|r| (RuleOrigin::Native, r))
            .chain(self.user_simple.iter().rev().map(|r| (RuleOrigin::User, r)))
    }

    /// @ai:intent Search order for complex rules: natives, then user rules, newest first in each tier
    pub fn complex_rules_by_precedence(
        &self,
    ) -> impl Iterator<Item = (RuleOrigin, &Arc<dyn ComplexPropertyRule>)> {
        self.native_complex
            .iter()
            .rev()
            .map(|r| (RuleOrigin::Native, r))
            .chain(self.user_complex.iter().rev().map(|r| (RuleOrigin::User, r)))
    }

    /// @ai:intent Find the first simple rule accepting the name for this entity category
    /// @ai:post a user rule is returned only if no native rule accepts
    /// @ai:effects pure
    pub fn find_simple_rule(
        &self,
        name: &str,
        entity: EntityKind,
    ) -> Option<&Arc<dyn SimplePropertyRule>> {
        self.simple_rules_by_precedence()
            .map(|(_, rule)| rule)
            .find(|rule| rule.is_main_prop_syntax_valid(name, entity))
    }

    /// @ai:intent Find the first complex rule accepting the main name for this entity category
    /// @ai:post a user rule is returned only if no native rule accepts
    /// @ai:effects pure
    pub fn find_complex_rule(
        &self,
        name: &str,
        entity: EntityKind,
    ) -> Option<&Arc<dyn ComplexPropertyRule>> {
        self.complex_rules_by_precedence()
            .map(|(_, rule)| rule)
            .find(|rule| rule.is_main_prop_syntax_valid(name, entity))
    }

    /// @ai:intent Describe every rule in lookup order, simple rules first
    pub fn describe(&self) -> Vec<RuleInfo> {
        let simple = self.simple_rules_by_precedence().map(|(origin, rule)| RuleInfo {
            name: rule.name().to_string(),
            description: rule.description().to_string(),
            complex: false,
            origin,
        });

        let complex = self.complex_rules_by_precedence().map(|(origin, rule)| RuleInfo {
            name: rule.name().to_string(),
            description: rule.description().to_string(),
            complex: true,
            origin,
        });

        simple.chain(complex).collect()
    }

    pub fn simple_rule_count(&self) -> usize {
        self.native_simple.len() + self.user_simple.len()
    }

    pub fn complex_rule_count(&self) -> usize {
        self.native_complex.len() + self.user_complex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simple_rule_count() == 0 && self.complex_rule_count() == 0
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("simple_rules", &self.simple_rule_count())
            .field("complex_rules", &self.complex_rule_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, &'static str);

    impl PropertyRule for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    impl SimplePropertyRule for Named {
        fn is_main_prop_syntax_valid(&self, name: &str, _entity: EntityKind) -> bool {
            name == self.1
        }
    }

    #[test]
    fn test_native_rule_wins_even_when_registered_last() {
        let user: Arc<dyn SimplePropertyRule> = Arc::new(Named("user", "Foo"));
        let native: Arc<dyn SimplePropertyRule> = Arc::new(Named("native", "Foo"));

        let mut registry = RuleRegistry::new();
        registry.register_simple_rule(user.clone());
        registry.register_native_simple_rule(native.clone());
        registry.register_simple_rule(Arc::new(Named("late-user", "Foo")));

        let found = registry.find_simple_rule("Foo", EntityKind::Class).unwrap();
        assert!(Arc::ptr_eq(found, &native));
    }

    #[test]
    fn test_newest_user_rule_first() {
        let older: Arc<dyn SimplePropertyRule> = Arc::new(Named("older", "Foo"));
        let newer: Arc<dyn SimplePropertyRule> = Arc::new(Named("newer", "Foo"));

        let mut registry = RuleRegistry::new();
        registry.register_simple_rule(older);
        registry.register_simple_rule(newer.clone());

        let found = registry.find_simple_rule("Foo", EntityKind::Class).unwrap();
        assert!(Arc::ptr_eq(found, &newer));
    }

    #[test]
    fn test_user_rule_used_when_no_native_collides() {
        let mut registry = RuleRegistry::new();
        registry.register_native_simple_rule(Arc::new(Named("native", "Bar")));
        registry.register_simple_rule(Arc::new(Named("user", "Foo")));

        let found = registry.find_simple_rule("Foo", EntityKind::Class).unwrap();
        assert_eq!(found.name(), "user");
        assert!(registry.find_simple_rule("Baz", EntityKind::Class).is_none());
    }

    #[test]
    fn test_precedence_order_reports_origin() {
        let mut registry = RuleRegistry::new();
        registry.register_simple_rule(Arc::new(Named("u1", "A")));
        registry.register_native_simple_rule(Arc::new(Named("n1", "B")));
        registry.register_native_simple_rule(Arc::new(Named("n2", "C")));

        let order: Vec<(RuleOrigin, &str)> = registry
            .simple_rules_by_precedence()
            .map(|(origin, rule)| (origin, rule.name()))
            .collect();

        assert_eq!(
            order,
            vec![
                (RuleOrigin::Native, "n2"),
                (RuleOrigin::Native, "n1"),
                (RuleOrigin::User, "u1"),
            ]
        );
    }

    #[test]
    fn test_describe_lists_natives_first() {
        let mut registry = RuleRegistry::with_native_rules();
        registry.register_simple_rule(Arc::new(Named("flag", "Flag")));

        let infos = registry.describe();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "flag");
        assert!(!infos[0].complex);
        assert_eq!(infos[1].origin, RuleOrigin::Native);
        assert!(infos[1].complex);
    }

    #[test]
    fn test_with_native_rules_is_not_empty() {
        let registry = RuleRegistry::with_native_rules();
        assert!(!registry.is_empty());
        assert_eq!(RuleRegistry::new().complex_rule_count(), 0);
    }
}
