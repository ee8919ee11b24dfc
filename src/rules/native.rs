//! @ai:module:intent Native rules, always matched before user rules
//! @ai:module:layer domain
//! @ai:module:public_api GenCodeTemplateRule, register
//! @ai:module:stateless true

use crate::entity::EntityKind;
use crate::property::PropertyGroup;
use crate::registry::RuleRegistry;
use crate::rule::{ComplexPropertyRule, PropertyRule};
use std::sync::Arc;

/// @ai:intent `GenCodeTemplate(<name>)`: pick the code template used for an entity
/// @ai:invariant exactly one sub-property, at most one occurrence per group
#[derive(Debug, Default)]
pub struct GenCodeTemplateRule;

impl GenCodeTemplateRule {
    pub const NAME: &'static str = "GenCodeTemplate";
}

impl PropertyRule for GenCodeTemplateRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Select the code generation template for the entity"
    }

    fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
        let has_one_template = group
            .complex_properties
            .get(index)
            .map_or(false, |p| p.sub_properties.len() == 1);

        has_one_template && !group.has_earlier_complex_duplicate(index)
    }
}

impl ComplexPropertyRule for GenCodeTemplateRule {
    fn is_main_prop_syntax_valid(&self, name: &str, _entity: EntityKind) -> bool {
        name == Self::NAME
    }

    fn is_sub_prop_syntax_valid(&self, sub_property: &str, index: usize) -> bool {
        index == 0
            && !sub_property.is_empty()
            && sub_property
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

/// @ai:intent Install every native rule into the registry
pub fn register(registry: &mut RuleRegistry) {
    registry.register_native_complex_rule(Arc::new(GenCodeTemplateRule));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::PropertyParser;
    use crate::settings::GrammarSettings;

    fn parse(annotation: &str, registry: &RuleRegistry) -> Result<PropertyGroup, ParseError> {
        let settings = GrammarSettings::default();
        let mut parser = PropertyParser::new(&settings, registry);
        parser.get_class_properties(annotation)
    }

    #[test]
    fn test_accepts_template_on_any_entity() {
        let rule = GenCodeTemplateRule;
        for kind in EntityKind::ALL {
            assert!(rule.is_main_prop_syntax_valid("GenCodeTemplate", kind));
        }
    }

    #[test]
    fn test_template_needs_exactly_one_name() {
        let registry = RuleRegistry::with_native_rules();

        let group = parse("KGC:GenCodeTemplate(Reflected_2)", &registry).unwrap();
        assert_eq!(group.complex_properties[0].sub_properties, vec!["Reflected_2"]);

        assert!(matches!(
            parse("KGC:GenCodeTemplate()", &registry),
            Err(ParseError::InvalidComplexMainProperty { .. })
        ));
        assert!(matches!(
            parse("KGC:GenCodeTemplate(A, B)", &registry),
            Err(ParseError::InvalidComplexSubProperty { index: 1, .. })
        ));
        assert!(matches!(
            parse("KGC:GenCodeTemplate(a-b)", &registry),
            Err(ParseError::InvalidComplexSubProperty { index: 0, .. })
        ));
    }

    #[test]
    fn test_template_at_most_once() {
        let registry = RuleRegistry::with_native_rules();
        assert!(matches!(
            parse("KGC:GenCodeTemplate(A), GenCodeTemplate(B)", &registry),
            Err(ParseError::InvalidComplexMainProperty { .. })
        ));
    }

    /// User rule claiming the same syntax as the native template rule.
    struct Impostor;

    impl PropertyRule for Impostor {
        fn name(&self) -> &str {
            "impostor"
        }
    }

    impl ComplexPropertyRule for Impostor {
        fn is_main_prop_syntax_valid(&self, name: &str, _entity: EntityKind) -> bool {
            name == "GenCodeTemplate"
        }

        fn is_sub_prop_syntax_valid(&self, _sub_property: &str, _index: usize) -> bool {
            true
        }
    }

    #[test]
    fn test_user_rule_cannot_shadow_native() {
        let native: Arc<dyn ComplexPropertyRule> = Arc::new(GenCodeTemplateRule);
        let impostor: Arc<dyn ComplexPropertyRule> = Arc::new(Impostor);

        let mut registry = RuleRegistry::new();
        registry.register_complex_rule(impostor.clone());
        registry.register_native_complex_rule(native.clone());

        let group = parse("KGC:GenCodeTemplate(Foo)", &registry).unwrap();
        let bound = &group.complex_properties[0].rule;
        assert!(Arc::ptr_eq(bound, &native));
        assert!(!Arc::ptr_eq(bound, &impostor));
    }
}
