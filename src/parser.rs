//! @ai:module:intent Parse raw entity annotations into validated property groups
//! @ai:module:layer application
//! @ai:module:public_api PropertyParser
//! @ai:module:depends_on splitter, assembler, validator, registry, settings, entity, error
//! @ai:module:stateless false

use crate::assembler::assemble;
use crate::entity::EntityKind;
use crate::error::{ParseError, ParseErrorKind};
use crate::property::PropertyGroup;
use crate::registry::RuleRegistry;
use crate::settings::GrammarSettings;
use crate::splitter::split_properties;
use crate::validator::validate_group;

/// @ai:intent Property parser bound to grammar settings and a rule registry
/// @ai:invariant after a failed call the error slot is never `None`
///
/// One instance per worker: the error slot is unsynchronized scratch state.
#[derive(Debug)]
pub struct PropertyParser<'a> {
    settings: &'a GrammarSettings,
    registry: &'a RuleRegistry,
    parsing_error: ParseErrorKind,
}

impl<'a> PropertyParser<'a> {
    /// @ai:intent Create a parser borrowing settings and registry
    pub fn new(settings: &'a GrammarSettings, registry: &'a RuleRegistry) -> Self {
        Self {
            settings,
            registry,
            parsing_error: ParseErrorKind::None,
        }
    }

    /// @ai:intent Parse an annotation that must start with the marker of `entity`
    /// @ai:pre annotation still contains its category marker
    /// @ai:post Ok holds every property in source order; Err holds the first error
    /// @ai:example ("KGC:A,B", Class) -> Ok([A, B])
    /// @ai:example ("KGS:A", Class) -> Err(WrongPropertyMarker)
    pub fn get_properties(
        &mut self,
        annotation: &str,
        entity: EntityKind,
    ) -> Result<PropertyGroup, ParseError> {
        self.parsing_error = ParseErrorKind::None;

        let result = self.parse_annotation(annotation, entity);

        if let Err(err) = &result {
            tracing::debug!(entity = %entity, annotation, error = %err, "property parsing failed");
            self.parsing_error = err.kind();
        }

        debug_assert!(result.is_ok() || !self.parsing_error.is_none());
        result
    }

    fn parse_annotation(
        &self,
        annotation: &str,
        entity: EntityKind,
    ) -> Result<PropertyGroup, ParseError> {
        let marker = entity.marker();
        let body = annotation
            .strip_prefix(marker)
            .ok_or(ParseError::WrongPropertyMarker { expected: marker })?;

        let tokens = split_properties(body, self.settings)?;
        tracing::debug!(entity = %entity, groups = tokens.len(), "split annotation");

        let group = assemble(tokens, entity, self.registry)?;
        validate_group(&group)?;

        Ok(group)
    }

    pub fn get_namespace_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Namespace)
    }

    pub fn get_class_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Class)
    }

    pub fn get_struct_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Struct)
    }

    pub fn get_field_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Field)
    }

    pub fn get_method_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Method)
    }

    pub fn get_enum_properties(&mut self, annotation: &str) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::Enum)
    }

    pub fn get_enum_value_properties(
        &mut self,
        annotation: &str,
    ) -> Result<PropertyGroup, ParseError> {
        self.get_properties(annotation, EntityKind::EnumValue)
    }

    /// @ai:intent Error recorded by the last call, `None` after success or `clean`
    pub fn parsing_error(&self) -> ParseErrorKind {
        self.parsing_error
    }

    /// @ai:intent Reset the error slot between independent parses
    pub fn clean(&mut self) {
        self.parsing_error = ParseErrorKind::None;
    }

    pub fn settings(&self) -> &GrammarSettings {
        self.settings
    }

    pub fn registry(&self) -> &RuleRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{ComplexPropertyRule, PropertyRule, SimplePropertyRule};
    use std::sync::Arc;

    struct Simple(&'static str);

    impl PropertyRule for Simple {
        fn name(&self) -> &str {
            self.0
        }
    }

    impl SimplePropertyRule for Simple {
        fn is_main_prop_syntax_valid(&self, name: &str, _entity: EntityKind) -> bool {
            name == self.0
        }
    }

    /// Complex rule accepting any sub-property, at most once per group.
    struct OncePerGroup(&'static str);

    impl PropertyRule for OncePerGroup {
        fn name(&self) -> &str {
            self.0
        }

        fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
            !group.has_earlier_complex_duplicate(index)
        }
    }

    impl ComplexPropertyRule for OncePerGroup {
        fn is_main_prop_syntax_valid(&self, name: &str, _entity: EntityKind) -> bool {
            name == self.0
        }

        fn is_sub_prop_syntax_valid(&self, sub_property: &str, _index: usize) -> bool {
            !sub_property.is_empty()
        }
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register_simple_rule(Arc::new(Simple("A")));
        registry.register_simple_rule(Arc::new(Simple("B")));
        registry.register_complex_rule(Arc::new(OncePerGroup("Getter")));
        registry
    }

    #[test]
    fn test_every_entry_point_checks_its_marker() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        assert_eq!(parser.get_namespace_properties("KGN:A").unwrap().len(), 1);
        assert_eq!(parser.get_class_properties("KGC:A").unwrap().len(), 1);
        assert_eq!(parser.get_struct_properties("KGS:A").unwrap().len(), 1);
        assert_eq!(parser.get_field_properties("KGF:A").unwrap().len(), 1);
        assert_eq!(parser.get_method_properties("KGM:A").unwrap().len(), 1);
        assert_eq!(parser.get_enum_properties("KGE:A").unwrap().len(), 1);
        assert_eq!(parser.get_enum_value_properties("KGEV:A").unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_marker_is_reported_before_tokenizing() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        // The body would also be a tokenizer error.
        let err = parser.get_class_properties("KGS:Getter(Foo").unwrap_err();
        assert_eq!(err, ParseError::WrongPropertyMarker { expected: "KGC:" });
        assert_eq!(parser.parsing_error(), ParseErrorKind::WrongPropertyMarker);
    }

    #[test]
    fn test_enum_entry_point_rejects_enum_value_marker() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        assert!(matches!(
            parser.get_enum_properties("KGEV:A"),
            Err(ParseError::WrongPropertyMarker { .. })
        ));
    }

    #[test]
    fn test_empty_body_yields_empty_group() {
        let settings = GrammarSettings::default();
        let registry = RuleRegistry::new();
        let mut parser = PropertyParser::new(&settings, &registry);

        for kind in EntityKind::ALL {
            let group = parser.get_properties(kind.marker(), kind).unwrap();
            assert!(group.is_empty());
        }
        assert!(parser.parsing_error().is_none());
    }

    #[test]
    fn test_group_validation_rejects_second_occurrence() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        assert!(parser.get_field_properties("KGF:Getter(x)").is_ok());

        let err = parser
            .get_field_properties("KGF:Getter(x), A, Getter(y)")
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidComplexMainProperty {
                name: "Getter".to_string()
            }
        );
    }

    #[test]
    fn test_every_failure_sets_error_slot() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        let cases = [
            ("KGS:A", ParseErrorKind::WrongPropertyMarker),
            ("KGC:Z", ParseErrorKind::InvalidSimpleProperty),
            ("KGC:Nope(x)", ParseErrorKind::InvalidComplexMainProperty),
            ("KGC:Getter(x,)", ParseErrorKind::InvalidComplexSubProperty),
            ("KGC:Getter(x", ParseErrorKind::SubPropertyEndEncloserMissing),
            ("KGC:Getter(x)A", ParseErrorKind::PropertySeparatorMissing),
            ("KGC:Getter(x),Getter(y)", ParseErrorKind::InvalidComplexMainProperty),
        ];

        for (annotation, expected) in cases {
            let result = parser.get_class_properties(annotation);
            assert!(result.is_err(), "{} should fail", annotation);
            assert_eq!(parser.parsing_error(), expected, "{}", annotation);
            assert_eq!(result.unwrap_err().kind(), expected);
        }
    }

    #[test]
    fn test_error_slot_reset_on_next_call_and_clean() {
        let settings = GrammarSettings::default();
        let registry = registry();
        let mut parser = PropertyParser::new(&settings, &registry);

        assert!(parser.get_class_properties("KGC:Z").is_err());
        assert!(!parser.parsing_error().is_none());
        parser.clean();
        assert!(parser.parsing_error().is_none());

        assert!(parser.get_class_properties("KGC:Z").is_err());
        assert!(parser.get_class_properties("KGC:A, B").is_ok());
        assert!(parser.parsing_error().is_none());
    }
}
