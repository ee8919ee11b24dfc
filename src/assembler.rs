//! @ai:module:intent Bind token groups to rules and build a property group
//! @ai:module:layer application
//! @ai:module:public_api assemble
//! @ai:module:depends_on registry, splitter, property, error
//! @ai:module:stateless true

use crate::entity::EntityKind;
use crate::error::ParseError;
use crate::property::{ComplexProperty, PropertyGroup, SimpleProperty};
use crate::registry::RuleRegistry;
use crate::rule::ComplexPropertyRule;
use crate::splitter::TokenGroup;

/// @ai:intent Classify each token group and bind it to the first accepting rule
/// @ai:post on error no partially filled group is returned
/// @ai:effects pure
pub fn assemble(
    groups: Vec<TokenGroup>,
    entity: EntityKind,
    registry: &RuleRegistry,
) -> Result<PropertyGroup, ParseError> {
    let mut property_group = PropertyGroup::default();

    for group in groups {
        if group.is_simple() {
            property_group
                .simple_properties
                .push(simple_property(group, entity, registry)?);
        } else {
            property_group
                .complex_properties
                .push(complex_property(group, entity, registry)?);
        }
    }

    Ok(property_group)
}

fn simple_property(
    group: TokenGroup,
    entity: EntityKind,
    registry: &RuleRegistry,
) -> Result<SimpleProperty, ParseError> {
    let name = group.main();

    match registry.find_simple_rule(name, entity) {
        Some(rule) => Ok(SimpleProperty::new(name, rule.clone())),
        None => Err(ParseError::InvalidSimpleProperty {
            name: name.to_string(),
        }),
    }
}

fn complex_property(
    group: TokenGroup,
    entity: EntityKind,
    registry: &RuleRegistry,
) -> Result<ComplexProperty, ParseError> {
    let mut tokens = group.into_tokens().into_iter();
    let name = tokens.next().unwrap_or_default();
    let subs: Vec<String> = tokens.collect();

    let rule = registry
        .find_complex_rule(&name, entity)
        .ok_or_else(|| ParseError::InvalidComplexMainProperty { name: name.clone() })?;

    // "Name()" is shorthand for no sub-properties at all.
    let shorthand_empty = subs.len() == 1 && subs[0].is_empty();

    let mut property = ComplexProperty::new(name, rule.clone());

    for (index, sub) in subs.into_iter().enumerate() {
        if rule.is_sub_prop_syntax_valid(&sub, index) {
            property.sub_properties.push(sub);
        } else if !shorthand_empty {
            return Err(ParseError::InvalidComplexSubProperty {
                property: property.name,
                index,
                value: sub,
            });
        }
    }

    Ok(property)
}
