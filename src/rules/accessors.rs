//! @ai:module:intent Getter/Setter field properties for accessor generation
//! @ai:module:layer domain
//! @ai:module:public_api GetterRule, SetterRule, register
//! @ai:module:stateless true

use crate::entity::EntityKind;
use crate::property::PropertyGroup;
use crate::registry::RuleRegistry;
use crate::rule::{ComplexPropertyRule, PropertyRule};
use std::sync::Arc;

/// Qualifiers accepted as accessor sub-properties, in any position.
pub const ACCESSOR_QUALIFIERS: [&str; 4] = ["const", "explicit", "*", "&"];

/// @ai:intent `Getter(...)` on a field, qualifiers drawn from ACCESSOR_QUALIFIERS
#[derive(Debug, Default)]
pub struct GetterRule;

/// @ai:intent `Setter(...)` on a field, qualifiers drawn from ACCESSOR_QUALIFIERS
#[derive(Debug, Default)]
pub struct SetterRule;

/// Shared group check: one accessor of a kind per field, no repeated qualifier,
/// and a getter cannot return both by pointer and by reference.
fn accessor_group_valid(group: &PropertyGroup, index: usize) -> bool {
    let Some(current) = group.complex_properties.get(index) else {
        return false;
    };

    if group.has_earlier_complex_duplicate(index) {
        return false;
    }

    let subs = &current.sub_properties;
    let repeated = subs
        .iter()
        .enumerate()
        .any(|(i, s)| subs[..i].contains(s));

    let pointer_and_reference =
        subs.iter().any(|s| s == "*") && subs.iter().any(|s| s == "&");

    !repeated && !pointer_and_reference
}

fn is_qualifier(sub_property: &str) -> bool {
    ACCESSOR_QUALIFIERS.contains(&sub_property)
}

impl PropertyRule for GetterRule {
    fn name(&self) -> &str {
        "Getter"
    }

    fn description(&self) -> &str {
        "Generate a getter for the field"
    }

    fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
        accessor_group_valid(group, index)
    }
}

impl ComplexPropertyRule for GetterRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool {
        name == "Getter" && entity == EntityKind::Field
    }

    fn is_sub_prop_syntax_valid(&self, sub_property: &str, _index: usize) -> bool {
        is_qualifier(sub_property)
    }
}

impl PropertyRule for SetterRule {
    fn name(&self) -> &str {
        "Setter"
    }

    fn description(&self) -> &str {
        "Generate a setter for the field"
    }

    fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
        accessor_group_valid(group, index)
    }
}

impl ComplexPropertyRule for SetterRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool {
        name == "Setter" && entity == EntityKind::Field
    }

    // Setters only take qualifiers that make sense for a parameter.
    fn is_sub_prop_syntax_valid(&self, sub_property: &str, _index: usize) -> bool {
        matches!(sub_property, "explicit" | "*" | "&")
    }
}

/// @ai:intent Register Getter and Setter as user rules
pub fn register(registry: &mut RuleRegistry) {
    registry.register_complex_rule(Arc::new(GetterRule));
    registry.register_complex_rule(Arc::new(SetterRule));
}
