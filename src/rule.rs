//! @ai:module:intent Pluggable property rule capabilities
//! @ai:module:layer domain
//! @ai:module:public_api PropertyRule, SimplePropertyRule, ComplexPropertyRule
//! @ai:module:depends_on entity, property

use crate::entity::EntityKind;
use crate::property::PropertyGroup;

/// @ai:intent Behaviour shared by every rule: identity and whole-group acceptance
pub trait PropertyRule: Send + Sync {
    /// Name shown in listings and serialized output.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// @ai:intent Decide if the property at `index` (within its own kind) is acceptable in `group`
    /// @ai:pre index < number of properties of this rule's kind in group
    /// @ai:effects pure
    fn is_property_group_valid(&self, _group: &PropertyGroup, _index: usize) -> bool {
        true
    }
}

/// @ai:intent Rule for properties made of a single name
pub trait SimplePropertyRule: PropertyRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool;
}

/// @ai:intent Rule for properties with a main name and positional sub-properties
pub trait ComplexPropertyRule: PropertyRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool;

    /// @ai:intent Validate a sub-property by its 0-based position
    fn is_sub_prop_syntax_valid(&self, sub_property: &str, index: usize) -> bool;
}
