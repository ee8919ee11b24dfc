//! @ai:module:intent Whole-group validation of assembled properties
//! @ai:module:layer application
//! @ai:module:public_api validate_group
//! @ai:module:depends_on property, error
//! @ai:module:stateless true

use crate::error::ParseError;
use crate::property::PropertyGroup;
use crate::rule::PropertyRule;

/// @ai:intent Ask every bound rule whether its property is acceptable in the group
/// @ai:post simple properties are checked before complex ones, each in source order
/// @ai:effects pure
pub fn validate_group(group: &PropertyGroup) -> Result<(), ParseError> {
    for (index, prop) in group.simple_properties.iter().enumerate() {
        if !prop.rule.is_property_group_valid(group, index) {
            tracing::debug!(property = %prop.name, index, "simple property rejected by group check");
            return Err(ParseError::InvalidSimpleProperty {
                name: prop.name.clone(),
            });
        }
    }

    for (index, prop) in group.complex_properties.iter().enumerate() {
        if !prop.rule.is_property_group_valid(group, index) {
            tracing::debug!(property = %prop.name, index, "complex property rejected by group check");
            return Err(ParseError::InvalidComplexMainProperty {
                name: prop.name.clone(),
            });
        }
    }

    Ok(())
}
