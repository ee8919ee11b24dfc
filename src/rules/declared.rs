//! @ai:module:intent User rules declared in configuration instead of code
//! @ai:module:layer domain
//! @ai:module:public_api SimpleRuleSpec, ComplexRuleSpec, DeclaredSimpleRule, DeclaredComplexRule
//! @ai:module:depends_on rule, property, entity, error

use crate::entity::EntityKind;
use crate::error::{Error, Result};
use crate::property::PropertyGroup;
use crate::rule::{ComplexPropertyRule, PropertyRule, SimplePropertyRule};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// @ai:intent Declaration of a simple rule as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRuleSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Empty means every entity category.
    #[serde(default)]
    pub entities: Vec<EntityKind>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

/// @ai:intent Declaration of a complex rule as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexRuleSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entities: Vec<EntityKind>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub min_subs: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_subs: Option<usize>,
    /// Regex every sub-property must match in full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_pattern: Option<String>,
}

/// Constraints both declared rule kinds check against the whole group.
#[derive(Debug, Clone)]
struct GroupConstraints {
    unique: bool,
    conflicts_with: Vec<String>,
    requires: Vec<String>,
}

impl GroupConstraints {
    fn accepts(&self, own_name: &str, group: &PropertyGroup, is_duplicate: bool) -> bool {
        if self.unique && is_duplicate {
            return false;
        }

        let conflicting = self
            .conflicts_with
            .iter()
            .any(|other| other != own_name && group.contains(other));

        let missing_companion = self.requires.iter().any(|other| !group.contains(other));

        !conflicting && !missing_companion
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidRule {
            name: name.to_string(),
            message: "rule name is empty".to_string(),
        });
    }
    Ok(())
}

fn accepts_entity(entities: &[EntityKind], entity: EntityKind) -> bool {
    entities.is_empty() || entity.overlaps(entities)
}

/// @ai:intent Simple rule driven by a SimpleRuleSpec
#[derive(Debug, Clone)]
pub struct DeclaredSimpleRule {
    name: String,
    description: String,
    entities: Vec<EntityKind>,
    constraints: GroupConstraints,
}

impl DeclaredSimpleRule {
    /// @ai:intent Build the rule from its declaration
    /// @ai:post Err(InvalidRule) if the name is empty
    pub fn from_spec(spec: &SimpleRuleSpec) -> Result<Self> {
        validate_name(&spec.name)?;

        Ok(Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            entities: spec.entities.clone(),
            constraints: GroupConstraints {
                unique: spec.unique,
                conflicts_with: spec.conflicts_with.clone(),
                requires: spec.requires.clone(),
            },
        })
    }
}

impl PropertyRule for DeclaredSimpleRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
        self.constraints
            .accepts(&self.name, group, group.has_earlier_simple_duplicate(index))
    }
}

impl SimplePropertyRule for DeclaredSimpleRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool {
        name == self.name && accepts_entity(&self.entities, entity)
    }
}

/// @ai:intent Complex rule driven by a ComplexRuleSpec
#[derive(Debug, Clone)]
pub struct DeclaredComplexRule {
    name: String,
    description: String,
    entities: Vec<EntityKind>,
    constraints: GroupConstraints,
    min_subs: usize,
    max_subs: Option<usize>,
    sub_pattern: Option<Regex>,
}

impl DeclaredComplexRule {
    /// @ai:intent Build the rule from its declaration, compiling the sub-property pattern
    /// @ai:post Err(InvalidRule) on empty name, bad regex or min_subs > max_subs
    pub fn from_spec(spec: &ComplexRuleSpec) -> Result<Self> {
        validate_name(&spec.name)?;

        if let Some(max) = spec.max_subs {
            if spec.min_subs > max {
                return Err(Error::InvalidRule {
                    name: spec.name.clone(),
                    message: format!("min_subs {} exceeds max_subs {}", spec.min_subs, max),
                });
            }
        }

        let sub_pattern = spec
            .sub_pattern
            .as_deref()
            .map(|pattern| Regex::new(&format!("^(?:{})$", pattern)))
            .transpose()
            .map_err(|e| Error::InvalidRule {
                name: spec.name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            entities: spec.entities.clone(),
            constraints: GroupConstraints {
                unique: spec.unique,
                conflicts_with: spec.conflicts_with.clone(),
                requires: spec.requires.clone(),
            },
            min_subs: spec.min_subs,
            max_subs: spec.max_subs,
            sub_pattern,
        })
    }
}

impl PropertyRule for DeclaredComplexRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_property_group_valid(&self, group: &PropertyGroup, index: usize) -> bool {
        let enough_subs = group
            .complex_properties
            .get(index)
            .map_or(false, |p| p.sub_properties.len() >= self.min_subs);

        enough_subs
            && self
                .constraints
                .accepts(&self.name, group, group.has_earlier_complex_duplicate(index))
    }
}

impl ComplexPropertyRule for DeclaredComplexRule {
    fn is_main_prop_syntax_valid(&self, name: &str, entity: EntityKind) -> bool {
        name == self.name && accepts_entity(&self.entities, entity)
    }

    fn is_sub_prop_syntax_valid(&self, sub_property: &str, index: usize) -> bool {
        if self.max_subs.map_or(false, |max| index >= max) {
            return false;
        }

        match &self.sub_pattern {
            Some(pattern) => pattern.is_match(sub_property),
            None => !sub_property.is_empty(),
        }
    }
}
