//! @ai:module:intent Define parsed property records and property groups
//! @ai:module:layer domain
//! @ai:module:public_api SimpleProperty, ComplexProperty, PropertyGroup
//! @ai:module:depends_on rule
//! @ai:module:stateless true

use crate::rule::{ComplexPropertyRule, PropertyRule, SimplePropertyRule};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// @ai:intent A name-only property bound to the rule that accepted it
#[derive(Clone, Serialize)]
pub struct SimpleProperty {
    pub name: String,
    #[serde(serialize_with = "serialize_simple_rule")]
    pub rule: Arc<dyn SimplePropertyRule>,
}

/// @ai:intent A property with ordered sub-properties bound to the rule that accepted it
#[derive(Clone, Serialize)]
pub struct ComplexProperty {
    pub name: String,
    pub sub_properties: Vec<String>,
    #[serde(serialize_with = "serialize_complex_rule")]
    pub rule: Arc<dyn ComplexPropertyRule>,
}

/// @ai:intent Every property parsed for one entity, each kind kept in source order
#[derive(Clone, Default, Serialize)]
pub struct PropertyGroup {
    pub simple_properties: Vec<SimpleProperty>,
    pub complex_properties: Vec<ComplexProperty>,
}

fn serialize_simple_rule<S: Serializer>(
    rule: &Arc<dyn SimplePropertyRule>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(rule.name())
}

fn serialize_complex_rule<S: Serializer>(
    rule: &Arc<dyn ComplexPropertyRule>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(rule.name())
}

impl SimpleProperty {
    pub fn new(name: impl Into<String>, rule: Arc<dyn SimplePropertyRule>) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

impl ComplexProperty {
    pub fn new(name: impl Into<String>, rule: Arc<dyn ComplexPropertyRule>) -> Self {
        Self {
            name: name.into(),
            sub_properties: Vec::new(),
            rule,
        }
    }
}

impl fmt::Debug for SimpleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleProperty")
            .field("name", &self.name)
            .field("rule", &self.rule.name())
            .finish()
    }
}

impl fmt::Debug for ComplexProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexProperty")
            .field("name", &self.name)
            .field("sub_properties", &self.sub_properties)
            .field("rule", &self.rule.name())
            .finish()
    }
}

impl fmt::Debug for PropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyGroup")
            .field("simple_properties", &self.simple_properties)
            .field("complex_properties", &self.complex_properties)
            .finish()
    }
}

impl PropertyGroup {
    pub fn is_empty(&self) -> bool {
        self.simple_properties.is_empty() && self.complex_properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.simple_properties.len() + self.complex_properties.len()
    }

    /// @ai:intent Check if a property with this name exists, simple or complex
    /// @ai:effects pure
    pub fn contains(&self, name: &str) -> bool {
        self.find_simple(name).is_some() || self.find_complex(name).is_some()
    }

    pub fn find_simple(&self, name: &str) -> Option<&SimpleProperty> {
        self.simple_properties.iter().find(|p| p.name == name)
    }

    pub fn find_complex(&self, name: &str) -> Option<&ComplexProperty> {
        self.complex_properties.iter().find(|p| p.name == name)
    }

    /// @ai:intent Check if a simple property before `index` shares its name
    /// @ai:post false when index is out of range
    pub fn has_earlier_simple_duplicate(&self, index: usize) -> bool {
        match self.simple_properties.get(index) {
            Some(current) => self.simple_properties[..index]
                .iter()
                .any(|p| p.name == current.name),
            None => false,
        }
    }

    /// @ai:intent Check if a complex property before `index` shares its name
    /// @ai:post false when index is out of range
    pub fn has_earlier_complex_duplicate(&self, index: usize) -> bool {
        match self.complex_properties.get(index) {
            Some(current) => self.complex_properties[..index]
                .iter()
                .any(|p| p.name == current.name),
            None => false,
        }
    }

    pub fn simple_names(&self) -> Vec<&str> {
        self.simple_properties.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn complex_names(&self) -> Vec<&str> {
        self.complex_properties.iter().map(|p| p.name.as_str()).collect()
    }
}

impl fmt::Display for ComplexProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.sub_properties.join(", "))
    }
}

/// Canonical annotation body: simple properties first, then complex ones.
impl fmt::Display for PropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for prop in &self.simple_properties {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(&prop.name)?;
            first = false;
        }

        for prop in &self.complex_properties {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", prop)?;
            first = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    struct AnyName;

    impl PropertyRule for AnyName {
        fn name(&self) -> &str {
            "any"
        }
    }

    impl SimplePropertyRule for AnyName {
        fn is_main_prop_syntax_valid(&self, _name: &str, _entity: EntityKind) -> bool {
            true
        }
    }

    impl ComplexPropertyRule for AnyName {
        fn is_main_prop_syntax_valid(&self, _name: &str, _entity: EntityKind) -> bool {
            true
        }

        fn is_sub_prop_syntax_valid(&self, _sub_property: &str, _index: usize) -> bool {
            true
        }
    }

    fn sample_group() -> PropertyGroup {
        let rule = Arc::new(AnyName);
        let mut getter = ComplexProperty::new("Getter", rule.clone());
        getter.sub_properties = vec!["const".to_string(), "*".to_string()];

        PropertyGroup {
            simple_properties: vec![
                SimpleProperty::new("A", rule.clone()),
                SimpleProperty::new("B", rule.clone()),
                SimpleProperty::new("A", rule.clone()),
            ],
            complex_properties: vec![getter, ComplexProperty::new("Setter", rule)],
        }
    }

    #[test]
    fn test_display_canonical_form() {
        assert_eq!(sample_group().to_string(), "A, B, A, Getter(const, *), Setter()");
        assert_eq!(PropertyGroup::default().to_string(), "");
    }

    #[test]
    fn test_lookup_helpers() {
        let group = sample_group();
        assert_eq!(group.len(), 5);
        assert!(group.contains("Setter"));
        assert!(group.contains("B"));
        assert!(!group.contains("C"));
        assert!(!group.has_earlier_simple_duplicate(0));
        assert!(group.has_earlier_simple_duplicate(2));
        assert!(!group.has_earlier_complex_duplicate(1));
        assert!(!group.has_earlier_complex_duplicate(9));
    }

    #[test]
    fn test_serializes_rule_by_name() {
        let json = serde_json::to_value(sample_group()).unwrap();
        assert_eq!(json["simple_properties"][0]["rule"], "any");
        assert_eq!(json["complex_properties"][0]["sub_properties"][1], "*");
    }
}
