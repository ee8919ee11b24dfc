//! @ai:module:intent Define program entity categories and their annotation markers
//! @ai:module:layer domain
//! @ai:module:public_api EntityKind
//! @ai:module:stateless true

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// @ai:intent Category of a program entity that can carry properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Namespace,
    Class,
    Struct,
    Field,
    Method,
    Enum,
    EnumValue,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Namespace,
        EntityKind::Class,
        EntityKind::Struct,
        EntityKind::Field,
        EntityKind::Method,
        EntityKind::Enum,
        EntityKind::EnumValue,
    ];

    /// @ai:intent Get the annotation marker that introduces properties for this category
    /// @ai:example (Class) -> "KGC:"
    /// @ai:example (EnumValue) -> "KGEV:"
    /// @ai:effects pure
    pub fn marker(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "KGN:",
            EntityKind::Class => "KGC:",
            EntityKind::Struct => "KGS:",
            EntityKind::Field => "KGF:",
            EntityKind::Method => "KGM:",
            EntityKind::Enum => "KGE:",
            EntityKind::EnumValue => "KGEV:",
        }
    }

    /// @ai:intent Get the category name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "namespace",
            EntityKind::Class => "class",
            EntityKind::Struct => "struct",
            EntityKind::Field => "field",
            EntityKind::Method => "method",
            EntityKind::Enum => "enum",
            EntityKind::EnumValue => "enum-value",
        }
    }

    /// @ai:intent Detect the entity category from the marker a raw annotation starts with
    /// @ai:post longest marker wins, so "KGEV:" is never read as "KGE:"
    /// @ai:example ("KGEV:Foo") -> Some(EnumValue)
    /// @ai:example ("Foo") -> None
    /// @ai:effects pure
    pub fn from_marker(annotation: &str) -> Option<EntityKind> {
        let mut best: Option<EntityKind> = None;

        for kind in Self::ALL {
            if annotation.starts_with(kind.marker())
                && best.map_or(true, |b| kind.marker().len() > b.marker().len())
            {
                best = Some(kind);
            }
        }

        best
    }

    /// @ai:intent Check if this category is part of the given category set
    pub fn overlaps(&self, kinds: &[EntityKind]) -> bool {
        kinds.contains(self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        match normalized.as_str() {
            "namespace" => Ok(EntityKind::Namespace),
            "class" => Ok(EntityKind::Class),
            "struct" => Ok(EntityKind::Struct),
            "field" => Ok(EntityKind::Field),
            "method" => Ok(EntityKind::Method),
            "enum" => Ok(EntityKind::Enum),
            "enum-value" | "enumvalue" => Ok(EntityKind::EnumValue),
            _ => Err(Error::UnknownEntityKind(s.to_string())),
        }
    }
}
