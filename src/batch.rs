//! @ai:module:intent Parse the annotations of many entities and report failures per entity
//! @ai:module:layer application
//! @ai:module:public_api Manifest, EntityEntry, EntityReport, BatchReport, check_manifest, load_manifest
//! @ai:module:depends_on parser, entity, error

use crate::entity::EntityKind;
use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::parser::PropertyParser;
use crate::property::PropertyGroup;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent List of entities with their raw annotations, as produced by a source walker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityEntry>,
}

/// @ai:intent One entity: name, optional category and raw annotation text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityEntry {
    pub name: String,
    /// Inferred from the annotation marker when absent.
    #[serde(default)]
    pub kind: Option<EntityKind>,
    pub annotation: String,
}

/// @ai:intent Outcome of parsing one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub kind: Option<EntityKind>,
    pub annotation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyGroup>,
    pub error_kind: ParseErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// @ai:intent Outcome of parsing every entity of a manifest
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub entities: Vec<EntityReport>,
    pub passed: usize,
    pub failed: usize,
}

impl EntityReport {
    pub fn is_ok(&self) -> bool {
        self.error_kind.is_none()
    }
}

impl BatchReport {
    /// @ai:intent Check if every entity parsed
    pub fn passed(&self) -> bool {
        self.failed == 0
    }

    fn push(&mut self, report: EntityReport) {
        if report.is_ok() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.entities.push(report);
    }
}

/// @ai:intent Load a manifest from a TOML file
/// @ai:effects fs:read
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

/// @ai:intent Parse every entity with one parser, cleaning its error slot in between
/// @ai:post one report per entry, in manifest order
pub fn check_manifest(manifest: &Manifest, parser: &mut PropertyParser<'_>) -> BatchReport {
    let mut report = BatchReport::default();

    for entry in &manifest.entities {
        parser.clean();

        let kind = entry
            .kind
            .or_else(|| EntityKind::from_marker(&entry.annotation));

        let outcome = match kind {
            Some(kind) => parser.get_properties(&entry.annotation, kind),
            None => Err(ParseError::WrongPropertyMarker {
                expected: "a known entity marker",
            }),
        };

        let entity_report = match outcome {
            Ok(group) => EntityReport {
                name: entry.name.clone(),
                kind,
                annotation: entry.annotation.clone(),
                properties: Some(group),
                error_kind: ParseErrorKind::None,
                error: None,
            },
            Err(err) => {
                tracing::warn!(
                    entity = %entry.name,
                    annotation = %entry.annotation,
                    error = %err,
                    "rejected annotation"
                );
                EntityReport {
                    name: entry.name.clone(),
                    kind,
                    annotation: entry.annotation.clone(),
                    properties: None,
                    error_kind: err.kind(),
                    error: Some(err.to_string()),
                }
            }
        };

        report.push(entity_report);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RuleRegistry;
    use crate::settings::GrammarSettings;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"
[[entity]]
name = "Player"
annotation = "KGC:GenCodeTemplate(Reflected)"

[[entity]]
name = "Player::health"
kind = "field"
annotation = "KGF:Getter(const)"

[[entity]]
name = "Color"
kind = "enum"
annotation = "KGEV:GenCodeTemplate(X)"

[[entity]]
name = "Mystery"
annotation = "Foo"
"#;

    #[test]
    fn test_check_manifest() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.entities.len(), 4);

        let settings = GrammarSettings::default();
        let registry = RuleRegistry::with_native_rules();
        let mut parser = PropertyParser::new(&settings, &registry);

        let report = check_manifest(&manifest, &mut parser);

        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 3);
        assert!(!report.passed());

        assert_eq!(report.entities[0].kind, Some(EntityKind::Class));
        assert!(report.entities[0].is_ok());
        assert_eq!(
            report.entities[1].error_kind,
            ParseErrorKind::InvalidComplexMainProperty
        );
        assert_eq!(report.entities[2].error_kind, ParseErrorKind::WrongPropertyMarker);
        assert_eq!(report.entities[3].kind, None);
        assert_eq!(report.entities[3].error_kind, ParseErrorKind::WrongPropertyMarker);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest: Manifest = toml::from_str("").unwrap();
        let settings = GrammarSettings::default();
        let registry = RuleRegistry::new();
        let mut parser = PropertyParser::new(&settings, &registry);

        let report = check_manifest(&manifest, &mut parser);
        assert!(report.passed());
        assert!(report.entities.is_empty());
    }
}
