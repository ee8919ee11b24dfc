//! @ai:module:intent Property language front end for comment-embedded entity annotations
//! @ai:module:layer infrastructure
//! @ai:module:public_api parser, registry, rule, rules, settings, property, entity, config, batch, output, error
//! @ai:module:stateless true
//!
//! # kgprops
//!
//! Parses annotation strings such as `KGF:Getter(const, &), Setter()` attached to
//! program entities into validated property groups, matching every property
//! against a registry of pluggable rules.
//!
//! ## Example
//!
//! ```rust
//! use kgprops::{rules, EntityKind, GrammarSettings, PropertyParser, RuleRegistry};
//!
//! let settings = GrammarSettings::default();
//! let mut registry = RuleRegistry::with_native_rules();
//! rules::accessors::register(&mut registry);
//!
//! let mut parser = PropertyParser::new(&settings, &registry);
//! let group = parser
//!     .get_properties("KGF:Getter(const), Setter()", EntityKind::Field)
//!     .unwrap();
//!
//! assert_eq!(group.complex_names(), vec!["Getter", "Setter"]);
//! ```

pub mod assembler;
pub mod batch;
pub mod config;
pub mod entity;
pub mod error;
pub mod output;
pub mod parser;
pub mod property;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod settings;
pub mod splitter;
pub mod validator;

pub use batch::{check_manifest, load_manifest, BatchReport, EntityReport, Manifest};
pub use config::Config;
pub use entity::EntityKind;
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use output::{format_group, format_report, format_rules, to_json, OutputFormat};
pub use parser::PropertyParser;
pub use property::{ComplexProperty, PropertyGroup, SimpleProperty};
pub use registry::{RuleInfo, RuleOrigin, RuleRegistry};
pub use rule::{ComplexPropertyRule, PropertyRule, SimplePropertyRule};
pub use settings::GrammarSettings;
pub use splitter::{split_properties, TokenGroup};
