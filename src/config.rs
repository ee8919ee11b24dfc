//! @ai:module:intent Configuration file for grammar characters and declared rules
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config
//! @ai:module:depends_on settings, registry, rules, error

use crate::error::{Error, Result};
use crate::registry::RuleRegistry;
use crate::rules::declared::{ComplexRuleSpec, DeclaredComplexRule, DeclaredSimpleRule, SimpleRuleSpec};
use crate::settings::GrammarSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Default config file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "kgprops.toml";

/// @ai:intent Top-level configuration of the property parser
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grammar: GrammarSettings,
    #[serde(default)]
    pub rules: RuleSetConfig,
    #[serde(default)]
    pub simple_rules: Vec<SimpleRuleSpec>,
    #[serde(default)]
    pub complex_rules: Vec<ComplexRuleSpec>,
}

/// @ai:intent Which built-in rule sets get registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default = "default_true")]
    pub native: bool,
    #[serde(default)]
    pub accessors: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self {
            native: true,
            accessors: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grammar: GrammarSettings::default(),
            rules: RuleSetConfig::default(),
            simple_rules: Vec::new(),
            complex_rules: Vec::new(),
        }
    }
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            simple_rules = config.simple_rules.len(),
            complex_rules = config.complex_rules.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// @ai:intent Parse configuration from TOML text; grammar settings are validated
    /// @ai:effects pure
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Build a registry with the enabled built-in rule sets and every declared rule
    /// @ai:post declared rules keep their file order as registration order
    pub fn build_registry(&self) -> Result<RuleRegistry> {
        let mut registry = if self.rules.native {
            RuleRegistry::with_native_rules()
        } else {
            RuleRegistry::new()
        };

        if self.rules.accessors {
            crate::rules::accessors::register(&mut registry);
        }

        for spec in &self.simple_rules {
            registry.register_simple_rule(Arc::new(DeclaredSimpleRule::from_spec(spec)?));
        }

        for spec in &self.complex_rules {
            registry.register_complex_rule(Arc::new(DeclaredComplexRule::from_spec(spec)?));
        }

        Ok(registry)
    }
}
