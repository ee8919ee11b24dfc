//! @ai:module:intent Grammar characters of the property language
//! @ai:module:layer domain
//! @ai:module:public_api GrammarSettings
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// @ai:intent Special characters driving the property tokenizer
/// @ai:invariant structural characters are distinct and never ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrammarSettings", into = "RawGrammarSettings")]
pub struct GrammarSettings {
    property_separator: char,
    sub_property_open: char,
    sub_property_close: char,
    sub_property_separator: char,
    ignored_characters: Vec<char>,
}

/// Unvalidated on-disk shape of [`GrammarSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGrammarSettings {
    #[serde(default = "default_property_separator")]
    property_separator: char,
    #[serde(default = "default_sub_property_enclosers")]
    sub_property_enclosers: [char; 2],
    #[serde(default = "default_sub_property_separator")]
    sub_property_separator: char,
    #[serde(default = "default_ignored_characters")]
    ignored_characters: String,
}

fn default_property_separator() -> char {
    ','
}

fn default_sub_property_enclosers() -> [char; 2] {
    ['(', ')']
}

fn default_sub_property_separator() -> char {
    ','
}

fn default_ignored_characters() -> String {
    " ".to_string()
}

impl Default for GrammarSettings {
    fn default() -> Self {
        Self {
            property_separator: default_property_separator(),
            sub_property_open: '(',
            sub_property_close: ')',
            sub_property_separator: default_sub_property_separator(),
            ignored_characters: vec![' '],
        }
    }
}

impl TryFrom<RawGrammarSettings> for GrammarSettings {
    type Error = Error;

    fn try_from(raw: RawGrammarSettings) -> Result<Self> {
        let [open, close] = raw.sub_property_enclosers;
        GrammarSettings::new(
            raw.property_separator,
            (open, close),
            raw.sub_property_separator,
            raw.ignored_characters.chars(),
        )
    }
}

impl From<GrammarSettings> for RawGrammarSettings {
    fn from(settings: GrammarSettings) -> Self {
        Self {
            property_separator: settings.property_separator,
            sub_property_enclosers: [settings.sub_property_open, settings.sub_property_close],
            sub_property_separator: settings.sub_property_separator,
            ignored_characters: settings.ignored_characters.into_iter().collect(),
        }
    }
}

impl GrammarSettings {
    /// @ai:intent Build validated grammar settings
    /// @ai:pre property separator, open and close enclosers are pairwise distinct
    /// @ai:pre sub-property separator differs from both enclosers
    /// @ai:pre no structural character is ignored
    /// @ai:post Err(InvalidSettings) when a precondition is violated
    /// @ai:effects pure
    pub fn new(
        property_separator: char,
        sub_property_enclosers: (char, char),
        sub_property_separator: char,
        ignored_characters: impl IntoIterator<Item = char>,
    ) -> Result<Self> {
        let (open, close) = sub_property_enclosers;

        let mut ignored: Vec<char> = Vec::new();
        for c in ignored_characters {
            if !ignored.contains(&c) {
                ignored.push(c);
            }
        }

        let settings = Self {
            property_separator,
            sub_property_open: open,
            sub_property_close: close,
            sub_property_separator,
            ignored_characters: ignored,
        };
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let structural = [
            ("property separator", self.property_separator),
            ("sub-property open encloser", self.sub_property_open),
            ("sub-property close encloser", self.sub_property_close),
        ];

        for (i, (name_a, a)) in structural.iter().enumerate() {
            for (name_b, b) in &structural[i + 1..] {
                if a == b {
                    return Err(Error::InvalidSettings(format!(
                        "{} and {} are both `{}`",
                        name_a, name_b, a
                    )));
                }
            }
        }

        if self.sub_property_separator == self.sub_property_open
            || self.sub_property_separator == self.sub_property_close
        {
            return Err(Error::InvalidSettings(format!(
                "sub-property separator `{}` collides with an encloser",
                self.sub_property_separator
            )));
        }

        let all_structural = structural
            .iter()
            .map(|(name, c)| (*name, *c))
            .chain(std::iter::once(("sub-property separator", self.sub_property_separator)));

        for (name, c) in all_structural {
            if self.ignored_characters.contains(&c) {
                return Err(Error::InvalidSettings(format!(
                    "{} `{}` is also an ignored character",
                    name, c
                )));
            }
        }

        Ok(())
    }

    pub fn property_separator(&self) -> char {
        self.property_separator
    }

    pub fn sub_property_open(&self) -> char {
        self.sub_property_open
    }

    pub fn sub_property_close(&self) -> char {
        self.sub_property_close
    }

    pub fn sub_property_separator(&self) -> char {
        self.sub_property_separator
    }

    pub fn ignored_characters(&self) -> &[char] {
        &self.ignored_characters
    }

    /// @ai:intent Check if a character is stripped before tokenizing
    pub fn is_ignored(&self, c: char) -> bool {
        self.ignored_characters.contains(&c)
    }

    /// @ai:intent Remove every ignored character, keeping the order of the rest
    /// @ai:post result contains no ignored character; applying it twice changes nothing
    /// @ai:effects pure
    pub fn strip_ignored(&self, text: &str) -> String {
        text.chars().filter(|c| !self.is_ignored(*c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = GrammarSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.property_separator(), ',');
        assert_eq!(settings.sub_property_open(), '(');
        assert_eq!(settings.sub_property_close(), ')');
    }

    #[test]
    fn test_rejects_separator_equal_to_encloser() {
        let result = GrammarSettings::new('(', ('(', ')'), ',', [' ']);
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_ignored_structural_character() {
        let result = GrammarSettings::new(',', ('(', ')'), ';', [' ', ';']);
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_sub_separator_equal_to_encloser() {
        let result = GrammarSettings::new(',', ('[', ']'), ']', []);
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_allows_shared_separators() {
        let settings = GrammarSettings::new(';', ('<', '>'), ';', [' ', '\t']).unwrap();
        assert_eq!(settings.sub_property_separator(), ';');
        assert_eq!(settings.ignored_characters(), &[' ', '\t']);
    }

    #[test]
    fn test_strip_ignored_is_idempotent() {
        let settings = GrammarSettings::new(',', ('(', ')'), ',', [' ', '\t', '\n']).unwrap();
        let once = settings.strip_ignored(" Getter ( const,\t* ) ,\nFoo ");
        assert_eq!(once, "Getter(const,*),Foo");
        assert_eq!(settings.strip_ignored(&once), once);
    }

    #[test]
    fn test_deserialize_validates() {
        let bad: std::result::Result<GrammarSettings, _> =
            toml::from_str("property_separator = \"(\"");
        assert!(bad.is_err());

        let good: GrammarSettings =
            toml::from_str("property_separator = \";\"\nignored_characters = \" \\t\"").unwrap();
        assert_eq!(good.property_separator(), ';');
        assert!(good.is_ignored('\t'));
    }
}
