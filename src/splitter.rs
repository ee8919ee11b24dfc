//! @ai:module:intent Split an annotation body into property token groups
//! @ai:module:layer application
//! @ai:module:public_api TokenGroup, split_properties
//! @ai:module:depends_on settings, error
//! @ai:module:stateless true

use crate::error::ParseError;
use crate::settings::GrammarSettings;

/// @ai:intent Raw fragments of one property: main token first, then sub-tokens in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup {
    tokens: Vec<String>,
}

impl TokenGroup {
    fn new(main: &str) -> Self {
        Self {
            tokens: vec![main.to_string()],
        }
    }

    fn push_sub(&mut self, sub: &str) {
        self.tokens.push(sub.to_string());
    }

    pub fn main(&self) -> &str {
        &self.tokens[0]
    }

    pub fn subs(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// @ai:intent A group with a single fragment is a simple property candidate
    pub fn is_simple(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// @ai:intent Tokenize an annotation body (marker already stripped) into token groups
/// @ai:pre settings are validated
/// @ai:post groups appear in source order; sub-tokens keep their positions
/// @ai:example ("A,B") -> [[A], [B]]
/// @ai:example ("Getter(Foo,Bar)") -> [[Getter, Foo, Bar]]
/// @ai:example ("Getter(Foo") -> Err(SubPropertyEndEncloserMissing)
/// @ai:effects pure
pub fn split_properties(
    body: &str,
    settings: &GrammarSettings,
) -> Result<Vec<TokenGroup>, ParseError> {
    let cleaned = settings.strip_ignored(body);

    let separator = settings.property_separator();
    let open = settings.sub_property_open();
    let close = settings.sub_property_close();
    let sub_separator = settings.sub_property_separator();

    let mut groups = Vec::new();
    // Complex group whose sub-properties are still being read.
    let mut pending: Option<TokenGroup> = None;
    let mut rest: &str = &cleaned;

    while !rest.is_empty() {
        match pending.as_mut() {
            None => match find_first_of(rest, separator, open) {
                None => {
                    groups.push(TokenGroup::new(rest));
                    rest = "";
                }
                Some((idx, found)) if found == separator => {
                    groups.push(TokenGroup::new(&rest[..idx]));
                    rest = &rest[idx + found.len_utf8()..];
                }
                Some((idx, found)) => {
                    pending = Some(TokenGroup::new(&rest[..idx]));
                    rest = &rest[idx + found.len_utf8()..];
                }
            },
            Some(group) => match find_first_of(rest, sub_separator, close) {
                None => return Err(ParseError::SubPropertyEndEncloserMissing),
                Some((idx, found)) if found == sub_separator => {
                    group.push_sub(&rest[..idx]);
                    rest = &rest[idx + found.len_utf8()..];
                }
                Some((idx, found)) => {
                    let after = &rest[idx + found.len_utf8()..];

                    let next_rest = match after.chars().next() {
                        None => after,
                        Some(next) if next == separator => &after[next.len_utf8()..],
                        Some(_) => return Err(ParseError::PropertySeparatorMissing),
                    };

                    group.push_sub(&rest[..idx]);
                    if let Some(done) = pending.take() {
                        groups.push(done);
                    }
                    rest = next_rest;
                }
            },
        }
    }

    if pending.is_some() {
        return Err(ParseError::SubPropertyEndEncloserMissing);
    }

    Ok(groups)
}

/// @ai:intent Find the first occurrence of either character, with its byte offset
/// @ai:effects pure
fn find_first_of(text: &str, a: char, b: char) -> Option<(usize, char)> {
    text.char_indices().find(|(_, c)| *c == a || *c == b)
}
