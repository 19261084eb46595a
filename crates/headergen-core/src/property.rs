//! Properties attached to entities and the annotation parser extracting them
//!
//! The front-end hands every annotated declaration a single string of the form
//! `"<TAG><prop>, <prop>(<arg>, <arg>), ..."`. The tag tells which entity kind the
//! annotation was written for; the remainder is a separator-delimited list of
//! properties, each optionally followed by an enclosed argument list.

use crate::error::PropertyParsingError;
use serde::{Deserialize, Serialize};

/// A named, optionally parameterized annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Property {
    pub name: String,

    /// Arguments in textual order, empty when written without enclosers
    pub arguments: Vec<String>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments<I, S>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any argument equals `argument` once trimmed
    pub fn has_argument(&self, argument: &str) -> bool {
        self.arguments.iter().any(|a| a.trim() == argument)
    }

    /// Serialize back to annotation syntax
    pub fn to_annotation(&self, syntax: &PropertySyntax) -> String {
        if self.arguments.is_empty() {
            return self.name.clone();
        }

        let separator = format!("{} ", syntax.argument_separator);
        format!(
            "{}{}{}{}",
            self.name,
            syntax.argument_enclosers[0],
            self.arguments.join(&separator),
            syntax.argument_enclosers[1]
        )
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_annotation(&PropertySyntax::default()))
    }
}

/// Characters delimiting properties and their arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySyntax {
    pub property_separator: char,
    pub argument_separator: char,

    /// Opening and closing argument enclosers.
    ///
    /// Unlike `<>`, `[]` and `{}`, which only group separators when they happen
    /// to balance, an unbalanced encloser rejects the annotation.
    pub argument_enclosers: [char; 2],
}

impl Default for PropertySyntax {
    fn default() -> Self {
        Self {
            property_separator: ',',
            argument_separator: ',',
            argument_enclosers: ['(', ')'],
        }
    }
}

/// Serialize a property list back to a tagged annotation string
pub fn serialize_properties(tag: &str, properties: &[Property], syntax: &PropertySyntax) -> String {
    let separator = format!("{} ", syntax.property_separator);
    let body = properties
        .iter()
        .map(|p| p.to_annotation(syntax))
        .collect::<Vec<_>>()
        .join(&separator);

    format!("{tag}{body}")
}

/// Splits annotation strings into [`Property`] lists
#[derive(Debug, Clone, Default)]
pub struct PropertyParser {
    syntax: PropertySyntax,
}

impl PropertyParser {
    pub fn new(syntax: PropertySyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &PropertySyntax {
        &self.syntax
    }

    /// Parse an annotation string.
    ///
    /// Returns `Ok(None)` when `annotation` does not start with `tag`: the
    /// annotation belongs to another entity kind or to something unrelated.
    /// A single malformed property rejects the whole annotation.
    pub fn parse_properties(
        &self,
        annotation: &str,
        tag: &str,
    ) -> Result<Option<Vec<Property>>, PropertyParsingError> {
        let Some(body) = annotation.strip_prefix(tag) else {
            return Ok(None);
        };

        if body.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let segments = self.split_top_level(body, self.syntax.property_separator)?;

        segments
            .into_iter()
            .map(|segment| self.parse_property(segment, body))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn parse_property(&self, segment: &str, annotation: &str) -> Result<Property, PropertyParsingError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(PropertyParsingError::EmptyProperty(annotation.to_string()));
        }

        let [open, close] = self.syntax.argument_enclosers;
        let Some(open_index) = segment.find(open) else {
            return Ok(Property::new(segment));
        };

        let name = segment[..open_index].trim();
        if name.is_empty() {
            return Err(PropertyParsingError::EmptyName(segment.to_string()));
        }

        let close_index = matching_closer(segment, open_index, open, close)
            .ok_or_else(|| PropertyParsingError::Unbalanced {
                encloser: open,
                text: segment.to_string(),
            })?;

        if close_index + close.len_utf8() != segment.len() {
            return Err(PropertyParsingError::TrailingText(name.to_string()));
        }

        let inner = &segment[open_index + open.len_utf8()..close_index];
        if inner.trim().is_empty() {
            return Ok(Property::new(name));
        }

        let arguments = self
            .split_top_level(inner, self.syntax.argument_separator)?
            .into_iter()
            .map(|argument| {
                let argument = argument.trim();
                if argument.is_empty() {
                    Err(PropertyParsingError::EmptyArgument(name.to_string()))
                } else {
                    Ok(argument.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Property {
            name: name.to_string(),
            arguments,
        })
    }

    /// Split `text` on `separator`, ignoring separators nested inside the
    /// argument enclosers or quoted literals.
    ///
    /// `<>`, `[]` and `{}` also group when they balance, keeping
    /// `std::map<int, float>` whole. When they do not, as in `x > 1` or `a->b`,
    /// they are plain text. Only the argument enclosers and quotes must balance.
    fn split_top_level<'t>(
        &self,
        text: &'t str,
        separator: char,
    ) -> Result<Vec<&'t str>, PropertyParsingError> {
        match self.split_nested(text, separator, true)? {
            Some(segments) => Ok(segments),
            None => Ok(self
                .split_nested(text, separator, false)?
                .unwrap_or_else(|| vec![text])),
        }
    }

    /// `Ok(None)` when `group_brackets` is set and the brackets do not balance
    fn split_nested<'t>(
        &self,
        text: &'t str,
        separator: char,
        group_brackets: bool,
    ) -> Result<Option<Vec<&'t str>>, PropertyParsingError> {
        let [open, close] = self.syntax.argument_enclosers;
        let unbalanced = |encloser: char| PropertyParsingError::Unbalanced {
            encloser,
            text: text.to_string(),
        };
        // Expected closers, flagged when opened by a bracket
        let mut expected_closers: Vec<(char, bool)> = Vec::new();
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut segments = Vec::new();
        let mut start = 0;

        for (index, c) in text.char_indices() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            if c == open {
                expected_closers.push((close, false));
            } else if c == close {
                match expected_closers.pop() {
                    Some((_, false)) => {}
                    Some((_, true)) => return Ok(None),
                    None => return Err(unbalanced(c)),
                }
            } else if let Some(closer) = bracket_closer(c).filter(|_| group_brackets) {
                expected_closers.push((closer, true));
            } else if group_brackets && is_bracket_closer(c) {
                if expected_closers.pop() != Some((c, true)) {
                    return Ok(None);
                }
            } else if c == '"' || c == '\'' {
                quote = Some(c);
            } else if c == separator && expected_closers.is_empty() {
                segments.push(&text[start..index]);
                start = index + c.len_utf8();
            }
        }

        if let Some(q) = quote {
            return Err(unbalanced(q));
        }
        if expected_closers.iter().any(|(_, is_bracket)| *is_bracket) {
            return Ok(None);
        }
        if let Some((closer, _)) = expected_closers.pop() {
            return Err(unbalanced(closer));
        }

        segments.push(&text[start..]);
        Ok(Some(segments))
    }
}

fn bracket_closer(c: char) -> Option<char> {
    match c {
        '<' => Some('>'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn is_bracket_closer(c: char) -> bool {
    matches!(c, '>' | ']' | '}')
}

/// Byte index of the closer matching the opener at `open_index`
fn matching_closer(text: &str, open_index: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, c) in text[open_index..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_index + index);
            }
        }
    }

    None
}


#[cfg(test)]
#[path = "property/property_parameterized_tests.rs"]
mod property_parameterized_tests;
