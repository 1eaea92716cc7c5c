//! Template engine for prompt variable substitution.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes `name` inline: the text is kept as is, except
//!   that `\` becomes `\\` and line breaks become `\n` / `\r`, so the value
//!   stays on one line and can be recovered exactly
//! - `{name:raw}` - Substitutes `name` verbatim, newlines preserved
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! # Error Handling
//!
//! Undefined variables are an error rather than an empty substitution, so a
//! typo in a template never silently drops user input from a prompt.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template parsing and rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable {
        /// The name of the undefined variable.
        name: String,
        /// The position in the template where the variable was found.
        position: usize,
    },
    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace {
        /// The position of the unmatched `{`.
        position: usize,
    },
    /// An empty variable name was found (e.g., `{}` or `{:raw}`).
    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName {
        /// The position of the empty variable.
        position: usize,
    },
    /// A substitution mode other than `raw` was requested.
    #[error("unknown substitution mode '{mode}' at position {position} in template")]
    UnknownMode {
        /// The mode text after the `:`.
        mode: String,
        /// The position of the placeholder.
        position: usize,
    },
}

/// How a placeholder's value is written into the rendered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Single line, line breaks and backslashes escaped.
    Inline,
    /// Verbatim, for multi-line free text.
    Raw,
}

/// A `{name}` or `{name:raw}` reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub mode: Substitution,
    /// Byte offset of the opening `{`.
    pub position: usize,
}

enum Segment {
    Literal(String),
    Variable(Placeholder),
}

fn parse(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => body.push(c),
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                }

                let (name, mode) = match body.split_once(':') {
                    Some((name, mode)) => (name.trim(), Some(mode.trim())),
                    None => (body.trim(), None),
                };

                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                let mode = match mode {
                    None => Substitution::Inline,
                    Some("raw") => Substitution::Raw,
                    Some(other) => {
                        return Err(TemplateError::UnknownMode {
                            mode: other.to_string(),
                            position: pos,
                        });
                    }
                };

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(Placeholder {
                    name: name.to_string(),
                    mode,
                    position: pos,
                }));
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` is kept as-is.
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                literal.push('}');
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// List the placeholders a template references, in order of appearance.
pub fn placeholders(template: &str) -> Result<Vec<Placeholder>, TemplateError> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Variable(p) => Some(p),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Render a template string by substituting variables.
///
/// # Examples
///
/// ```
/// use stratlify::prompt::{render_template, vars};
///
/// let vars = vars([("concept", "Summer  Glow\n"), ("notes", "line 1\nline 2")]);
/// let out = render_template("Concept: {concept}\n{notes:raw}", &vars).unwrap();
/// assert_eq!(out, "Concept: Summer  Glow\\n\nline 1\nline 2");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());

    for segment in parse(template)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(p) => {
                let value =
                    variables
                        .get(&p.name)
                        .ok_or_else(|| TemplateError::UndefinedVariable {
                            name: p.name.clone(),
                            position: p.position,
                        })?;
                match p.mode {
                    Substitution::Inline => push_inline(&mut result, value),
                    Substitution::Raw => result.push_str(value),
                }
            }
        }
    }

    Ok(result)
}

fn push_inline(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
