//! Path template compilation.
//!
//! # Responsibilities
//! - Parse `:name` and `{name}` placeholders out of a path template
//! - Match everything else literally
//! - Anchor the result so only complete paths match
//! - Reject malformed templates at registration time
//!
//! # Design Decisions
//! - Compiled once into a `Regex`, never per request
//! - A placeholder captures one or more non-`/` characters
//! - Parameter names are kept in declaration order alongside the regex

use regex::Regex;

/// Error raised when a path template cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("duplicate parameter `{name}` in template `{template}`")]
    DuplicateParam { template: String, name: String },

    #[error("unbalanced placeholder at byte {position} in template `{template}`")]
    UnbalancedPlaceholder { template: String, position: usize },

    #[error("invalid parameter name `{name}` in template `{template}`")]
    InvalidName { template: String, name: String },

    #[error("invalid pattern `{template}`: {reason}")]
    InvalidRegex { template: String, reason: String },
}

/// An anchored path pattern with named capture slots.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    regex: Regex,
    names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a template using `:name` / `{name}` placeholder syntax.
    pub fn compile(template: &str) -> Result<Self, CompileError> {
        let mut source = String::with_capacity(template.len() + 16);
        let mut literal = String::new();
        let mut names: Vec<String> = Vec::new();
        let mut chars = template.char_indices().peekable();

        source.push('^');
        while let Some((position, c)) = chars.next() {
            match c {
                ':' if chars.peek().is_some_and(|&(_, n)| is_name_start(n)) => {
                    let mut name = String::new();
                    while let Some(&(_, n)) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    flush_literal(&mut source, &mut literal);
                    push_param(&mut source, &mut names, template, name)?;
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((inner, '{')) => {
                                return Err(CompileError::UnbalancedPlaceholder {
                                    template: template.to_string(),
                                    position: inner,
                                });
                            }
                            Some((_, n)) => name.push(n),
                            None => {
                                return Err(CompileError::UnbalancedPlaceholder {
                                    template: template.to_string(),
                                    position,
                                });
                            }
                        }
                    }
                    if !is_valid_name(&name) {
                        return Err(CompileError::InvalidName {
                            template: template.to_string(),
                            name,
                        });
                    }
                    flush_literal(&mut source, &mut literal);
                    push_param(&mut source, &mut names, template, name)?;
                }
                '}' => {
                    return Err(CompileError::UnbalancedPlaceholder {
                        template: template.to_string(),
                        position,
                    });
                }
                _ => literal.push(c),
            }
        }
        flush_literal(&mut source, &mut literal);
        source.push('$');

        let regex = build_regex(template, &source)?;
        Ok(Self {
            template: template.to_string(),
            regex,
            names,
        })
    }

    /// Compile an explicit named-capture regular expression.
    ///
    /// Named groups become parameters in the order they appear; unnamed
    /// groups are ignored.
    pub fn compile_regex(pattern: &str) -> Result<Self, CompileError> {
        let regex = build_regex(pattern, &format!("^(?:{})$", pattern))?;
        let names = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(Self {
            template: pattern.to_string(),
            regex,
            names,
        })
    }

    /// Match against a complete path.
    ///
    /// Returns one slot per declared parameter, in declaration order. A slot
    /// is `None` only when an optional group in an explicit regex did not
    /// take part in the match.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<Option<&'p str>>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.names
                .iter()
                .map(|name| caps.name(name).map(|m| m.as_str()))
                .collect(),
        )
    }

    /// Returns true if the whole path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

fn flush_literal(source: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        source.push_str(&regex::escape(literal));
        literal.clear();
    }
}

fn push_param(
    source: &mut String,
    names: &mut Vec<String>,
    template: &str,
    name: String,
) -> Result<(), CompileError> {
    if names.contains(&name) {
        return Err(CompileError::DuplicateParam {
            template: template.to_string(),
            name,
        });
    }
    source.push_str("(?P<");
    source.push_str(&name);
    source.push_str(">[^/]+)");
    names.push(name);
    Ok(())
}

fn build_regex(template: &str, source: &str) -> Result<Regex, CompileError> {
    Regex::new(source).map_err(|e| CompileError::InvalidRegex {
        template: template.to_string(),
        reason: e.to_string(),
    })
}
