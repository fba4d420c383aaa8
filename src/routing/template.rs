//! Route template parsing.
//!
//! # Responsibilities
//! - Decide whether a registration path is static or templated
//! - Extract the fixed prefix (text before the first `{name}`, outer slashes trimmed)
//! - Extract the ordered variable names
//! - Reject malformed templates (unbalanced braces, empty or non-word names, duplicates)
//!
//! # Design Decisions
//! - Variables are `{name}` where `name` is one or more word characters
//! - A template with a variable as its first segment has an empty prefix
//! - Parsed templates are immutable; matching never writes back into them

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::error::RouteError;
use crate::routing::params::RouteParams;

static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w*)\}").expect("variable regex should be valid"));

/// One `{name}` marker in a template, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    /// Zero-based position among the template's variables.
    pub position: usize,
    /// Variable name without braces.
    pub name: Arc<str>,
}

/// A parsed templated path such as `/users/{id}/posts/{postId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    prefix: String,
    variables: Vec<TemplateVariable>,
}

/// Outcome of parsing a registration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    /// No variable markers: an exact path.
    Static(String),
    /// One or more variable markers.
    Template(PathTemplate),
}

/// Parse a registration path into a static path or a template.
pub fn parse_path(path: &str) -> Result<ParsedPath, RouteError> {
    check_braces(path)?;

    if !path.contains('{') {
        return Ok(ParsedPath::Static(path.to_string()));
    }

    let mut variables: Vec<TemplateVariable> = Vec::new();
    for (position, captures) in VARIABLE_REGEX.captures_iter(path).enumerate() {
        let name = &captures[1];
        if name.is_empty() {
            return Err(malformed(path, "empty variable name"));
        }
        if variables.iter().any(|v| &*v.name == name) {
            return Err(RouteError::DuplicateVariable {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        variables.push(TemplateVariable {
            position,
            name: Arc::from(name),
        });
    }

    // Balanced braces whose contents are not word characters never match the regex.
    if variables.len() != path.matches('{').count() {
        return Err(malformed(path, "variable names must be word characters"));
    }

    let head = VARIABLE_REGEX.split(path).next().unwrap_or_default();
    let head = head.strip_prefix('/').unwrap_or(head);
    let prefix = head.strip_suffix('/').unwrap_or(head);

    Ok(ParsedPath::Template(PathTemplate {
        source: path.to_string(),
        prefix: prefix.to_string(),
        variables,
    }))
}

fn check_braces(path: &str) -> Result<(), RouteError> {
    let mut open = false;
    for c in path.chars() {
        match c {
            '{' if open => return Err(malformed(path, "nested '{'")),
            '{' => open = true,
            '}' if !open => return Err(malformed(path, "unbalanced '}'")),
            '}' => open = false,
            _ => {}
        }
    }
    if open {
        return Err(malformed(path, "unclosed '{'"));
    }
    Ok(())
}

fn malformed(path: &str, reason: &'static str) -> RouteError {
    RouteError::MalformedTemplate {
        path: path.to_string(),
        reason,
    }
}

impl PathTemplate {
    /// Parse a path that must contain at least one variable.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        match parse_path(path)? {
            ParsedPath::Template(template) => Ok(template),
            ParsedPath::Static(_) => Err(malformed(path, "no variables declared")),
        }
    }

    /// The template exactly as registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Literal text before the first variable, outer slashes trimmed.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Replace each `{name}` in the source with its bound value.
    ///
    /// Names without a value are left as-is.
    pub fn substitute(&self, params: &RouteParams) -> String {
        VARIABLE_REGEX
            .replace_all(&self.source, |caps: &regex::Captures<'_>| {
                params
                    .get(&caps[1])
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
