//! Templated route matching.
//!
//! # Responsibilities
//! - Locate a template's prefix in the incoming path
//! - Require exactly one remaining segment per template variable
//! - Bind segments to variables by position
//! - Pick the first registered template that matches
//!
//! # Design Decisions
//! - Prefix located by containment by default (`PrefixMatch::Contains`);
//!   `PrefixMatch::Anchored` requires it to be the leading segments
//! - Empty segments never bind, so a trailing slash does not match
//! - Matching produces a fresh `ResolvedRoute` and never touches the shared template

use std::sync::Arc;

use crate::config::PrefixMatch;
use crate::routing::params::RouteParams;
use crate::routing::table::{ResolvedRoute, RouteTemplate};
use crate::routing::template::PathTemplate;

/// Text of `path` after the template prefix, or `None` if the prefix is absent.
fn remainder<'a>(prefix: &str, path: &'a str, mode: PrefixMatch) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    match mode {
        PrefixMatch::Contains => path.find(prefix).map(|idx| &path[idx + prefix.len()..]),
        PrefixMatch::Anchored => {
            let trimmed = path.strip_prefix('/').unwrap_or(path);
            let rest = trimmed.strip_prefix(prefix)?;
            (rest.is_empty() || rest.starts_with('/')).then_some(rest)
        }
    }
}

/// Bind `path` against one template.
pub fn match_template(template: &PathTemplate, path: &str, mode: PrefixMatch) -> Option<RouteParams> {
    let rest = remainder(template.prefix(), path, mode)?;

    // The piece before the first '/' belongs to the prefix region.
    let segments: Vec<&str> = rest.split('/').skip(1).collect();
    let variables = template.variables();
    if segments.len() != variables.len() || segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    let mut params = RouteParams::new();
    for (variable, value) in variables.iter().zip(segments) {
        params.push(variable.name.clone(), value);
    }
    Some(params)
}

/// First template, in registration order, that matches `path`.
pub fn find_match(
    templates: &[Arc<RouteTemplate>],
    path: &str,
    mode: PrefixMatch,
) -> Option<ResolvedRoute> {
    templates.iter().find_map(|route| {
        let params = match_template(&route.template, path, mode)?;
        let concrete_path = route.template.substitute(&params);
        Some(ResolvedRoute {
            template: route.clone(),
            params,
            concrete_path,
        })
    })
}
