//! Member → constructor parameter binding
//!
//! Three tiers are tried in a fixed order and the first one that binds at
//! least one member wins:
//!
//! 1. **Body assignment**: `member = param`, `this->member = param` or
//!    `Class::member = param` in the constructor body.
//! 2. **Name similarity**: equal names, or one name contained in the other.
//!    Each parameter is consumed at most once.
//! 3. **Positional**: i-th member with i-th parameter.
//!
//! The tiers exist because teaching snippets are loosely written. They do not
//! model real C++ binding rules; a member set only in an initializer list, for
//! example, falls through to tier 2 or 3.

use super::model::{BindingTier, TypedName};
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Result of binding: member name → parameter name, plus the tier used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub map: FxHashMap<String, String>,
    pub tier: BindingTier,
}

/// Bind members to parameters using the tiered fallbacks
pub fn bind_members(
    class_name: &str,
    members: &[TypedName],
    params: &[TypedName],
    constructor_body: &str,
) -> Binding {
    let by_assignment = bind_by_assignment(class_name, members, params, constructor_body);
    if !by_assignment.is_empty() {
        return finish(by_assignment, BindingTier::BodyAssignment);
    }

    let by_name = bind_by_name(members, params);
    if !by_name.is_empty() {
        return finish(by_name, BindingTier::NameSimilarity);
    }

    let by_position = bind_by_position(members, params);
    if !by_position.is_empty() {
        return finish(by_position, BindingTier::Positional);
    }

    finish(FxHashMap::default(), BindingTier::Unbound)
}

fn finish(map: FxHashMap<String, String>, tier: BindingTier) -> Binding {
    debug!(%tier, bound = map.len(), "bound members");
    Binding { map, tier }
}

/// Tier 1: assignments in the constructor body
pub fn bind_by_assignment(
    class_name: &str,
    members: &[TypedName],
    params: &[TypedName],
    body: &str,
) -> FxHashMap<String, String> {
    let mut map = FxHashMap::default();
    if body.trim().is_empty() {
        return map;
    }

    for member in members {
        let m = regex::escape(&member.name);
        let class = regex::escape(class_name);
        let forms = [
            format!(r"(?:^|[^\w.>:]){m}\s*=\s*(\w+)"),
            format!(r"\bthis\s*->\s*{m}\s*=\s*(\w+)"),
            format!(r"\b{class}\s*::\s*{m}\s*=\s*(\w+)"),
        ];

        let found = forms
            .iter()
            .filter_map(|form| Regex::new(form).ok())
            .find_map(|re| {
                re.captures_iter(body)
                    .filter_map(|caps| caps.get(1))
                    .map(|value| value.as_str())
                    .find(|value| params.iter().any(|p| p.name == *value))
            });

        if let Some(param) = found {
            map.insert(member.name.clone(), param.to_string());
        }
    }

    map
}

/// Tier 2: exact name match first, then containment either way
pub fn bind_by_name(members: &[TypedName], params: &[TypedName]) -> FxHashMap<String, String> {
    let mut map = FxHashMap::default();
    let mut consumed = vec![false; params.len()];

    for member in members {
        let m = member.name.as_str();
        let exact = params
            .iter()
            .enumerate()
            .position(|(i, p)| !consumed[i] && p.name == m);
        let similar = exact.or_else(|| {
            params.iter().enumerate().position(|(i, p)| {
                !consumed[i] && (m.contains(p.name.as_str()) || p.name.contains(m))
            })
        });

        if let Some(i) = similar {
            consumed[i] = true;
            map.insert(member.name.clone(), params[i].name.clone());
        }
    }

    map
}

/// Tier 3: pair by position up to the shorter list
pub fn bind_by_position(members: &[TypedName], params: &[TypedName]) -> FxHashMap<String, String> {
    members
        .iter()
        .zip(params)
        .map(|(m, p)| (m.name.clone(), p.name.clone()))
        .collect()
}
