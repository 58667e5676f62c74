//! Query-string rewriting
//!
//! Parameters that are not touched keep their original text and position.
//! Updated and new parameters are appended after them, form-encoded, in the
//! order the updates were given.

use crate::core::RequestContext;
use std::collections::HashSet;
use url::{form_urlencoded, Url};

/// Rebuilds `url`'s query with `updates` applied and returns path plus query.
///
/// An update of `None` removes the parameter. A null value has no query-string
/// form, so it is dropped whether or not `null_is_delete` is set.
///
/// ```
/// use web_box::core::query::modify_query_string;
///
/// let url = modify_query_string(&[("a", Some("2"))], "/p?a=1&b=3", true);
/// assert_eq!(url, "/p?b=3&a=2");
/// ```
pub fn modify_query_string(updates: &[(&str, Option<&str>)], url: &str, null_is_delete: bool) -> String {
    let (path, query) = split_url(url);
    let updates = merge_updates(updates);
    let mentioned: HashSet<&str> = updates.iter().map(|(name, _)| *name).collect();

    let mut parts: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| !mentioned.contains(decoded_name(pair).as_str()))
        .map(str::to_string)
        .collect();

    for (name, value) in &updates {
        match value {
            Some(value) => parts.push(
                form_urlencoded::Serializer::new(String::new())
                    .append_pair(name, value)
                    .finish(),
            ),
            None => {
                tracing::debug!(
                    "Dropping query parameter '{}' (null_is_delete: {})",
                    name,
                    null_is_delete
                );
            }
        }
    }

    if parts.is_empty() {
        path
    } else {
        format!("{}?{}", path, parts.join("&"))
    }
}

/// [`modify_query_string`] against the URI of the current request.
pub fn modify_current_query_string(
    ctx: &RequestContext,
    updates: &[(&str, Option<&str>)],
    null_is_delete: bool,
) -> String {
    modify_query_string(updates, &ctx.uri, null_is_delete)
}

/// Splits into path and raw query, dropping the fragment. Absolute URLs lose
/// their scheme and authority. The query is taken from the input text as is.
fn split_url(url: &str) -> (String, String) {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    match Url::parse(path) {
        Ok(parsed) if parsed.has_host() => (parsed.path().to_string(), query.to_string()),
        _ => (path.to_string(), query.to_string()),
    }
}

/// Collapses repeated names: first position, last value.
fn merge_updates<'a>(updates: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut merged: Vec<(&str, Option<&str>)> = Vec::with_capacity(updates.len());
    for &(name, value) in updates {
        match merged.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => merged.push((name, value)),
        }
    }
    merged
}

fn decoded_name(pair: &str) -> String {
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}
