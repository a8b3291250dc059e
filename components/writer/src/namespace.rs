//! Prefix invention for namespace URIs
//!
//! Prefixes are derived from the namespace URI alone and are bound once per
//! document, so the same URI always gets the same prefix regardless of how
//! the source spelled it.

use std::collections::HashMap;

use crate::chars::is_ncname;

pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Candidate prefix for a namespace URI.
///
/// Uses the last path or URN segment when it is an NCName, `_` otherwise.
/// Candidates starting with `xml` are reserved and get a leading `_`.
pub fn derive_prefix(uri: &str) -> String {
    let trimmed = uri.trim_end_matches(|c: char| c == '/' || c == ':');
    let segment = trimmed
        .rsplit(|c: char| c == '/' || c == ':')
        .next()
        .unwrap_or_default();
    let prefix = if is_ncname(segment) { segment } else { "_" };
    if prefix
        .get(..3)
        .map_or(false, |start| start.eq_ignore_ascii_case("xml"))
    {
        format!("_{}", prefix)
    } else {
        prefix.to_string()
    }
}

/// Document scoped URI to prefix bindings plus the declarations currently in
/// scope.
#[derive(Default)]
pub struct Namespaces {
    prefixes: HashMap<String, String>,
    uris: HashMap<String, String>,
    in_scope: Vec<String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix bound to `uri`, binding a fresh one on first use.
    pub fn prefix(&mut self, uri: &str) -> &str {
        if !self.prefixes.contains_key(uri) {
            let candidate = derive_prefix(uri);
            let mut prefix = candidate.clone();
            let mut seq = 0;
            while self.uris.contains_key(&prefix) {
                seq += 1;
                prefix = format!("{}_{}", candidate, seq);
            }
            self.uris.insert(prefix.clone(), uri.to_string());
            self.prefixes.insert(uri.to_string(), prefix);
        }
        &self.prefixes[uri]
    }

    pub fn is_declared(&self, uri: &str) -> bool {
        self.in_scope.iter().any(|declared| declared == uri)
    }

    pub fn declare(&mut self, uri: &str) {
        self.in_scope.push(uri.to_string());
    }

    /// Drops the `count` most recent declarations.
    pub fn undeclare(&mut self, count: usize) {
        let len = self.in_scope.len().saturating_sub(count);
        self.in_scope.truncate(len);
    }
}
