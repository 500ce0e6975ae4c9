// Copyright (c) 2026 The pintan Developers

//! Flat dotted-path property sets
//!
//! Bank parameters, user parameters, reply data and outgoing segment fields
//! are all represented as a [Data] map from dotted paths to string values.
//!
//! Query patterns are dotted paths where each component may contain `*`
//! wildcards (`Params*.PinTanPar*.ParPinTan.can1step`). A trailing `.`
//! turns the pattern into a prefix query, see [Data::find].

use alloc::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    vec::Vec,
};

/// Prefix marking reply data fields echoed from the request
pub const ECHO_PREFIX: &str = "orig_";

/// Flat property set keyed by dotted path
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Data {
    entries: BTreeMap<String, String>,
}

/// Build the path of the `index`th element of a repeated group.
///
/// The first element carries no suffix, following ones are numbered from 2
/// (`RetVal`, `RetVal_2`, `RetVal_3`, ...).
pub fn with_counter(path: &str, index: usize) -> String {
    match index {
        0 => path.to_string(),
        _ => format!("{}_{}", path, index + 1),
    }
}

/// Match a single path component against a pattern component containing
/// zero or more `*` wildcards
pub fn glob(pattern: &str, text: &str) -> bool {
    let (p, t) = (pattern.as_bytes(), text.as_bytes());
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == b'*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some((bp, bt)) = backtrack {
            pi = bp + 1;
            ti = bt + 1;
            backtrack = Some((bp, bt + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|c| *c == b'*')
}

/// Match path components against pattern components, returning the number
/// of components consumed
fn match_components(pattern: &[&str], path: &[&str]) -> Option<usize> {
    if pattern.len() > path.len() {
        return None;
    }

    pattern
        .iter()
        .zip(path.iter())
        .all(|(p, c)| glob(p, c))
        .then_some(pattern.len())
}

impl Data {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the value at `path`
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|v| v.as_str())
    }

    /// Fetch the value at `path`, treating empty values as absent
    pub fn get_non_empty(&self, path: &str) -> Option<&str> {
        self.get(path).filter(|v| !v.is_empty())
    }

    /// Set the value at `path`, returning any previous value
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), value.into())
    }

    /// Remove the value at `path`
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.entries.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Iterate over `(path, value)` pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over entries below `prefix.`, yielding the full paths
    pub fn below<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter(move |(k, _)| {
            k.len() > prefix.len() && k.starts_with(prefix) && k.as_bytes()[prefix.len()] == b'.'
        })
    }

    /// Find entries matching the anchored query pattern in full,
    /// yielding the full paths
    pub fn find_all<'a, 'q>(
        &'a self,
        query: &'q str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a, 'q> {
        let pattern: Vec<&str> = query.split('.').collect();

        self.iter().filter(move |(k, _)| {
            let path: Vec<&str> = k.split('.').collect();
            path.len() == pattern.len() && match_components(&pattern, &path).is_some()
        })
    }

    /// Fetch the first value matching the anchored query pattern
    pub fn find_value<'a>(&'a self, query: &str) -> Option<&'a str> {
        self.find_all(query).map(|(_, v)| v).next()
    }

    /// Find all entries below a prefix query (`TAN2StepRes*.`), matched at
    /// any component boundary within the path.
    ///
    /// Echoed request fields ([ECHO_PREFIX]) are ignored. The returned set is
    /// keyed by the remainder of each path following the matched prefix.
    pub fn find(&self, query: &str) -> Data {
        let query = query.strip_suffix('.').unwrap_or(query);
        let pattern: Vec<&str> = query.split('.').collect();

        let mut found = Data::new();

        for (k, v) in self.iter() {
            if k.starts_with(ECHO_PREFIX) {
                continue;
            }

            let path: Vec<&str> = k.split('.').collect();

            for start in 0..path.len() {
                let rest = &path[start..];

                // Prefix queries require at least one remaining component
                match match_components(&pattern, rest) {
                    Some(n) if n < rest.len() => {
                        found.set(rest[n..].join("."), v);
                        break;
                    }
                    _ => (),
                }
            }
        }

        found
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Data {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Data {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
