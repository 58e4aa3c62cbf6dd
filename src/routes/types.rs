use http::Method;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// HTTP method constraint attached to a routing directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMethod {
    /// `match` directive: any request method is accepted
    Any,
    /// `get` directive
    Get,
    /// `post` directive
    Post,
}

impl RouteMethod {
    /// Parse the first token of a directive (case-insensitive).
    #[must_use]
    pub fn from_directive(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "match" => Some(RouteMethod::Any),
            "get" => Some(RouteMethod::Get),
            "post" => Some(RouteMethod::Post),
            _ => None,
        }
    }

    /// Whether a request made with `method` satisfies this constraint.
    #[inline]
    #[must_use]
    pub fn accepts(self, method: &Method) -> bool {
        match self {
            RouteMethod::Any => true,
            RouteMethod::Get => *method == Method::GET,
            RouteMethod::Post => *method == Method::POST,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMethod::Any => write!(f, "match"),
            RouteMethod::Get => write!(f, "get"),
            RouteMethod::Post => write!(f, "post"),
        }
    }
}

/// One compiled routing rule.
///
/// Controller and action names are `Arc<str>` so a match hands them out with an
/// atomic increment instead of a string copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub method: RouteMethod,
    /// Literal path, or literal prefix when `has_params` is set
    pub path_pattern: String,
    pub has_params: bool,
    /// Lowercased controller base with the `controller` suffix (e.g. `homecontroller`)
    pub controller: Arc<str>,
    pub action: Arc<str>,
}

impl RouteEntry {
    /// Copy of this entry with the trailing slash toggled, or `None` when the
    /// toggled path would be empty.
    #[must_use]
    pub fn slash_toggled(&self) -> Option<Self> {
        let path = match self.path_pattern.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => format!("{}/", self.path_pattern),
        };
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path_pattern: path,
            ..self.clone()
        })
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} -> {}#{}",
            self.method,
            self.path_pattern,
            if self.has_params { ":params" } else { "" },
            self.controller,
            self.action
        )
    }
}

/// Ordered, frozen sequence of [`RouteEntry`] values.
///
/// Insertion order is match priority. The entries live in a shared slice that
/// exposes no mutating API, so a table can be cloned into any number of
/// request threads and read without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Arc<[RouteEntry]>,
}

impl RouteTable {
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<RouteEntry> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for RouteTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
