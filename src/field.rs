//! Field paths and diagnostics.
//!
//! Every validator in this crate reports problems as [`Diagnostic`] values
//! addressed to a [`FieldPath`]. Validators never fail: they return a
//! [`DiagnosticList`] and the caller folds the lists together in field
//! declaration order.

use serde::Serialize;
use std::fmt;

/// A dotted/indexed path to a field, e.g. `spec.taints[2].key`.
///
/// Paths are immutable; `child` and `index` return a new path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    rendered: String,
}

impl FieldPath {
    /// Create a root path.
    pub fn new(root: &str) -> Self {
        Self {
            rendered: root.to_string(),
        }
    }

    /// Append a named child segment.
    pub fn child(&self, name: &str) -> Self {
        if self.rendered.is_empty() {
            return Self::new(name);
        }
        Self {
            rendered: format!("{}.{}", self.rendered, name),
        }
    }

    /// Append several named child segments.
    pub fn children(&self, names: &[&str]) -> Self {
        names.iter().fold(self.clone(), |path, name| path.child(name))
    }

    /// Append an index segment.
    pub fn index(&self, i: usize) -> Self {
        Self {
            rendered: format!("{}[{}]", self.rendered, i),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rendered)
    }
}

/// Kind of validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Mandatory field missing or empty
    Required,
    /// Value present but malformed or inconsistent
    Invalid,
    /// Key collision within a sequence
    Duplicate,
    /// Change to a frozen field on update
    Immutable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Required => write!(f, "Required value"),
            ErrorKind::Invalid => write!(f, "Invalid value"),
            ErrorKind::Duplicate => write!(f, "Duplicate value"),
            ErrorKind::Immutable => write!(f, "Immutable value"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub field_path: FieldPath,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_value: Option<String>,
}

impl Diagnostic {
    pub fn required(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field_path: path,
            kind: ErrorKind::Required,
            message: message.into(),
            bad_value: None,
        }
    }

    pub fn invalid(path: FieldPath, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: path,
            kind: ErrorKind::Invalid,
            message: message.into(),
            bad_value: Some(value.into()),
        }
    }

    pub fn duplicate(path: FieldPath, value: impl Into<String>) -> Self {
        Self {
            field_path: path,
            kind: ErrorKind::Duplicate,
            message: String::new(),
            bad_value: Some(value.into()),
        }
    }

    /// Immutable field change. `value` is the proposed value, `None` when the
    /// field was removed.
    pub fn immutable(path: FieldPath, value: Option<String>) -> Self {
        Self {
            field_path: path,
            kind: ErrorKind::Immutable,
            message: "field is immutable".to_string(),
            bad_value: value,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path, self.kind)?;
        if let Some(ref value) = self.bad_value {
            write!(f, ": {:?}", value)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Ordered, append-only list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticList {
    items: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Concatenate `other` after `self`.
    #[must_use]
    pub fn and(mut self, other: DiagnosticList) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics of one kind, in report order.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Diagnostics addressed to exactly `path`.
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.items
            .iter()
            .filter(move |d| d.field_path.as_str() == path)
    }

    /// Render every diagnostic into one line, `[a, b, c]` style.
    pub fn to_aggregate_string(&self) -> String {
        match self.items.len() {
            0 => String::new(),
            1 => self.items[0].to_string(),
            _ => {
                let parts: Vec<String> = self.items.iter().map(|d| d.to_string()).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

impl From<Diagnostic> for DiagnosticList {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            items: vec![diagnostic],
        }
    }
}

impl FromIterator<Diagnostic> for DiagnosticList {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiagnosticList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
