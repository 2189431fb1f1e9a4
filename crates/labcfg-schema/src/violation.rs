//! # Violations and Document Paths
//!
//! A [`Violation`] locates one schema mismatch inside a configuration
//! document. Paths are kept as typed segments rather than JSON Pointer text
//! so that ordering compares `2 < 10` numerically for sequence indices.

use std::fmt;

use serde_json::Value;

/// One step into a document: a mapping key or a sequence index.
///
/// Siblings always share a segment kind (a parent is either a mapping or a
/// sequence), so the cross-kind ordering only matters for synthetic paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Position in a sequence.
    Index(usize),
    /// Key in a mapping.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Location of a value inside a configuration document.
///
/// Ordering is element-wise over the segments; a path sorts before every
/// longer path it is a prefix of.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath(Vec<PathSegment>);

impl DocumentPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Decode a JSON Pointer (RFC 6901) that addresses a value in `instance`.
    ///
    /// A token is read as a sequence index only when the value it steps
    /// into is a sequence; everywhere else it is a mapping key, even if it
    /// looks numeric.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let Some(rest) = pointer.strip_prefix('/') else {
            return Self::root();
        };

        let mut segments = Vec::new();
        let mut current = Some(instance);
        for raw in rest.split('/') {
            let token = raw.replace("~1", "/").replace("~0", "~");
            match current {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(index) => {
                        current = items.get(index);
                        segments.push(PathSegment::Index(index));
                    }
                    Err(_) => {
                        current = None;
                        segments.push(PathSegment::Key(token));
                    }
                },
                Some(value) => {
                    current = value.get(token.as_str());
                    segments.push(PathSegment::Key(token));
                }
                None => segments.push(PathSegment::Key(token)),
            }
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

/// Segments joined by ` -> `; the root renders as the empty string.
impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A single schema violation.
///
/// Field order matters: the derived `Ord` sorts by path first and uses the
/// message only to break ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Violation {
    /// Where in the document the violation was found.
    pub path: DocumentPath,
    /// Human-readable description from the validator.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error at {}: {}", self.path, self.message)
    }
}
