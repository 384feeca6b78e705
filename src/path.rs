//! Target path parsing and normalization

use crate::error::InterceptError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, non-empty sequence of segment names locating one node relative to
/// the tree root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TargetPath(Vec<String>);

impl TargetPath {
    /// Build a path from explicit segments.
    ///
    /// Fails with [`InterceptError::InvalidPath`] when there are no segments or
    /// when a segment is blank. Segments are otherwise kept verbatim, so names
    /// containing `.` or spaces can still be addressed this way.
    pub fn new<I, S>(segments: I) -> Result<Self, InterceptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(InterceptError::InvalidPath);
        }
        Ok(Self(segments))
    }

    /// Parse a dotted (`foo.bar`) or space separated (`foo bar`) path.
    pub fn parse(input: &str) -> Result<Self, InterceptError> {
        Self::new(split_segments(input))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment (the target node's own name).
    pub fn leaf(&self) -> &str {
        // Non-empty by construction.
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

/// Split a path string into segments, dropping empty pieces.
///
/// Both `.` and whitespace act as separators, and runs of separators collapse.
pub fn split_segments(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl std::str::FromStr for TargetPath {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Vec<String>> for TargetPath {
    type Error = InterceptError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetPath> for Vec<String> {
    fn from(value: TargetPath) -> Self {
        value.0
    }
}
