//! Paths locating a failure inside a nested input value.
//!
//! This module provides [`PathSegment`] and [`DecodePath`]. Compound decoders
//! push segments onto a [`Failure`](crate::Failure) while the failure travels
//! outward, so segments are stored innermost-first and reversed for display.

use std::fmt::{self, Display};

/// A segment of a decode path.
///
/// A segment is either an object key or an array offset. Both render as plain
/// text, so `Key("a")` shows as `a` and `Index(0)` shows as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g. `user`, `email`)
    Key(String),
    /// An array offset; negative offsets count from the end
    Index(isize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: isize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx as isize)
    }
}

impl From<isize> for PathSegment {
    fn from(idx: isize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested input, read from the outermost container
/// inward.
///
/// `DecodePath` is a view produced by [`Failure::path`](crate::Failure::path);
/// it renders as `.users.0.email`.
///
/// # Example
///
/// ```rust
/// use decoding::{DecodePath, PathSegment};
///
/// let path = DecodePath::from_segments(vec![
///     PathSegment::key("users"),
///     PathSegment::index(0),
///     PathSegment::key("email"),
/// ]);
///
/// assert_eq!(path.to_string(), ".users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodePath {
    segments: Vec<PathSegment>,
}

impl DecodePath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from segments ordered outermost first.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the innermost segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = DecodePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(PathSegment::key("user").to_string(), "user");
        assert_eq!(PathSegment::index(3).to_string(), "3");
        assert_eq!(PathSegment::index(-1).to_string(), "-1");
    }

    #[test]
    fn test_mixed_path() {
        let path = DecodePath::from_segments(vec![
            PathSegment::key("body"),
            PathSegment::index(42),
            PathSegment::key("name"),
        ]);
        assert_eq!(path.to_string(), ".body.42.name");
        assert_eq!(path.last(), Some(&PathSegment::key("name")));
    }

    #[test]
    fn test_segment_conversions() {
        assert_eq!(PathSegment::from("a"), PathSegment::Key("a".to_string()));
        assert_eq!(PathSegment::from(2usize), PathSegment::Index(2));
        assert_eq!(PathSegment::from(-2isize), PathSegment::Index(-2));
    }
}
