//! Location pointers for positions inside a request document.
//!
//! This module provides [`JsonPointer`], built from the ordered path segments
//! a schema failure reports and rendered as a slash-delimited string such as
//! `/pets/0/name`.

use std::fmt::{self, Display};

/// A slash-delimited pointer to a value in a structured document.
///
/// Segments are kept in the order they are given (root first) and written
/// as they are, joined with `/`.
///
/// # Example
///
/// ```rust
/// use triage::JsonPointer;
///
/// let pointer = JsonPointer::root().push("pets").push("0").push("name");
/// assert_eq!(pointer.to_string(), "/pets/0/name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// Creates an empty pointer.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a pointer from an ordered sequence of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new pointer with a segment appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns the number of segments in this pointer.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this pointer has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl Display for JsonPointer {
    /// An empty pointer renders as `/`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            f.write_str("/")?;
            f.write_str(segment)?;
        }
        Ok(())
    }
}
