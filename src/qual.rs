//! Qualifiers — path descriptors addressing a value inside a data source.
//!
//! A qualifier is a short sequence of segments, each either a map key or a
//! sequence index. Parsing is deliberately dumb: segments that look like
//! unsigned integers become indices, everything else is a key. Sources
//! resolve segments leniently in both directions (an index against a map
//! falls back to its decimal string form, a key against a list is tried as
//! an index), so the textual path works across container shapes.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One step of a qualifier path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Map key lookup.
    Key(String),
    /// Sequence index lookup.
    Index(usize),
}

impl Segment {
    /// The decimal string form of an index, or the key itself.
    pub fn as_key(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{k}"),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Path/key descriptor addressing a value inside a data source.
///
/// Most paths are shallow; segments are stored inline up to four deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Qual {
    segments: SmallVec<[Segment; 4]>,
}

impl Qual {
    /// Parse a dot-separated path. Empty segments are skipped, so
    /// `"a..b"` and `"a.b"` address the same value. Numeric segments
    /// become indices.
    pub fn new(path: &str) -> Self {
        Self::split(path, '.')
    }

    /// Parse with a custom separator.
    pub fn split(path: &str, separator: char) -> Self {
        let segments = path
            .split(separator)
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(i) => Segment::Index(i),
                Err(_) => Segment::Key(s.to_owned()),
            })
            .collect();
        Self { segments }
    }

    /// Build from explicit segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self { segments: segments.into_iter().collect() }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// An empty qualifier addresses the root of the source.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The sub-path starting at segment `from`. Used when resolution hands
    /// off to a nested source capability mid-path.
    pub fn suffix(&self, from: usize) -> Qual {
        Self { segments: self.segments.iter().skip(from).cloned().collect() }
    }

    /// Extend with one more segment.
    pub fn child(&self, segment: Segment) -> Qual {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl From<&str> for Qual {
    fn from(path: &str) -> Self {
        Qual::new(path)
    }
}

impl fmt::Display for Qual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}
