//! # Source — the resolver contract
//!
//! This is THE contract between the navigator and any backing store: resolve
//! a qualifier to `(value, present)`, expressed as `Option<Value>`. The two
//! built-in implementations walk shared map/list trees segment by segment;
//! an external object implements `Source` itself to act as a nested backing
//! store (and a navigator can be built over it directly, or reached through
//! a `Value::Source` leaf mid-path).

use std::sync::Arc;

use parking_lot::RwLock;

use crate::qual::{Qual, Segment};
use crate::value::{Map, SharedList, SharedMap, Value};

/// A backing store a navigator can resolve qualifiers against.
///
/// Contract: `resolve` must be deterministic for fixed backing state and
/// must not mutate the backing data. Thread-safety of the data itself is
/// the implementor's concern; the built-in sources serialize access per
/// container with a read-write lock.
pub trait Source: Send + Sync {
    /// Resolve a qualifier to its value. `None` means absent.
    fn resolve(&self, qual: &Qual) -> Option<Value>;

    /// Best-effort write. Returns `false` when the path cannot accept the
    /// value (missing parent, index out of bounds, scalar mid-path).
    /// Read-only sources keep the default.
    fn set(&self, qual: &Qual, value: Value) -> bool {
        let _ = (qual, value);
        false
    }
}

// ============================================================================
// Segment walking
// ============================================================================

/// Walk `segments` downward from `root`, cloning out the value at each hop
/// (cheap: containers are Arc-shared). A `Source` leaf mid-path is handed
/// the remaining suffix.
///
/// Lookup is lenient across shapes: an index against a map uses its decimal
/// string form, a key against a list is tried as an index.
fn descend(root: Value, segments: &[Segment]) -> Option<Value> {
    let mut cur = root;
    for (i, seg) in segments.iter().enumerate() {
        cur = match (&cur, seg) {
            (Value::Map(m), Segment::Key(k)) => m.read().get(k.as_str()).cloned()?,
            (Value::Map(m), Segment::Index(n)) => {
                m.read().get(n.to_string().as_str()).cloned()?
            }
            (Value::List(l), Segment::Index(n)) => l.read().get(*n).cloned()?,
            (Value::List(l), Segment::Key(k)) => {
                let n = k.parse::<usize>().ok()?;
                l.read().get(n).cloned()?
            }
            (Value::Source(s), _) => {
                return s.resolve(&Qual::from_segments(segments[i..].iter().cloned()));
            }
            _ => return None,
        };
    }
    Some(cur)
}

/// Walk to the parent of the last segment and write `value` there.
/// Maps insert (creating the key), lists only overwrite in-bounds indices,
/// nested sources are delegated to with the remaining suffix.
fn assign(root: Value, segments: &[Segment], value: Value) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        // The root itself is not addressable for writes.
        return false;
    };

    let mut cur = root;
    for (i, seg) in parents.iter().enumerate() {
        cur = match (&cur, seg) {
            (Value::Map(m), Segment::Key(k)) => match m.read().get(k.as_str()).cloned() {
                Some(v) => v,
                None => return false,
            },
            (Value::Map(m), Segment::Index(n)) => {
                match m.read().get(n.to_string().as_str()).cloned() {
                    Some(v) => v,
                    None => return false,
                }
            }
            (Value::List(l), Segment::Index(n)) => match l.read().get(*n).cloned() {
                Some(v) => v,
                None => return false,
            },
            (Value::List(l), Segment::Key(k)) => {
                match k.parse::<usize>().ok().and_then(|n| l.read().get(n).cloned()) {
                    Some(v) => v,
                    None => return false,
                }
            }
            (Value::Source(s), _) => {
                return s.set(&Qual::from_segments(segments[i..].iter().cloned()), value);
            }
            _ => return false,
        };
    }

    match (&cur, last) {
        (Value::Map(m), seg) => {
            m.write().insert(seg.as_key(), value);
            true
        }
        (Value::List(l), Segment::Index(n)) => {
            let mut guard = l.write();
            match guard.get_mut(*n) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        }
        (Value::List(l), Segment::Key(k)) => {
            let Ok(n) = k.parse::<usize>() else { return false };
            let mut guard = l.write();
            match guard.get_mut(n) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        }
        (Value::Source(s), seg) => s.set(&Qual::from_segments([seg.clone()]), value),
        _ => false,
    }
}

// ============================================================================
// MapSource
// ============================================================================

/// A shared mapping acting as a backing store.
pub struct MapSource {
    root: SharedMap,
}

impl MapSource {
    /// Wrap an already-shared map. The source aliases it — mutation through
    /// either side is visible through the other.
    pub fn new(root: SharedMap) -> Self {
        Self { root }
    }

    /// Take ownership of plain entries.
    pub fn from_entries(entries: Map) -> Self {
        Self::new(Arc::new(RwLock::new(entries)))
    }

    /// The shared backing map.
    pub fn root(&self) -> &SharedMap {
        &self.root
    }
}

impl Source for MapSource {
    fn resolve(&self, qual: &Qual) -> Option<Value> {
        descend(Value::Map(self.root.clone()), qual.segments())
    }

    fn set(&self, qual: &Qual, value: Value) -> bool {
        assign(Value::Map(self.root.clone()), qual.segments(), value)
    }
}

// ============================================================================
// ListSource
// ============================================================================

/// A shared sequence acting as a backing store.
pub struct ListSource {
    root: SharedList,
}

impl ListSource {
    /// Wrap an already-shared list (aliasing, like [`MapSource::new`]).
    pub fn new(root: SharedList) -> Self {
        Self { root }
    }

    /// Take ownership of plain items.
    pub fn from_items(items: Vec<Value>) -> Self {
        Self::new(Arc::new(RwLock::new(items)))
    }

    /// The shared backing list.
    pub fn root(&self) -> &SharedList {
        &self.root
    }
}

impl Source for ListSource {
    fn resolve(&self, qual: &Qual) -> Option<Value> {
        descend(Value::List(self.root.clone()), qual.segments())
    }

    fn set(&self, qual: &Qual, value: Value) -> bool {
        assign(Value::List(self.root.clone()), qual.segments(), value)
    }
}
