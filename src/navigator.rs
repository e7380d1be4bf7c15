//! # Navigator — typed access over a backing source
//!
//! A `Navigator` is a stateless façade over an `Arc<dyn Source>`: every
//! getter resolves a qualifier through the source and shapes the raw value
//! into the requested type, substituting the caller's default on absence or
//! kind mismatch.
//!
//! ## The default contract
//!
//! No navigator method errors or panics. Absence of a qualifier, a kind
//! mismatch, and a failed numeric coercion all fold into one observable
//! outcome: the default is returned (the kind's zero value when no default
//! is given). A returned zero is therefore ambiguous between "the stored
//! value is zero" and "nothing usable was stored" — that ambiguity is the
//! contract, and callers who need to tell the cases apart query presence
//! separately via [`Navigator::get`], [`Navigator::has`], or
//! [`Navigator::len`].
//!
//! ## Thread safety
//!
//! The navigator itself holds no state beyond the source handle and performs
//! no synchronization of its own. It is safe exactly to the extent the
//! backing store is safe: concurrent reads are fine over the built-in
//! sources, concurrent mutation-while-read is serialized per container but
//! not across containers. Two navigators over disjoint immutable data have
//! no restrictions.

use std::sync::Arc;

use tracing::trace;

use crate::coerce::Numeric;
use crate::qual::Qual;
use crate::source::{ListSource, MapSource, Source};
use crate::value::{Map, SharedList, SharedMap, Value};

/// Stateless typed-access façade over a resolver and its backing value.
///
/// `Clone` is cheap and shares the backing source.
#[derive(Clone)]
pub struct Navigator {
    source: Arc<dyn Source>,
}

// ============================================================================
// Construction
// ============================================================================

impl Navigator {
    /// Wrap an external source capability.
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self { source }
    }

    /// Navigate a shared mapping. The navigator aliases it, never copies.
    pub fn from_map(map: SharedMap) -> Self {
        Self::new(Arc::new(MapSource::new(map)))
    }

    /// Navigate plain map entries (takes ownership).
    pub fn from_entries(entries: Map) -> Self {
        Self::new(Arc::new(MapSource::from_entries(entries)))
    }

    /// Navigate a shared sequence. The navigator aliases it, never copies.
    pub fn from_list(list: SharedList) -> Self {
        Self::new(Arc::new(ListSource::new(list)))
    }

    /// Navigate plain list items (takes ownership).
    pub fn from_items(items: Vec<Value>) -> Self {
        Self::new(Arc::new(ListSource::from_items(items)))
    }
}

// ============================================================================
// Presence
// ============================================================================

impl Navigator {
    /// Resolve a qualifier to its raw value. This is the presence query the
    /// getter family deliberately does not offer: `None` here is
    /// unambiguously "absent".
    pub fn get(&self, qual: &Qual) -> Option<Value> {
        self.source.resolve(qual)
    }

    /// Does the qualifier resolve at all?
    pub fn has(&self, qual: &Qual) -> bool {
        self.get(qual).is_some()
    }

    fn lookup(&self, qual: &Qual) -> Option<Value> {
        let value = self.source.resolve(qual);
        if value.is_none() {
            trace!(%qual, "qualifier absent");
        }
        value
    }
}

// ============================================================================
// Numeric getter family
// ============================================================================

macro_rules! numeric_getters {
    ($($name:ident : $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Get `", stringify!($ty), "` or default.")]
        ///
        /// Resolves the qualifier and coerces any of the twelve numeric
        /// kinds to this width (exact matches pass through unchanged,
        /// floats truncate toward zero, integers wrap on narrowing).
        /// Absence and coercion failure both yield the default — the two
        /// are indistinguishable here by contract. At most one default is
        /// expressible per call; pass `None` for the zero value.
        pub fn $name(&self, qual: &Qual, default: impl Into<Option<$ty>>) -> $ty {
            let default = default.into().unwrap_or_default();
            match self.lookup(qual) {
                Some(value) => match <$ty as Numeric>::coerce(&value) {
                    Some(v) => v,
                    None => {
                        trace!(%qual, got = value.type_name(), "not numeric; using default");
                        default
                    }
                },
                None => default,
            }
        }
    )*};
}

impl Navigator {
    numeric_getters! {
        i8: i8, i16: i16, i32: i32, i64: i64, isize: isize,
        u8: u8, u16: u16, u32: u32, u64: u64, usize: usize,
        f32: f32, f64: f64,
    }
}

// ============================================================================
// Exact-kind getters
// ============================================================================

impl Navigator {
    /// Get text or default. Exact kind only — numbers are not stringified.
    pub fn string(&self, qual: &Qual, default: impl Into<Option<String>>) -> String {
        match self.lookup(qual) {
            Some(Value::String(s)) => s,
            _ => default.into().unwrap_or_default(),
        }
    }

    /// Get boolean or default. Exact kind only — no truthiness coercion.
    pub fn bool(&self, qual: &Qual, default: impl Into<Option<bool>>) -> bool {
        match self.lookup(qual) {
            Some(Value::Bool(b)) => b,
            _ => default.into().unwrap_or_default(),
        }
    }

    /// Get bytes or default. Exact kind only — a list of `U8` values is a
    /// list, not a byte payload.
    pub fn bytes(&self, qual: &Qual, default: impl Into<Option<Vec<u8>>>) -> Vec<u8> {
        match self.lookup(qual) {
            Some(Value::Bytes(b)) => b,
            _ => default.into().unwrap_or_default(),
        }
    }

    /// Get the raw value or default. The unconstrained retrieval: any
    /// present value matches, so only absence yields the default
    /// (`Value::Null` when none is given).
    pub fn value(&self, qual: &Qual, default: impl Into<Option<Value>>) -> Value {
        match self.lookup(qual) {
            Some(v) => v,
            None => default.into().unwrap_or(Value::Null),
        }
    }
}

// ============================================================================
// Shape inspection
// ============================================================================

impl Navigator {
    /// Length of the value at the qualifier, or −1.
    ///
    /// Lists and maps count elements, byte payloads count bytes, text
    /// counts UTF-8 code units. An absent qualifier or a value with no
    /// length concept (scalars, sources) returns the −1 sentinel. Because
    /// −1 is never a valid length, this is also a usable presence probe for
    /// container-shaped values.
    pub fn len(&self, qual: &Qual) -> i64 {
        match self.lookup(qual).and_then(|v| v.length()) {
            Some(n) => n as i64,
            None => -1,
        }
    }

    /// Get the raw value if the default could hold it, else the default.
    ///
    /// The check is one-directional assignability of kinds, not identity:
    /// the default's kind must accept the resolved kind. Every kind accepts
    /// itself, and a `Value::Null` default (the dynamic kind) accepts
    /// anything — but no concrete kind accepts `Null`. Compare with the
    /// exact-match rule of [`Navigator::string`] and friends: that rule is
    /// symmetric, this one is not.
    pub fn safe_value(&self, qual: &Qual, default: Value) -> Value {
        match self.lookup(qual) {
            Some(v) if default.kind().accepts(v.kind()) => v,
            Some(v) => {
                trace!(
                    %qual,
                    got = v.type_name(),
                    want = default.type_name(),
                    "kind not assignable; using default"
                );
                default
            }
            None => default,
        }
    }
}

// ============================================================================
// Sub-navigation
// ============================================================================

impl Navigator {
    /// Descend into a nested structure.
    ///
    /// A mapping, sequence, or source capability at the qualifier yields a
    /// navigator sharing that structure (mutation through either side is
    /// visible through the other). Any other shape — or absence — yields
    /// `None`; there is never a navigator over an unsupported shape.
    pub fn navigator(&self, qual: &Qual) -> Option<Navigator> {
        match self.lookup(qual)? {
            Value::Map(m) => Some(Navigator::from_map(m)),
            Value::List(l) => Some(Navigator::from_list(l)),
            Value::Source(s) => Some(Navigator::new(s)),
            other => {
                trace!(%qual, got = other.type_name(), "shape does not support sub-navigation");
                None
            }
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

impl Navigator {
    /// Best-effort write through the backing source.
    ///
    /// Map parents insert the final key, list parents overwrite in-bounds
    /// indices, nested sources are delegated to. Returns `false` — never an
    /// error — when the path cannot accept the value.
    pub fn set(&self, qual: &Qual, value: impl Into<Value>) -> bool {
        self.source.set(qual, value.into())
    }
}
