//! Universal value type for dynamically-shaped data trees.
//!
//! `Value` is the closed tagged union every navigator operation dispatches
//! on: null, boolean, twelve fixed-width numeric kinds, text, bytes, shared
//! containers, and the opaque source capability. Containers are reference
//! counted and interior-locked so sub-navigation shares structure instead of
//! copying it — a navigator built over a nested map sees (and can apply)
//! in-place mutation of the original.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::source::Source;

/// Key-value backing store for [`Value::Map`].
pub type Map = hashbrown::HashMap<String, Value>;

/// Shared, lock-protected sequence.
pub type SharedList = Arc<RwLock<Vec<Value>>>;

/// Shared, lock-protected mapping.
pub type SharedMap = Arc<RwLock<Map>>;

/// Dynamically-typed value.
///
/// Covers the full value space a navigator can address:
/// - Scalars: `Bool`, the twelve numeric widths, `String`, `Bytes`
/// - Containers: `List`, `Map` (shared — `Clone` is shallow)
/// - Capability: `Source` (an external object acting as a nested store)
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),

    // Signed integer widths
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),

    // Unsigned integer widths
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),

    // Floating-point widths
    F32(f32),
    F64(f64),

    String(String),
    Bytes(Vec<u8>),
    List(SharedList),
    Map(SharedMap),
    Source(Arc<dyn Source>),
}

/// Discriminant tag for [`Value`].
///
/// Used by coercion dispatch, the assignability check behind
/// `Navigator::safe_value`, and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Null,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    Bytes,
    List,
    Map,
    Source,
}

impl Kind {
    /// Can a slot holding a default of this kind accept a value of `other`?
    ///
    /// One-directional and asymmetric: every kind accepts itself, and the
    /// dynamic kind (`Null`) accepts everything — but no concrete kind
    /// accepts `Null`. `Kind::Null.accepts(Kind::I64)` is true while
    /// `Kind::I64.accepts(Kind::Null)` is false.
    pub fn accepts(self, other: Kind) -> bool {
        self == Kind::Null || self == other
    }

    /// Diagnostic name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Kind::Null => "NULL",
            Kind::Bool => "BOOLEAN",
            Kind::I8 => "INT8",
            Kind::I16 => "INT16",
            Kind::I32 => "INT32",
            Kind::I64 => "INT64",
            Kind::Isize => "INT",
            Kind::U8 => "UINT8",
            Kind::U16 => "UINT16",
            Kind::U32 => "UINT32",
            Kind::U64 => "UINT64",
            Kind::Usize => "UINT",
            Kind::F32 => "FLOAT32",
            Kind::F64 => "FLOAT64",
            Kind::String => "STRING",
            Kind::Bytes => "BYTES",
            Kind::List => "LIST",
            Kind::Map => "MAP",
            Kind::Source => "SOURCE",
        }
    }

    /// Is this one of the twelve numeric kinds?
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::Usize
                | Kind::F32
                | Kind::F64
        )
    }
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    /// Discriminant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Source(_) => Kind::Source,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_) | Value::Source(_))
    }

    /// Element count for shapes with a defined length concept.
    ///
    /// `List`/`Map` count elements, `Bytes` counts bytes, `String` counts
    /// UTF-8 code units. Every other kind has no length and returns `None`.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Bytes(b) => Some(b.len()),
            Value::List(l) => Some(l.read().len()),
            Value::Map(m) => Some(m.read().len()),
            _ => None,
        }
    }

    /// Attempt to extract as `&str` (exact kind only).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Value {
    /// Wrap a sequence into a shared list value.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(RwLock::new(items)))
    }

    /// Wrap a mapping into a shared map value.
    pub fn map(entries: Map) -> Self {
        Value::Map(Arc::new(RwLock::new(entries)))
    }

    /// Wrap a byte payload. (`From<Vec<u8>>` would build a `List` of `U8`
    /// through the generic `Vec` conversion, so bytes get an explicit
    /// constructor instead.)
    pub fn bytes(data: Vec<u8>) -> Self {
        Value::Bytes(data)
    }

    /// Wrap an external source capability.
    pub fn source(src: Arc<dyn Source>) -> Self {
        Value::Source(src)
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

macro_rules! impl_from_numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self { Value::$variant(v) }
        }
    )*};
}

impl_from_numeric! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Convert (key, value) pairs into a map value.
impl<K, V> From<Vec<(K, V)>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Value::map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Equality
// ============================================================================

/// Structural equality for scalars and containers; identity for sources.
///
/// Aliased containers short-circuit on pointer identity before locking, so
/// comparing a value with a clone of itself never deadlocks.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::Isize(a), Value::Isize(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::Usize(a), Value::Usize(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b) || *a.read() == *b.read(),
            (Value::Source(a), Value::Source(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Debug / Display
// ============================================================================

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::I8(v) => write!(f, "I8({v})"),
            Value::I16(v) => write!(f, "I16({v})"),
            Value::I32(v) => write!(f, "I32({v})"),
            Value::I64(v) => write!(f, "I64({v})"),
            Value::Isize(v) => write!(f, "Isize({v})"),
            Value::U8(v) => write!(f, "U8({v})"),
            Value::U16(v) => write!(f, "U16({v})"),
            Value::U32(v) => write!(f, "U32({v})"),
            Value::U64(v) => write!(f, "U64({v})"),
            Value::Usize(v) => write!(f, "Usize({v})"),
            Value::F32(v) => write!(f, "F32({v})"),
            Value::F64(v) => write!(f, "F64({v})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Bytes(b) => write!(f, "Bytes(len={})", b.len()),
            Value::List(l) => f.debug_tuple("List").field(&*l.read()).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(&*m.read()).finish(),
            Value::Source(_) => write!(f, "Source(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Isize(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Usize(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Bytes(b) => write!(f, "<bytes[{}]>", b.len()),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Source(_) => write!(f, "<source>"),
        }
    }
}
