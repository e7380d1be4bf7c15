//! # treenav — typed navigation over dynamic data trees
//!
//! A typed access layer over dynamically-shaped data: nested mappings,
//! sequences, and opaque source objects, addressed by dot-separated
//! qualifiers. Callers read scalars or descend into nested structure without
//! manual type checks — every getter substitutes a caller-supplied default
//! when the qualifier is absent or the stored kind does not match.
//!
//! ## Design Principles
//!
//! 1. **Never errors, never panics**: absence, kind mismatch, and coercion
//!    failure all fold into default-return. Presence is queried separately.
//! 2. **One coercion rule**: the twelve numeric widths convert among each
//!    other (truncating, wrapping); nothing else converts at all.
//! 3. **Sharing, not copying**: sub-navigation aliases the backing
//!    containers, so mutation stays visible across navigators.
//! 4. **Trait at the seam**: `Source` is the contract between the navigator
//!    and any backing store.
//!
//! ## Quick Start
//!
//! ```rust
//! use treenav::{Navigator, Qual};
//!
//! let nav = Navigator::from_json(serde_json::json!({
//!     "server": { "host": "localhost", "port": 8080 },
//!     "retries": [1, 2, 3],
//! }))
//! .expect("document is container-shaped");
//!
//! assert_eq!(nav.u16(&Qual::new("server.port"), None), 8080);
//! assert_eq!(nav.string(&Qual::new("server.host"), None), "localhost");
//! assert_eq!(nav.i64(&Qual::new("server.timeout"), 30), 30); // absent
//! assert_eq!(nav.len(&Qual::new("retries")), 3);
//!
//! let server = nav.navigator(&Qual::new("server")).expect("maps are navigable");
//! assert_eq!(server.u16(&Qual::new("port"), None), 8080);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod coerce;
pub mod convert;
pub mod navigator;
pub mod qual;
pub mod source;
pub mod value;

// ============================================================================
// Re-exports: Value model
// ============================================================================

pub use value::{Kind, Map, SharedList, SharedMap, Value};

// ============================================================================
// Re-exports: Coercion
// ============================================================================

pub use coerce::{Numeric, to_numeric};

// ============================================================================
// Re-exports: Navigation
// ============================================================================

pub use navigator::Navigator;
pub use qual::{Qual, Segment};
pub use source::{ListSource, MapSource, Source};

// ============================================================================
// Error Types
// ============================================================================

/// Errors from the conversion boundary (`TryFrom` extraction, JSON export).
///
/// The navigation surface itself — the getter family, `len`, `safe_value`,
/// `navigator`, `set` — never produces these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("type error: expected {expected}, got {got}")]
    Type { expected: &'static str, got: &'static str },

    #[error("cannot represent {kind} value as JSON")]
    Json { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
