//! Numeric coercion — one conversion rule across the twelve numeric widths.
//!
//! Coercion is a pure dispatch on (source kind, destination width). An
//! exact-kind match is an identity cast the compiler erases; any other
//! numeric kind converts with Rust `as` semantics; any non-numeric kind
//! (including absence, i.e. `Null`) fails. Failure is only ever a boolean —
//! this module never panics and never returns an error.

use crate::value::{Kind, Value};

mod sealed {
    pub trait Sealed {}
}

/// The closed set of twelve numeric representations a [`Value`] can carry.
///
/// Conversion semantics (all via Rust `as` casts):
/// - float → integer truncates toward zero, saturating at the destination
///   bounds; NaN converts to 0
/// - integer narrowing wraps per two's-complement bit truncation
///   (`-1i64` → `u8` yields 255)
/// - widening sign-extends or zero-extends per the source's signedness
///
/// Sealed: exactly the twelve widths, nothing else.
pub trait Numeric: Copy + Default + sealed::Sealed {
    /// The [`Kind`] tag for this width.
    const KIND: Kind;

    /// Coerce a raw value into this width, or `None` if the value's kind is
    /// outside the numeric set.
    fn coerce(value: &Value) -> Option<Self>;
}

macro_rules! impl_numeric {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Numeric for $ty {
            const KIND: Kind = Kind::$kind;

            // The arm matching this width's own variant is an identity
            // cast — the exact-kind match costs nothing.
            #[allow(clippy::unnecessary_cast)]
            fn coerce(value: &Value) -> Option<Self> {
                match *value {
                    Value::I8(v) => Some(v as $ty),
                    Value::I16(v) => Some(v as $ty),
                    Value::I32(v) => Some(v as $ty),
                    Value::I64(v) => Some(v as $ty),
                    Value::Isize(v) => Some(v as $ty),
                    Value::U8(v) => Some(v as $ty),
                    Value::U16(v) => Some(v as $ty),
                    Value::U32(v) => Some(v as $ty),
                    Value::U64(v) => Some(v as $ty),
                    Value::Usize(v) => Some(v as $ty),
                    Value::F32(v) => Some(v as $ty),
                    Value::F64(v) => Some(v as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

impl_numeric! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
}

/// Convert a raw value into the requested numeric width.
///
/// Returns `(converted, true)` when the value's kind is one of the twelve
/// numeric kinds, `(zero, false)` otherwise. The zero result on failure is
/// indistinguishable from a stored zero — callers needing presence query it
/// separately.
pub fn to_numeric<T: Numeric>(value: &Value) -> (T, bool) {
    match T::coerce(value) {
        Some(v) => (v, true),
        None => (T::default(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// The same quantity carried by each of the twelve kinds.
    fn threes() -> Vec<Value> {
        vec![
            Value::I8(3),
            Value::I16(3),
            Value::I32(3),
            Value::I64(3),
            Value::Isize(3),
            Value::U8(3),
            Value::U16(3),
            Value::U32(3),
            Value::U64(3),
            Value::Usize(3),
            Value::F32(3.0),
            Value::F64(3.0),
        ]
    }

    #[test]
    fn every_numeric_kind_coerces_to_every_width() {
        for v in threes() {
            assert_eq!(to_numeric::<i8>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<i16>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<i32>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<i64>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<isize>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<u8>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<u16>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<u32>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<u64>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<usize>(&v), (3, true), "{v:?}");
            assert_eq!(to_numeric::<f32>(&v), (3.0, true), "{v:?}");
            assert_eq!(to_numeric::<f64>(&v), (3.0, true), "{v:?}");
        }
    }

    #[test]
    fn exact_match_is_unchanged() {
        assert_eq!(to_numeric::<i64>(&Value::I64(i64::MIN)), (i64::MIN, true));
        assert_eq!(to_numeric::<u64>(&Value::U64(u64::MAX)), (u64::MAX, true));
        let (f, ok) = to_numeric::<f64>(&Value::F64(0.1));
        assert!(ok);
        assert_eq!(f, 0.1);
    }

    #[test]
    fn float_to_int_truncates_toward_zero() {
        assert_eq!(to_numeric::<i64>(&Value::F64(3.9)), (3, true));
        assert_eq!(to_numeric::<i64>(&Value::F64(-3.9)), (-3, true));
        assert_eq!(to_numeric::<i32>(&Value::F32(42.9)), (42, true));
    }

    #[test]
    fn narrowing_wraps_twos_complement() {
        assert_eq!(to_numeric::<u8>(&Value::I64(-1)), (255, true));
        assert_eq!(to_numeric::<u8>(&Value::I32(256)), (0, true));
        assert_eq!(to_numeric::<i8>(&Value::U64(200)), (-56, true));
        assert_eq!(to_numeric::<i16>(&Value::I64(0x1_1234)), (0x1234, true));
    }

    #[test]
    fn widening_extends_per_source_signedness() {
        assert_eq!(to_numeric::<i64>(&Value::I8(-1)), (-1, true));
        assert_eq!(to_numeric::<u64>(&Value::U8(255)), (255, true));
        // Unsigned source zero-extends even into a signed destination.
        assert_eq!(to_numeric::<i64>(&Value::U32(u32::MAX)), (u32::MAX as i64, true));
    }

    #[test]
    fn float_edge_cases_saturate_not_panic() {
        assert_eq!(to_numeric::<u8>(&Value::F64(1e10)), (u8::MAX, true));
        assert_eq!(to_numeric::<i8>(&Value::F64(-1e10)), (i8::MIN, true));
        assert_eq!(to_numeric::<i32>(&Value::F64(f64::NAN)), (0, true));
    }

    #[test]
    fn non_numeric_kinds_fail_to_zero() {
        let non_numeric = vec![
            Value::Null,
            Value::Bool(true),
            Value::from("3"),
            Value::bytes(vec![3]),
            Value::from(vec![3i64]),
            Value::map(crate::Map::new()),
        ];
        for v in non_numeric {
            assert_eq!(to_numeric::<i64>(&v), (0, false), "{v:?}");
            assert_eq!(to_numeric::<f64>(&v), (0.0, false), "{v:?}");
            assert_eq!(to_numeric::<u8>(&v), (0, false), "{v:?}");
        }
    }

    proptest! {
        #[test]
        fn narrowing_matches_as_cast(v: i64) {
            prop_assert_eq!(to_numeric::<u8>(&Value::I64(v)), (v as u8, true));
            prop_assert_eq!(to_numeric::<i16>(&Value::I64(v)), (v as i16, true));
            prop_assert_eq!(to_numeric::<u32>(&Value::I64(v)), (v as u32, true));
        }

        #[test]
        fn float_truncation_matches_trunc(v in -1.0e9f64..1.0e9f64) {
            let (out, ok) = to_numeric::<i64>(&Value::F64(v));
            prop_assert!(ok);
            prop_assert_eq!(out, v.trunc() as i64);
        }

        #[test]
        fn text_never_coerces(s: String) {
            prop_assert_eq!(to_numeric::<i32>(&Value::String(s)), (0, false));
        }
    }
}
