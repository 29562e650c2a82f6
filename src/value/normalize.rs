//! Numeric normalization of raw value trees.
//!
//! Query engines only accept three numeric shapes: the machine integer, the
//! double-precision float and the arbitrary-precision integer. Decoders of
//! schema-less objects commonly hand out `i64` or `u64` leaves for small counts,
//! so every successful conversion is passed through [`normalize`].

use super::canonical::Canonical;
use super::value::{Number, Value};
use num_bigint::BigInt;

/// Normalize rewrites a raw value tree into its canonical form.
///
/// Mappings and sequences are walked recursively; keys are left untouched.
pub fn normalize(value: Value) -> Canonical {
    match value {
        Value::Null => Canonical::Null,
        Value::Bool(b) => Canonical::Bool(b),
        Value::Number(n) => normalize_number(n),
        Value::String(s) => Canonical::String(s),
        Value::List(items) => Canonical::List(items.into_iter().map(normalize).collect()),
        Value::Map(fields) => Canonical::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k, normalize(v)))
                .collect(),
        ),
    }
}

/// Collapses a single numeric leaf into one of the canonical numeric shapes.
pub fn normalize_number(n: Number) -> Canonical {
    match n {
        Number::I8(v) => Canonical::Int(isize::from(v)),
        Number::I16(v) => Canonical::Int(isize::from(v)),
        Number::I32(v) => signed(i64::from(v)),
        Number::I64(v) => signed(v),
        Number::Isize(v) => Canonical::Int(v),
        Number::U8(v) => Canonical::Int(isize::from(v)),
        Number::U16(v) => unsigned(u64::from(v)),
        Number::U32(v) => unsigned(u64::from(v)),
        Number::U64(v) => unsigned(v),
        Number::Usize(v) => unsigned(v as u64),
        Number::F32(v) => Canonical::Float(f64::from(v)),
        Number::F64(v) => Canonical::Float(v),
        Number::BigInt(v) => Canonical::BigInt(v),
    }
}

// The range checks are explicit so that a narrower machine integer promotes
// instead of truncating.
fn signed(v: i64) -> Canonical {
    match isize::try_from(v) {
        Ok(i) => Canonical::Int(i),
        Err(_) => Canonical::BigInt(BigInt::from(v)),
    }
}

fn unsigned(v: u64) -> Canonical {
    match isize::try_from(v) {
        Ok(i) => Canonical::Int(i),
        Err(_) => Canonical::BigInt(BigInt::from(v)),
    }
}
