//! Numeric cell encoding.
//!
//! Dashboards compare values textually in places, so integral values are
//! written without a fractional part (`100`, not `100.0`).

use serde::Serializer;

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize an f64, using the integer form when no precision is lost.
pub fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

/// Newtype so numeric cells can be serialized inside sequences.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Number(pub f64);

impl serde::Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}
