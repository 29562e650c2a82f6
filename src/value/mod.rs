//! Value module - raw and canonical representations of JSON/YAML data.
//!
//! Converters produce raw [`Value`] trees, which may carry any fixed-width
//! numeric leaf. [`normalize`] turns them into [`Canonical`] trees, the only
//! shape query engines are given.

mod canonical;
mod normalize;
mod value;

pub use canonical::*;
pub use normalize::*;
pub use value::*;
