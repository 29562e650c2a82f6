//! Convert module - turns arbitrary inputs into canonical values.
//!
//! Conversion is driven by an ordered [`Registry`] of converter functions.
//! The built-in converters handle JSON text and bytes, streams, captured
//! output, Kubernetes objects and already-decoded containers; callers add
//! their own with [`register_converter`], which takes precedence over every
//! converter registered before it.

mod builtin;
mod error;
mod input;
mod registry;

#[cfg(test)]
mod convert_test;

pub use builtin::*;
pub use error::*;
pub use input::*;
pub use registry::*;
