//! jq module - assertion helpers that query JSON-shaped values with jq.
//!
//! Any input the conversion pipeline understands can be matched:
//!
//! ```ignore
//! use query_matchers::jq;
//! use query_matchers::matcher::{expect, with_transform};
//!
//! let pod = r#"{"status": {"phase": "Running"}}"#.to_string();
//! expect(&pod).to(jq::matches(r#".status.phase == "Running""#));
//! expect(&pod).to(with_transform(jq::extract(".status"), jq::matches(".phase != null")));
//! ```

mod matcher;
mod transform;

pub use matcher::*;
pub use transform::*;
