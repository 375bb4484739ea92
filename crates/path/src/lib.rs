//! The field addressing scheme shared by schema trees, mapping rules and the
//! code generators.
//!
//! A path is a sequence of segments separated by `.`:
//!
//! - `name` selects a child element or object key,
//! - `name[@attr='value']` selects the first `name` child whose attribute equals `value`,
//! - `@_name` selects an attribute of the current element,
//! - `0`, `1`, ... are array positions.
//!
//! Bracket contents are atomic: `a.b[@id='x.y'].c` has three segments.

pub mod error;
pub mod predicate;
pub mod segment;
mod split;

// --- Public API ---
pub use error::PathError;
pub use predicate::{Predicate, parse_predicate};
pub use segment::{FieldPath, Segment};
pub use split::{splice_predicate, split_path, strip_predicate};

/// Prefix that marks an attribute key in the generic document shape.
pub const ATTRIBUTE_MARKER: &str = "@_";
