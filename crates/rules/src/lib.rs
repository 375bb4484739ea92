//! Mapping rules and the ordered store that holds them.
//!
//! A rule writes one output field, either from an input path (`direct`) or
//! from a literal (`constant`). The store keeps rules in creation order; the
//! generators emit code in that order.

pub mod error;
pub mod rule;
pub mod store;

pub use error::RuleError;
pub use rule::{MappingRule, RuleId, RuleSource, RuleType};
pub use store::MappingStore;
