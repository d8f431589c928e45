//! Pure capacity and proximity policies.
//!
//! Both are plain functions of resolved options and positions. Configuration
//! is passed in explicitly; nothing here reaches for global state.
mod capacity;
mod range;

pub use capacity::{UNBOUNDED_CAPACITY_FLOOR, effective_capacity};
pub use range::{LocationExclusions, RangeMode, RangeReference, Reach};
