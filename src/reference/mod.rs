//! Reference data consumed by the generators
//!
//! Static pools (diagnoses, formulary, locations, templates) and the
//! [`NameSource`] seam for personal text.

pub mod names;
pub mod pools;

pub use names::{BuiltinNameSource, NameSource};
pub use pools::*;
