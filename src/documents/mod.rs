//! Resident documents
//!
//! [`DocumentPlanner`] decides which documents a resident's file holds and when
//! each was created; a [`DocumentRenderer`] turns each request into a blob and
//! the metadata record kept in the dataset.

pub mod plan;
pub mod renderer;

pub use plan::{DocumentPlanner, DocumentRequest, FOLLOW_UP_CONSENT_PROBABILITY};
pub use renderer::{DocumentMetadata, DocumentRenderer, PlainTextRenderer, RenderedDocument};
