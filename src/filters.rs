//! # Filters
//!
//! Draft filters are the in-progress (field, operator, value) triples a query
//! form edits. A [`FilterSet`] owns the drafts for exactly one form session
//! and is mutated synchronously by that session alone. Nothing in a draft is
//! validated until it is serialized for the wire; see [`serialize`].

mod draft;
mod serialize;

pub use self::draft::{DraftChange, DraftFilter, FilterSet};
pub use self::serialize::serialize;
