//! Storage backend traits.

mod store;

pub use store::{DocumentStore, RevisionStamp};
