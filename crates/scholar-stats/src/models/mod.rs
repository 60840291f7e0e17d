//! Data models.
//!
//! Wire models (`Author`, `Publication`) mirror the Semantic Scholar API with
//! every field optional; snapshot models are the fixed output schema.

mod author;
mod publication;
mod snapshot;

pub use author::{Author, AuthorHandle, AuthorRef};
pub use publication::{Publication, PublicationId};
pub use snapshot::{AuthorProfile, Papers, PublicationRecord, Snapshot};
