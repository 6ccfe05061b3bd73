//! Attachment metadata.
//!
//! Files themselves live outside the system; only their metadata is stored,
//! bound to one expense and removed with it.

mod types;

pub use types::Attachment;
