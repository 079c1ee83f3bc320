pub mod identity;
pub mod loaders;
pub mod metadata;

pub use identity::{EmailDomain, SubmissionIdentity, SubmissionTimestamp};
pub use loaders::load_metadata;
pub use metadata::AssignmentMetadata;
