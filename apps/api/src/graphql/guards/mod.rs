//! GraphQL guards for the Bookshelf API

mod capability;

pub use capability::{CapabilityGuard, Permissions};
