//! Terminal implementations of the playground's external collaborators.

pub mod frame;
pub mod store;
pub mod textarea;
