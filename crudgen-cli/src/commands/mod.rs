//! CLI command implementations

pub mod make;
pub mod stubs;

pub use make::MakeCommand;
pub use stubs::{StubListing, StubsCommand};
