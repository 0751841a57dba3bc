//! crudgen CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod commands;
pub mod terminal;

pub use cli::{Cli, Commands};
pub use commands::{MakeCommand, StubsCommand};
pub use terminal::ConsolePrompter;
