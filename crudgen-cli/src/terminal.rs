//! Terminal prompter

use console::style;
use crudgen::{CrudError, CrudResult, Prompter};
use dialoguer::Input;

/// [`Prompter`] that talks to the terminal
///
/// Progress goes to stdout, failures to stderr. Questions are read with
/// `dialoguer`; an empty answer takes the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    /// Create a prompter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&self, question: &str, default: &str) -> CrudResult<String> {
        Input::<String>::new()
            .with_prompt(question)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(|err| CrudError::Prompt(err.to_string()))
    }

    fn info(&self, message: &str) {
        println!("{}", style(message).cyan());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("error:").red().bold(), style(message).red());
    }
}
