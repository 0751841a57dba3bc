//! Interaction with the person running the generator

use crate::error::CrudResult;

/// Answer that declines an overwrite; anything else accepts it
pub const DECLINE: &str = "n";

/// Interactive console collaborator
pub trait Prompter {
    /// Ask `question` and return the raw answer, `default` when left empty
    ///
    /// # Errors
    ///
    /// Returns [`crate::CrudError::Prompt`] if no answer can be read
    fn ask(&self, question: &str, default: &str) -> CrudResult<String>;

    /// Report progress
    fn info(&self, message: &str);

    /// Report a failure
    fn error(&self, message: &str);
}

/// Ask whether an existing artifact may be replaced
///
/// Only the literal answer `n` declines. Anything else, including `N`, `no`
/// or an empty answer, overwrites.
///
/// # Errors
///
/// Propagates prompt failures
pub fn confirm_overwrite(prompter: &dyn Prompter, label: &str) -> CrudResult<bool> {
    let answer = prompter.ask(&format!("{label} exists. Overwrite (y/n)?"), "y")?;
    Ok(answer != DECLINE)
}
