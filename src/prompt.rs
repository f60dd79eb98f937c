//! Interactive input, kept behind a trait so command logic is testable
//! without a terminal.

use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};

/// Source of interactive answers for commands with missing arguments.
pub trait InputProvider {
    /// Asks for a line of text; an empty answer is allowed.
    fn text(&self, prompt: &str) -> Result<String>;
    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// [`InputProvider`] backed by the terminal.
pub struct Terminal;

impl InputProvider for Terminal {
    fn text(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(0)
            .items(items)
            .interact()?;
        Ok(index)
    }
}
