// UI layer: the few interactive bits (hidden token prompt, numbered
// selection, confirmation) built on `dialoguer`, and the `indicatif`
// spinner shown while a request is in flight.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Ask for the API token without echoing it.
pub fn prompt_token() -> Result<String> {
    Password::new()
        .with_prompt("Enter your ClickUp API token")
        .interact()
        .map_err(Error::Prompt)
}

/// Keyboard-driven choice among `items`; returns the chosen index.
pub fn choose<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(Error::Prompt)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(Error::Prompt)
}

/// Run `f` behind a spinner. The spinner draws to stderr and stays hidden
/// when stderr is not a terminal.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    let style =
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}
