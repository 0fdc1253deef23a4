//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::error::{DopplerError, Result};

use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

const PROMPT_ENV_PREFIX: &str = "DOPPLER_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts never block: they resolve to a `DOPPLER_PROMPT_<KEY>`
/// override when one is set, otherwise to the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("Doppler Error: {}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        match self.env_overrides.get(&env_key) {
            Some(value) => parse_answer(value).ok_or_else(|| {
                DopplerError::Other(anyhow!(
                    "Invalid answer '{}' in {} (expected yes or no)",
                    value,
                    env_key
                ))
            }),
            None => Ok(prompt.default),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in; the start message was already printed.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_and_clear(&mut self) {}
}
