//! Terminal implementation of the UI boundary.

use catalog_app::{Notice, Route, Ui};
use dialoguer::Confirm;

pub struct TerminalUi {
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Ui for TerminalUi {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "confirmation prompt failed; treating as no");
                false
            })
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(message) => println!("{message}"),
            Notice::Error(message) => eprintln!("error: {message}"),
        }
    }

    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
    }
}
