//! Controller module - the interactive session
//!
//! The session is a small state machine driven from the console. It owns
//! the seed state and hands it to the catalog when recommendations are
//! requested.
//!
//! - `input`: menu and selection parsing
//! - `navigation`: genre, artist and track selection screens
//! - `recommend`: recommendation table, report file and email

mod input;
mod navigation;
mod recommend;

use anyhow::Result;

use crate::config::AppConfig;
use crate::console::Console;
use crate::error::FinderError;
use crate::mail::Mailer;
use crate::model::{Catalog, SessionState, SEED_CAP};
use crate::report::ReportSink;
use crate::view;

use input::parse_menu_choice;

/// Where the session currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    SelectGenre,
    SelectArtist,
    SelectTrack,
    Recommend,
    Quit,
}

/// Settings the session reads but never changes.
#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub display_limit: usize,
    pub width: u16,
    pub mail_subject: String,
    pub attachment_name: String,
}

impl SessionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            display_limit: config.session.display_limit,
            width: view::terminal_width(),
            mail_subject: config.mail.subject.clone(),
            attachment_name: config.mail.attachment_name.clone(),
        }
    }
}

pub struct Session<C, M, K> {
    catalog: C,
    mailer: M,
    console: K,
    reports: Box<dyn ReportSink>,
    options: SessionOptions,
    state: SessionState,
    phase: Phase,
}

impl<C: Catalog, M: Mailer, K: Console> Session<C, M, K> {
    pub fn new(
        catalog: C,
        mailer: M,
        console: K,
        reports: Box<dyn ReportSink>,
        options: SessionOptions,
    ) -> Self {
        Self {
            catalog,
            mailer,
            console,
            reports,
            options,
            state: SessionState::new(),
            phase: Phase::Menu,
        }
    }

    /// Drive the session until the user quits or an upstream error ends it.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("Session started");
        loop {
            tracing::debug!(phase = ?self.phase, seeds = self.state.total_seeds(), "Phase");
            let step = match self.phase {
                Phase::Menu => {
                    self.phase = self.menu()?;
                    continue;
                }
                Phase::SelectGenre => self.select_genre(),
                Phase::SelectArtist => self.select_artist().await,
                Phase::SelectTrack => self.select_track().await,
                Phase::Recommend => self.recommend().await,
                Phase::Quit => {
                    self.say("\nQuitting...");
                    tracing::info!("Session ended");
                    return Ok(());
                }
            };

            if let Err(err) = step {
                self.recover(err)?;
            }
            self.phase = Phase::Menu;
        }
    }

    /// Show the options and read a choice. End of input quits.
    fn menu(&mut self) -> Result<Phase> {
        self.say(&view::menu_table(&self.state.menu_rows(), self.options.width));
        if self.state.exceeds_cap() {
            self.say(&view::warning(&format!(
                "Only {SEED_CAP} seeds are sent per request (genres first, then artists, then tracks). \
                 Extra selections will not change the result."
            )));
        }

        loop {
            let Some(answer) = self.ask("What would you like to do? ")? else {
                return Ok(Phase::Quit);
            };
            match parse_menu_choice(&answer) {
                Some(phase) => return Ok(phase),
                None => self.say(&view::error("Invalid Choice!")),
            }
        }
    }

    /// Report a recoverable error and carry on, or print a diagnostic and
    /// hand the error back to end the session.
    fn recover(&mut self, err: anyhow::Error) -> Result<()> {
        match err.downcast_ref::<FinderError>() {
            Some(FinderError::InvalidSelection(input)) => {
                tracing::debug!(input = %input, "Rejected selection");
                self.say(&view::error("Invalid selection!"));
                self.say("Going back to menu...\n");
                Ok(())
            }
            Some(e) if e.is_recoverable() => {
                self.say(&view::error(&e.to_string()));
                self.say("Going back to menu...\n");
                Ok(())
            }
            _ => {
                tracing::error!(error = ?err, "Session aborted");
                self.say(&view::error(&Self::format_error(&err)));
                Err(err)
            }
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let status = error.downcast_ref::<FinderError>().and_then(FinderError::status);

        match status {
            Some(401) => "Authentication failed. Check your Spotify client credentials.".to_string(),
            Some(403) => "Request forbidden by the Spotify API.".to_string(),
            Some(404) => "The requested Spotify resource was not found.".to_string(),
            Some(429) => "Rate limited. Please wait a moment and try again.".to_string(),
            _ => format!("Error: {}", error),
        }
    }

    fn say(&mut self, text: &str) {
        self.console.write_line(text);
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.console.read_line(prompt)?)
    }
}
