//! Recommendation request, report file and email

use std::path::PathBuf;

use anyhow::Result;

use crate::console::Console;
use crate::error::FinderError;
use crate::mail::{MailAttachment, MailMessage, Mailer};
use crate::model::{flatten_records, Catalog, SeedRequest, SEED_CAP};
use crate::report;
use crate::view;

use super::input::is_yes;
use super::Session;

impl<C: Catalog, M: Mailer, K: Console> Session<C, M, K> {
    pub(super) async fn recommend(&mut self) -> Result<()> {
        let request = SeedRequest::from_state(&self.state, SEED_CAP)?;
        tracing::info!(seeds = request.len(), "Requesting recommendations");

        let items = self.catalog.recommendations(&request).await?;
        let table = flatten_records(&items)
            .map_err(|e| FinderError::upstream("Reading recommendations", e))?;
        tracing::debug!(
            rows = table.len(),
            columns = ?table.columns().collect::<Vec<_>>(),
            "Recommendations flattened"
        );

        self.say(&view::recommendations_table(&table, self.options.width));
        let html = report::render_report(&self.state, &table);

        let written = if self.confirm("Would you like to write these recommendations to a file?[y/n] ")? {
            self.write_report(&html)
        } else {
            None
        };

        if self.confirm("Would you like to email this list to yourself?[y/n] ")? {
            self.email(&html, written.is_some()).await?;
        }
        Ok(())
    }

    /// Write failures are reported and otherwise ignored.
    fn write_report(&mut self, html: &str) -> Option<PathBuf> {
        let path = self.reports.next_path();
        match self.reports.write(&path, html) {
            Ok(()) => {
                self.say(&format!("Written to file: {}\n", path.display()));
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Report not written");
                self.say(&view::error(&format!("Could not write the report: {e}")));
                None
            }
        }
    }

    async fn email(&mut self, html: &str, attach: bool) -> Result<()> {
        let Some(sender) = self.ask("Enter your email address: ")? else {
            return Ok(());
        };
        let Some(list) = self.ask("Enter a comma-delimited list of recipients: ")? else {
            return Ok(());
        };
        let sender = sender.trim().to_string();

        let message = MailMessage {
            to: MailMessage::recipients(&sender, &list),
            from: sender,
            subject: self.options.mail_subject.clone(),
            html: html.to_string(),
            attachment: attach.then(|| MailAttachment {
                filename: self.options.attachment_name.clone(),
                content: html.as_bytes().to_vec(),
            }),
        };

        match self.mailer.send(&message).await {
            Ok(()) => self.say(&view::success("Email sent successfully!")),
            Err(e) => {
                tracing::warn!(error = %e, "Email not delivered");
                self.say(&view::error("Email sent unsuccessfully."));
            }
        }
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ask(prompt)?.is_some_and(|answer| is_yes(&answer)))
    }
}
