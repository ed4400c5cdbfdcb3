//! Email delivery through the SendGrid v3 mail API

use std::time::Duration;

use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

use crate::config::MailConfig;
use crate::error::FinderError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachment: Option<MailAttachment>,
}

impl MailMessage {
    /// Recipients parsed from a comma-delimited list. With at most one
    /// recipient the sender is added as well.
    pub fn recipients(sender: &str, list: &str) -> Vec<String> {
        let mut to: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(String::from)
            .collect();
        if to.len() <= 1 && !to.iter().any(|addr| addr == sender) {
            to.push(sender.to_string());
        }
        to
    }
}

pub trait Mailer {
    async fn send(&self, message: &MailMessage) -> Result<()>;
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct Attachment<'a> {
    content: String,
    filename: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    disposition: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment<'a>>,
}

impl<'a> SendRequest<'a> {
    fn new(message: &'a MailMessage) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: message.to.iter().map(|email| Address { email }).collect(),
            }],
            from: Address {
                email: &message.from,
            },
            subject: &message.subject,
            content: vec![Content {
                kind: "text/html",
                value: &message.html,
            }],
            attachments: message
                .attachment
                .iter()
                .map(|a| Attachment {
                    content: STANDARD.encode(&a.content),
                    filename: &a.filename,
                    kind: "text/html",
                    disposition: "attachment",
                })
                .collect(),
        }
    }
}

/// Mailer posting to SendGrid with a bearer API key
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SendGridMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: config.sendgrid_api_key.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Mailer for SendGridMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FinderError::MailDelivery("SENDGRID_API_KEY is not set".into()).into());
        };

        tracing::debug!(to = ?message.to, subject = %message.subject, "Sending mail");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&SendRequest::new(message))
            .send()
            .await
            .map_err(|e| FinderError::MailDelivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "SendGrid rejected the message");
            return Err(FinderError::MailDelivery(format!("SendGrid returned {status}")).into());
        }

        tracing::info!(%status, recipients = message.to.len(), "Mail accepted");
        Ok(())
    }
}
