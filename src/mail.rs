//! Outgoing mail. Delivery itself belongs to a [`MailTransport`]; this module
//! only builds messages and hands them off on their own thread so a slow or
//! failing server never holds up the request that triggered the mail.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl Message {
    /// A message from the site sender, subject prefixed per `config`.
    pub fn new(config: &Config, to: &str, subject: &str, body: String) -> Self {
        Message {
            sender: config.mail_sender().to_string(),
            to: to.to_string(),
            subject: format!("{}{subject}", config.subject_prefix()),
            body,
            reply_to: None,
        }
    }

    pub fn reply_to(mut self, address: &str) -> Self {
        self.reply_to = Some(address.to_string());
        self
    }
}

#[derive(Debug, Error)]
#[error("mail to {to} not delivered: {reason}")]
pub struct MailError {
    pub to: String,
    pub reason: String,
}

pub trait MailTransport: Send + Sync {
    fn send(&self, message: &Message) -> Result<(), MailError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, "mail");
        Ok(())
    }
}

/// Sends `message` on a new thread. Failures are logged and dropped; the
/// handle is only useful for waiting on delivery.
pub fn send_async(transport: Arc<dyn MailTransport>, message: Message) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(why) = transport.send(&message) {
            warn!(%why, "mail dispatch failed");
        }
    })
}
