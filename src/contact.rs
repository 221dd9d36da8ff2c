use crate::error::{CmsError, Result};
use crate::mail::{send_async, Message};
use crate::State;
use lectern_core::contains_link;
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use tracing::info;

/// A note left through the public contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(CmsError::validation("name and message are required"));
        }
        if !self.email.contains('@') {
            return Err(CmsError::validation("a valid email address is required"));
        }
        if contains_link(&self.message) {
            return Err(CmsError::validation("messages may not contain links"));
        }
        Ok(())
    }
}

/// Forwards the message to the site admin, replies going to the sender.
pub fn submit(state: &State, contact: ContactMessage) -> Result<JoinHandle<()>> {
    contact.check()?;
    info!(name = %contact.name, "contact message received");

    let message = Message::new(
        &state.config,
        state.config.admin_mail(),
        &format!("New Message from {}", contact.name),
        contact.message,
    )
    .reply_to(&contact.email);

    Ok(send_async(state.mailer.clone(), message))
}
