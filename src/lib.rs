//! Content backend for a personal site: quotes, resources, videos, blog
//! posts and a visual thesaurus, each kept as a densely ordered list that
//! the dashboard can reorder, plus the published views the public site reads.

pub mod accounts;
pub mod blog;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod mail;
pub mod models;
pub mod public;
pub mod schema;
pub mod store;
pub mod thesaurus;

use crate::config::Config;
use crate::mail::MailTransport;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;

pub use error::{CmsError, Lookup, Result};

pub struct State {
    pub database: DatabaseConnection,
    pub config: Config,
    pub mailer: Arc<dyn MailTransport>,
}

impl State {
    pub async fn connect(config: Config, mailer: Arc<dyn MailTransport>) -> std::result::Result<State, DbErr> {
        let mut options = ConnectOptions::new(config.database().to_string());
        options.sqlx_logging(false);
        if config.database().starts_with("sqlite::memory:") {
            // every pooled connection would get its own empty database
            options.max_connections(1);
        }
        let database = Database::connect(options).await?;

        Ok(State {
            database,
            config,
            mailer,
        })
    }
}
