use color_eyre::Result;
use lectern_core::LinkStrength;
use std::env::var;
use std::str::FromStr;

pub const DEFAULT_SUBJECT_PREFIX: &str = "[Website Message]: ";
pub const DEFAULT_PREVIEW_LENGTH: usize = 120;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: String,
    pub sitename: String,
    pub mail_sender: String,
    pub admin_mail: String,
    pub subject_prefix: String,
    pub preview_length: usize,
    pub link_strength: LinkStrength,
}

impl Config {
    pub fn new() -> Result<Config> {
        let database = var("DATABASE_URL")?;
        let sitename = var("SITENAME")?;
        let mail_sender = var("MAIL_SENDER")?;
        let admin_mail = var("APP_ADMIN_MAIL")?;
        let subject_prefix =
            var("MAIL_SUBJECT_PREFIX").unwrap_or_else(|_| DEFAULT_SUBJECT_PREFIX.to_string());
        let preview_length = var_or("PREVIEW_LENGTH", DEFAULT_PREVIEW_LENGTH)?;

        let defaults = LinkStrength::default();
        let link_strength = LinkStrength {
            strong: var_or("GRAPH_STRONG_LINK", defaults.strong)?,
            weak: var_or("GRAPH_WEAK_LINK", defaults.weak)?,
        };

        Ok(Config {
            database,
            sitename,
            mail_sender,
            admin_mail,
            subject_prefix,
            preview_length,
            link_strength,
        })
    }

    /// In-memory SQLite and placeholder mail addresses.
    pub fn testing() -> Config {
        Config {
            database: "sqlite::memory:".to_string(),
            sitename: "lectern".to_string(),
            mail_sender: "site@example.com".to_string(),
            admin_mail: "admin@example.com".to_string(),
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            link_strength: LinkStrength::default(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn sitename(&self) -> &str {
        &self.sitename
    }

    pub fn mail_sender(&self) -> &str {
        &self.mail_sender
    }

    pub fn admin_mail(&self) -> &str {
        &self.admin_mail
    }

    pub fn subject_prefix(&self) -> &str {
        &self.subject_prefix
    }

    pub fn preview_length(&self) -> usize {
        self.preview_length
    }

    pub fn link_strength(&self) -> LinkStrength {
        self.link_strength
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Ok(raw) => Ok(raw.parse::<T>()?),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::{remove_var, set_var};

    #[test]
    fn reads_environment_with_defaults() {
        set_var("DATABASE_URL", "sqlite::memory:");
        set_var("SITENAME", "lectern");
        set_var("MAIL_SENDER", "site@example.com");
        set_var("APP_ADMIN_MAIL", "admin@example.com");
        set_var("GRAPH_WEAK_LINK", "0.25");
        remove_var("SECRET");
        remove_var("PREVIEW_LENGTH");

        let config = Config::new().unwrap();
        assert_eq!(config.sitename(), "lectern");
        assert_eq!(config.preview_length(), DEFAULT_PREVIEW_LENGTH);
        assert_eq!(config.subject_prefix(), DEFAULT_SUBJECT_PREFIX);
        assert_eq!(config.link_strength().weak, 0.25);
        assert_eq!(config.link_strength().strong, 0.7);
    }
}
