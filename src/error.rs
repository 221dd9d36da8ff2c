use sea_orm::DbErr;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// How a missing record was looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Id(i32),
    Order(i32),
    Title(String),
    Email(String),
    Username(String),
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {id}"),
            Lookup::Order(order) => write!(f, "order {order}"),
            Lookup::Title(title) => write!(f, "title {title:?}"),
            Lookup::Email(email) => write!(f, "email {email:?}"),
            Lookup::Username(name) => write!(f, "username {name:?}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("no {kind} with {lookup}")]
    NotFound { kind: &'static str, lookup: Lookup },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("password hashing failed: {0}")]
    Password(String),
}

impl CmsError {
    pub fn not_found(kind: &'static str, lookup: Lookup) -> Self {
        CmsError::NotFound { kind, lookup }
    }

    pub fn validation(why: impl Into<String>) -> Self {
        CmsError::Validation(why.into())
    }

    /// The caller sent something wrong; retrying the same request won't help.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CmsError::NotFound { .. } | CmsError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;
