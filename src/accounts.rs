//! Site accounts. Sessions and tokens are someone else's job; this keeps the
//! rows, the password hashes and the notices that go out when they change.

use crate::error::{CmsError, Lookup, Result};
use crate::mail::{send_async, Message};
use crate::models::user;
use crate::State;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lectern_core::Terms;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use tracing::{info, instrument};

const MAX_FIELD: usize = 64;

static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
}

pub struct Registered {
    pub user: user::Model,
    /// The confirmation mail; nobody has to wait on it.
    pub mail: JoinHandle<()>,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|why| CmsError::Password(why.to_string()))
}

/// Whether `password` matches the stored hash. A malformed hash never matches.
pub fn verify_password(user: &user::Model, password: &str) -> bool {
    match PasswordHash::new(&user.password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn check(new_user: &NewUser) -> Result<()> {
    let email = new_user.email.trim();
    if email.is_empty() || email.len() > MAX_FIELD || !email.contains('@') {
        return Err(CmsError::validation("a valid email address is required"));
    }
    if new_user.username.len() > MAX_FIELD || !USERNAME.is_match(&new_user.username) {
        return Err(CmsError::validation(
            "usernames may only have letters, numbers, dots, or underscores",
        ));
    }
    if new_user.first_name.len() > MAX_FIELD || new_user.last_name.len() > MAX_FIELD {
        return Err(CmsError::validation("names are limited to 64 characters"));
    }
    if new_user.password.is_empty() {
        return Err(CmsError::validation("a password is required"));
    }
    Ok(())
}

/// Stores a new account, then sends the confirmation notice once the row is
/// committed.
#[instrument(skip(state, new_user), fields(username = %new_user.username))]
pub async fn register(state: &State, new_user: NewUser) -> Result<Registered> {
    check(&new_user)?;
    let email = new_user.email.trim().to_string();
    let password_hash = hash_password(&new_user.password)?;

    let txn = state.database.begin().await?;
    let taken = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(email.as_str()))
                .add(user::Column::Username.eq(new_user.username.as_str())),
        )
        .one(&txn)
        .await?;
    if let Some(taken) = taken {
        return Err(CmsError::validation(if taken.email == email {
            "that email is already registered"
        } else {
            "that username is already registered"
        }));
    }

    let user = user::ActiveModel {
        email: Set(email),
        username: Set(new_user.username),
        first_name: Set(new_user.first_name),
        last_name: Set(new_user.last_name),
        password_hash: Set(password_hash),
        roles: Set(String::new()),
        is_active: Set(true),
        confirmed: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(id = user.id, "registered");

    let message = Message::new(
        &state.config,
        &user.email,
        "Confirm Your Account",
        format!(
            "Welcome to {}, {}! Follow the link we send next to confirm your account.",
            state.config.sitename(),
            user.username
        ),
    );
    let mail = send_async(state.mailer.clone(), message);

    Ok(Registered { user, mail })
}

pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found("user", Lookup::Id(id)))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found("user", Lookup::Email(email.to_string())))
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<user::Model> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found("user", Lookup::Username(username.to_string())))
}

pub async fn set_roles(db: &DatabaseConnection, id: i32, roles: Vec<String>) -> Result<user::Model> {
    if let Some(role) = Terms::delimited(&roles) {
        return Err(CmsError::validation(format!("role {role:?} contains a comma")));
    }
    get_user(db, id).await?;
    Ok(user::ActiveModel {
        id: Unchanged(id),
        roles: Set(Terms::new(roles).to_string()),
        ..Default::default()
    }
    .update(db)
    .await?)
}

/// Replaces the password after checking the current one, then tells the
/// owner by mail.
#[instrument(skip(state, current, new))]
pub async fn change_password(state: &State, id: i32, current: &str, new: &str) -> Result<JoinHandle<()>> {
    let user = get_user(&state.database, id).await?;
    if !verify_password(&user, current) {
        return Err(CmsError::validation("invalid password"));
    }
    if new.is_empty() {
        return Err(CmsError::validation("a password is required"));
    }

    let user = user::ActiveModel {
        id: Unchanged(id),
        password_hash: Set(hash_password(new)?),
        ..Default::default()
    }
    .update(&state.database)
    .await?;

    info!(id, "password changed");
    let message = Message::new(
        &state.config,
        &user.email,
        "Password Changed",
        format!("The password for {} was just changed.", user.username),
    );
    Ok(send_async(state.mailer.clone(), message))
}
