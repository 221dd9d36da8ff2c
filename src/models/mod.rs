use sea_orm::{ActiveValue, Value};

pub mod node;
pub mod post;
pub mod post_content;
pub mod quote;
pub mod resource;
pub mod user;
pub mod video;

/// `Set` when the payload carries a value, `NotSet` otherwise.
pub(crate) fn set_if<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<Value>,
{
    match value {
        Some(value) => ActiveValue::Set(value),
        None => ActiveValue::NotSet,
    }
}
