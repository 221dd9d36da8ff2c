#![allow(dead_code)]

use lectern::config::Config;
use lectern::mail::{MailError, MailTransport, Message};
use lectern::store::{self, OrderedEntity};
use lectern::{schema, State};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Keeps every message instead of sending it.
#[derive(Default)]
pub struct Outbox(Mutex<Vec<Message>>);

impl Outbox {
    pub fn sent(&self) -> Vec<Message> {
        self.0.lock().unwrap().clone()
    }
}

impl MailTransport for Outbox {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.0.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub async fn state_with(outbox: Arc<Outbox>) -> State {
    let state = State::connect(Config::testing(), outbox).await.unwrap();
    schema::create_tables(&state.database).await.unwrap();
    state
}

pub async fn state() -> State {
    state_with(Arc::new(Outbox::default())).await
}

/// Appends `count` published rows of kind `E` and returns their ids.
pub async fn seed<E>(db: &DatabaseConnection, count: usize) -> Vec<i32>
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let mut ids = vec![];
    for _ in 0..count {
        let model = store::create::<E>(db).await.unwrap();
        let id = E::id_of(&model);
        store::update_from_json::<E>(db, id, json!({ "published": true }))
            .await
            .unwrap();
        ids.push(id);
    }
    ids
}

/// Every `order` of kind `E`, ascending.
pub async fn orders<E: OrderedEntity>(db: &DatabaseConnection) -> Vec<i32> {
    E::find()
        .order_by_asc(E::order_column())
        .all(db)
        .await
        .unwrap()
        .iter()
        .map(E::order_of)
        .collect()
}

/// `(id, order)` of kind `E`, by id.
pub async fn positions<E: OrderedEntity>(db: &DatabaseConnection) -> Vec<(i32, i32)> {
    let mut pairs = store::list_all::<E>(db)
        .await
        .unwrap()
        .iter()
        .map(|m| (E::id_of(m), E::order_of(m)))
        .collect::<Vec<_>>();
    pairs.sort();
    pairs
}

pub fn dense(count: usize) -> Vec<i32> {
    (0..count as i32).collect()
}
