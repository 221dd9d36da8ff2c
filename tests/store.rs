mod common;

use common::{dense, orders, positions, seed, state};
use lectern::models::node::NodeFields;
use lectern::models::post::PostFields;
use lectern::models::quote::QuoteFields;
use lectern::models::resource::ResourceFields;
use lectern::models::video::VideoFields;
use lectern::models::{node, post, quote, resource, video};
use lectern::store::{self, OrderedEntity, Reorder};
use lectern::{CmsError, Lookup};
use sea_orm::DatabaseConnection;
use serde_json::json;

const SEEDED: usize = 6;

async fn create_appends<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    seed::<E>(db, SEEDED).await;
    assert_eq!(orders::<E>(db).await, dense(SEEDED));

    let added = store::create::<E>(db).await.unwrap();
    assert_eq!(E::order_of(&added), SEEDED as i32);
    assert_eq!(orders::<E>(db).await, dense(SEEDED + 1));
}

async fn create_at_shifts_tail<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let ids = seed::<E>(db, SEEDED).await;
    let before = positions::<E>(db).await;

    let added = store::create_at::<E>(db, 2).await.unwrap();
    let at_two = store::get_by_order::<E>(db, 2).await.unwrap();
    assert_eq!(E::id_of(&at_two), E::id_of(&added));
    assert_eq!(orders::<E>(db).await, dense(SEEDED + 1));

    for (id, order) in before {
        let now = E::order_of(&store::get_by_id::<E>(db, id).await.unwrap());
        let expected = if order >= 2 { order + 1 } else { order };
        assert_eq!(now, expected, "{} {id}", E::KIND);
    }

    let front = store::create_at::<E>(db, 0).await.unwrap();
    assert_eq!(E::order_of(&front), 0);
    assert_eq!(orders::<E>(db).await, dense(SEEDED + 2));
    assert!(!ids.contains(&E::id_of(&front)));
}

async fn delete_compacts<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let ids = seed::<E>(db, SEEDED).await;

    let middle = store::get_by_order::<E>(db, 3).await.unwrap();
    store::delete::<E>(db, E::id_of(&middle)).await.unwrap();
    assert_eq!(orders::<E>(db).await, dense(SEEDED - 1));

    let first = store::get_by_order::<E>(db, 0).await.unwrap();
    store::delete::<E>(db, E::id_of(&first)).await.unwrap();
    assert_eq!(orders::<E>(db).await, dense(SEEDED - 2));

    let err = store::get_by_id::<E>(db, E::id_of(&first)).await.unwrap_err();
    assert!(matches!(err, CmsError::NotFound { .. }));

    for id in ids {
        let _ = store::delete::<E>(db, id).await;
    }
    assert!(orders::<E>(db).await.is_empty());
}

async fn lookups_fail_cleanly<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    seed::<E>(db, 2).await;

    match store::get_by_id::<E>(db, 1234).await {
        Err(CmsError::NotFound { kind, lookup }) => {
            assert_eq!(kind, E::KIND);
            assert_eq!(lookup, Lookup::Id(1234));
        }
        other => panic!("expected not found, got {:?}", other.map(|_| ())),
    }
    assert!(matches!(
        store::get_by_order::<E>(db, 1234).await,
        Err(CmsError::NotFound { lookup: Lookup::Order(1234), .. })
    ));
    assert!(matches!(
        store::delete::<E>(db, 1234).await,
        Err(CmsError::NotFound { .. })
    ));
    assert!(matches!(
        store::update_from_json::<E>(db, 1234, json!({ "published": false })).await,
        Err(CmsError::NotFound { .. })
    ));
    assert_eq!(orders::<E>(db).await, dense(2));
}

async fn batch_reorder<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let ids = seed::<E>(db, SEEDED).await;
    let reversed = ids
        .iter()
        .enumerate()
        .map(|(i, id)| Reorder {
            id: *id,
            order: (SEEDED - 1 - i) as i32,
        })
        .collect::<Vec<_>>();

    store::update_order_batch::<E>(db, &reversed).await.unwrap();
    for entry in &reversed {
        let model = store::get_by_id::<E>(db, entry.id).await.unwrap();
        assert_eq!(E::order_of(&model), entry.order);
    }

    let before = positions::<E>(db).await;
    let broken = vec![
        Reorder { id: ids[0], order: 0 },
        Reorder { id: 9999, order: 1 },
    ];
    let err = store::update_order_batch::<E>(db, &broken).await.unwrap_err();
    assert!(matches!(err, CmsError::NotFound { .. }));
    assert_eq!(positions::<E>(db).await, before);

    let negative = vec![Reorder { id: ids[0], order: -1 }];
    assert!(matches!(
        store::update_order_batch::<E>(db, &negative).await,
        Err(CmsError::Validation(_))
    ));
}

async fn published_only<E>(db: &DatabaseConnection)
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let ids = seed::<E>(db, 4).await;
    store::update_from_json::<E>(db, ids[1], json!({ "published": false }))
        .await
        .unwrap();

    let published = store::list_published::<E>(db).await.unwrap();
    let published_ids = published.iter().map(E::id_of).collect::<Vec<_>>();
    assert_eq!(published_ids.len(), 3);
    assert!(!published_ids.contains(&ids[1]));

    assert_eq!(store::list_all::<E>(db).await.unwrap().len(), 4);

    let rows = store::dashboard::<E>(db).await.unwrap();
    assert_eq!(rows.iter().map(|r| r.order).collect::<Vec<_>>(), dense(4));
    assert!(!rows[1].published);
}

macro_rules! for_every_kind {
    ($($check:ident),* $(,)?) => {
        mod every_kind {
            use super::*;
            $(
                #[tokio::test]
                async fn $check() {
                    for kind in 0..5 {
                        let state = state().await;
                        let db = &state.database;
                        match kind {
                            0 => super::$check::<quote::Entity>(db).await,
                            1 => super::$check::<resource::Entity>(db).await,
                            2 => super::$check::<video::Entity>(db).await,
                            3 => super::$check::<post::Entity>(db).await,
                            _ => super::$check::<node::Entity>(db).await,
                        }
                    }
                }
            )*
        }
    };
}

for_every_kind!(
    create_appends,
    create_at_shifts_tail,
    delete_compacts,
    lookups_fail_cleanly,
    batch_reorder,
    published_only,
);

#[tokio::test]
async fn create_at_past_the_end_leaves_a_gap() {
    let state = state().await;
    let db = &state.database;
    seed::<quote::Entity>(db, 3).await;

    let far = store::create_at::<quote::Entity>(db, 10).await.unwrap();
    assert_eq!(far.order, 10);
    assert_eq!(orders::<quote::Entity>(db).await, vec![0, 1, 2, 10]);
}

#[tokio::test]
async fn negative_position_is_refused() {
    let state = state().await;
    let err = store::create_at::<quote::Entity>(&state.database, -1)
        .await
        .unwrap_err();
    assert!(matches!(err, CmsError::Validation(_)));
}

#[tokio::test]
async fn quote_update_round_trip() {
    let state = state().await;
    let db = &state.database;
    let id = seed::<quote::Entity>(db, 1).await[0];

    let fields = QuoteFields {
        author: Some("Piccinini".into()),
        text: Some("Un giorno o un'altro..".into()),
        published: Some(false),
    };
    let updated = store::update_by_id::<quote::Entity>(db, id, fields).await.unwrap();
    let fetched = store::get_by_id::<quote::Entity>(db, id).await.unwrap();
    assert_eq!(updated, fetched);
    assert_eq!(fetched.author, "Piccinini");
    assert_eq!(fetched.text, "Un giorno o un'altro..");
    assert!(!fetched.published);

    let json = quote::Entity::to_json(&fetched);
    assert_eq!(json["author"], "Piccinini");
    assert_eq!(json["order"], 0);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let state = state().await;
    let db = &state.database;
    let id = seed::<resource::Entity>(db, 1).await[0];

    let fields = ResourceFields {
        title: Some("The Rust Book".into()),
        text: Some("Where to start.".into()),
        uri: Some("https://doc.rust-lang.org/book/".into()),
        uri_title: Some("doc.rust-lang.org".into()),
        published: None,
    };
    store::update_by_id::<resource::Entity>(db, id, fields).await.unwrap();

    let only_title = ResourceFields {
        title: Some("The Book".into()),
        ..Default::default()
    };
    let updated = store::update_by_id::<resource::Entity>(db, id, only_title)
        .await
        .unwrap();
    assert_eq!(updated.title, "The Book");
    assert_eq!(updated.uri_title, "doc.rust-lang.org");
    assert!(updated.published);

    let untouched = store::update_by_id::<resource::Entity>(db, id, ResourceFields::default())
        .await
        .unwrap();
    assert_eq!(untouched, updated);
}

#[tokio::test]
async fn video_description_travels_as_text() {
    let state = state().await;
    let db = &state.database;
    let id = seed::<video::Entity>(db, 1).await[0];

    let fields = VideoFields {
        title: Some("Talk".into()),
        text: Some("An hour on ownership.".into()),
        url: Some("https://videos.example/talk".into()),
        published: None,
    };
    let video = store::update_by_id::<video::Entity>(db, id, fields).await.unwrap();
    assert_eq!(video.description, "An hour on ownership.");
    assert_eq!(video::Entity::to_json(&video)["text"], "An hour on ownership.");
    assert_eq!(video::Entity::row(&video).secondary, "An hour on ownership.");

    let by_alias = store::update_from_json::<video::Entity>(db, id, json!({ "description": "Shorter." }))
        .await
        .unwrap();
    assert_eq!(by_alias.description, "Shorter.");
}

#[tokio::test]
async fn node_relations_round_trip_as_lists() {
    let state = state().await;
    let db = &state.database;
    let id = seed::<node::Entity>(db, 1).await[0];

    let fields = NodeFields {
        title: Some("silent".into()),
        text: Some("making no sound".into()),
        example: Some("a silent room".into()),
        synonyms: Some(vec!["calm".into(), "quiet".into()]),
        antonyms: Some(vec!["loud".into()]),
        published: None,
    };
    store::update_by_id::<node::Entity>(db, id, fields).await.unwrap();

    let node = store::get_by_id::<node::Entity>(db, id).await.unwrap();
    assert_eq!(node.synonym_terms().into_vec(), vec!["calm", "quiet"]);
    assert_eq!(node.antonym_terms().into_vec(), vec!["loud"]);
    assert_eq!(node::Entity::to_json(&node)["synonyms"], json!(["calm", "quiet"]));
}

#[tokio::test]
async fn post_edit_stamps_date_updated() {
    let state = state().await;
    let db = &state.database;
    let post = store::create::<post::Entity>(db).await.unwrap();
    assert!(post.date_updated.is_none());

    let fields = PostFields {
        title: Some("First light".into()),
        ..Default::default()
    };
    let edited = store::update_by_id::<post::Entity>(db, post.id, fields).await.unwrap();
    assert_eq!(edited.title, "First light");
    assert!(edited.date_updated.is_some());
    assert_eq!(edited.date_created, post.date_created);
}

#[tokio::test]
async fn malformed_fields_are_validation_failures() {
    let state = state().await;
    let db = &state.database;
    let id = seed::<quote::Entity>(db, 1).await[0];

    for bad in [json!({ "author": 12 }), json!({ "colour": "red" }), json!("text")] {
        let err = store::update_from_json::<quote::Entity>(db, id, bad).await.unwrap_err();
        assert!(matches!(err, CmsError::Validation(_)));
        assert!(err.is_client_error());
    }
}
