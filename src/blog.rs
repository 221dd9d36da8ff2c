//! Posts together with the content blocks they own.

use crate::error::{CmsError, Lookup, Result};
use crate::models::post::{self, PostFields, PostMeta};
use crate::models::post_content::{self, ContentInput};
use crate::models::user;
use crate::store::{self, OrderedEntity};
use chrono::Utc;
use lectern_core::BlogResponse;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

pub type BlogPage = BlogResponse<Vec<post_content::Model>, PostMeta>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    /// The post created just before.
    pub prev: Option<i32>,
    /// The post created just after.
    pub next: Option<i32>,
}

/// Creates an empty post by `author_id`, appended or inserted at `position`.
/// The author must exist.
#[instrument(skip(db))]
pub async fn create_post(
    db: &DatabaseConnection,
    author_id: Option<i32>,
    position: Option<i32>,
) -> Result<post::Model> {
    let txn = db.begin().await?;
    if let Some(id) = author_id {
        user::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CmsError::not_found("user", Lookup::Id(id)))?;
    }

    let mut active = post::Entity::blank(0);
    active.author_id = Set(author_id);
    let post = match position {
        Some(position) => store::insert_at::<post::Entity>(&txn, position, active).await?,
        None => store::append::<post::Entity>(&txn, active).await?,
    };
    txn.commit().await?;
    Ok(post)
}

pub async fn update_post(db: &DatabaseConnection, id: i32, fields: PostFields) -> Result<post::Model> {
    store::update_by_id::<post::Entity>(db, id, fields).await
}

async fn post_in<C: ConnectionTrait>(db: &C, id: i32) -> Result<post::Model> {
    post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found(post::Entity::KIND, Lookup::Id(id)))
}

async fn contents_in<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<Vec<post_content::Model>> {
    Ok(post_content::Entity::find()
        .filter(post_content::Column::PostId.eq(post_id))
        .order_by_asc(post_content::Column::Order)
        .order_by_asc(post_content::Column::Id)
        .all(db)
        .await?)
}

/// The blocks of a post, in reading order.
pub async fn contents(db: &DatabaseConnection, post_id: i32) -> Result<Vec<post_content::Model>> {
    post_in(db, post_id).await?;
    contents_in(db, post_id).await
}

/// Makes the post's blocks match `blocks`.
///
/// Blocks whose id already belongs to this post are rewritten in place, the
/// rest are inserted, and blocks of the post missing from `blocks` are
/// deleted. Each block's `order` becomes its index in `blocks`.
#[instrument(skip(db, blocks), fields(count = blocks.len()))]
pub async fn replace_contents(
    db: &DatabaseConnection,
    post_id: i32,
    blocks: Vec<ContentInput>,
) -> Result<Vec<post_content::Model>> {
    let txn = db.begin().await?;
    post_in(&txn, post_id).await?;

    let existing = contents_in(&txn, post_id)
        .await?
        .into_iter()
        .map(|block| block.id)
        .collect::<HashSet<i32>>();
    let kept = blocks
        .iter()
        .filter_map(|block| block.id)
        .filter(|id| existing.contains(id))
        .collect::<HashSet<i32>>();
    let stale = existing.difference(&kept).copied().collect::<Vec<i32>>();

    if !stale.is_empty() {
        post_content::Entity::delete_many()
            .filter(post_content::Column::Id.is_in(stale.clone()))
            .exec(&txn)
            .await?;
    }

    let mut seen = HashSet::new();
    for (order, block) in blocks.into_iter().enumerate() {
        let mut active = post_content::ActiveModel {
            post_id: Set(post_id),
            order: Set(order as i32),
            content_type: Set(block.content_type),
            payload: Set(block.payload),
            uri: Set(block.uri),
            css: Set(block.css),
            ..Default::default()
        };

        match block.id.filter(|id| kept.contains(id) && seen.insert(*id)) {
            Some(id) => {
                active.id = Unchanged(id);
                active.update(&txn).await?;
            }
            None => {
                active.insert(&txn).await?;
            }
        }
    }

    post::ActiveModel {
        id: Unchanged(post_id),
        date_updated: Set(Some(Utc::now())),
        ..Default::default()
    }
    .update(&txn)
    .await?;

    let contents = contents_in(&txn, post_id).await?;
    txn.commit().await?;

    debug!(removed = stale.len(), "contents replaced");
    Ok(contents)
}

/// Ids of the posts created immediately before and after `post_id`. Scans
/// every post; fine for a personal blog.
pub async fn neighbors(db: &DatabaseConnection, post_id: i32, published_only: bool) -> Result<Neighbors> {
    let mut query = post::Entity::find()
        .order_by_asc(post::Column::DateCreated)
        .order_by_asc(post::Column::Id);
    if published_only {
        query = query.filter(post::Column::Published.eq(true));
    }
    let posts = query.all(db).await?;

    let idx = posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| CmsError::not_found(post::Entity::KIND, Lookup::Id(post_id)))?;

    Ok(Neighbors {
        prev: idx.checked_sub(1).map(|i| posts[i].id),
        next: posts.get(idx + 1).map(|p| p.id),
    })
}

async fn page_for(db: &DatabaseConnection, post: post::Model) -> Result<BlogPage> {
    let around = neighbors(db, post.id, true).await?;
    let content = contents_in(db, post.id).await?;

    Ok(BlogResponse {
        content: Some(content),
        metadata: Some(post.meta()),
        prev_post_id: around.prev,
        next_post_id: around.next,
    })
}

/// The newest published post, or an empty page when nothing is published.
pub async fn most_recent(db: &DatabaseConnection) -> Result<BlogPage> {
    let latest = post::Entity::find()
        .filter(post::Column::Published.eq(true))
        .order_by_desc(post::Column::DateCreated)
        .order_by_desc(post::Column::Id)
        .one(db)
        .await?;

    match latest {
        Some(post) => page_for(db, post).await,
        None => Ok(BlogResponse::empty()),
    }
}

/// A published post with the ids of its published neighbors.
pub async fn page(db: &DatabaseConnection, post_id: i32) -> Result<BlogPage> {
    let post = post_in(db, post_id).await?;
    if !post.published {
        return Err(CmsError::not_found(post::Entity::KIND, Lookup::Id(post_id)));
    }
    page_for(db, post).await
}
