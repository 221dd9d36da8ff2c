//! What the public site and API may see: published rows only, reduced to the
//! fields a visitor needs.

use crate::error::Result;
use crate::models::post_content::{self, ContentType};
use crate::models::{post, quote, resource, video};
use crate::store;
use crate::thesaurus::{self, NodeTitle};
use lectern_core::{date::pretty_date, truncate};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuote {
    pub id: i32,
    pub author: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicResource {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub uri: String,
    pub uri_title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicVideo {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub url: String,
}

/// A blog index entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub sub_title: String,
    pub date: String,
    pub preview: String,
}

pub async fn quotes(db: &DatabaseConnection) -> Result<Vec<PublicQuote>> {
    Ok(store::list_published::<quote::Entity>(db)
        .await?
        .into_iter()
        .map(|q| PublicQuote {
            id: q.id,
            author: q.author,
            text: q.text,
        })
        .collect())
}

pub async fn resources(db: &DatabaseConnection) -> Result<Vec<PublicResource>> {
    Ok(store::list_published::<resource::Entity>(db)
        .await?
        .into_iter()
        .map(|r| PublicResource {
            id: r.id,
            title: r.title,
            text: r.text,
            uri: r.uri,
            uri_title: r.uri_title,
        })
        .collect())
}

pub async fn videos(db: &DatabaseConnection) -> Result<Vec<PublicVideo>> {
    Ok(store::list_published::<video::Entity>(db)
        .await?
        .into_iter()
        .map(|v| PublicVideo {
            id: v.id,
            title: v.title,
            text: v.description,
            url: v.url,
        })
        .collect())
}

/// Published posts, newest first, each previewed by its first paragraph.
pub async fn posts(db: &DatabaseConnection, preview_length: usize) -> Result<Vec<PostSummary>> {
    let posts = store::list_published::<post::Entity>(db).await?;
    let ids = posts.iter().map(|p| p.id).collect::<Vec<i32>>();

    let paragraphs = post_content::Entity::find()
        .filter(post_content::Column::PostId.is_in(ids))
        .filter(post_content::Column::ContentType.eq(ContentType::Paragraph))
        .order_by_asc(post_content::Column::Order)
        .order_by_asc(post_content::Column::Id)
        .all(db)
        .await?;

    let mut first = HashMap::new();
    for paragraph in paragraphs {
        first.entry(paragraph.post_id).or_insert(paragraph.payload);
    }

    Ok(posts
        .into_iter()
        .map(|p| PostSummary {
            id: p.id,
            preview: first
                .get(&p.id)
                .map(|text| truncate(text, preview_length))
                .unwrap_or_default(),
            date: pretty_date(&p.date_created),
            title: p.title,
            sub_title: p.sub_title,
        })
        .collect())
}

pub async fn thesaurus(db: &DatabaseConnection) -> Result<Vec<NodeTitle>> {
    thesaurus::titles(db).await
}
