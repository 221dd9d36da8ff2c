use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[sea_orm(string_value = "paragraph")]
    Paragraph,
    #[sea_orm(string_value = "heading")]
    Heading,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "quote")]
    Quote,
    #[sea_orm(string_value = "code")]
    Code,
    #[sea_orm(string_value = "link")]
    Link,
}

/// One block of a post body. Owned by exactly one post.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub post_id: i32,
    pub order: i32,
    pub content_type: ContentType,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub uri: String,
    pub css: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A block as submitted by the editor. Blocks without an `id` are new.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub content_type: ContentType,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub css: String,
}
