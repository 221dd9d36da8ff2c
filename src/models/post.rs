use super::set_if;
use crate::store::{DashboardRow, OrderedEntity};
use async_trait::async_trait;
use chrono::Utc;
use lectern_core::date::pretty_date;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, Order, Set};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order: i32,
    pub published: bool,
    pub title: String,
    pub sub_title: String,
    #[sea_orm(indexed)]
    pub date_created: DateTimeUtc,
    pub date_updated: Option<DateTimeUtc>,
    pub author_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_content::Entity")]
    Contents,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Author,
}

impl Related<super::post_content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contents.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Header shown above a post body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub id: i32,
    pub title: String,
    pub sub_title: String,
    pub author_id: Option<i32>,
    pub date_created: String,
    pub date_updated: String,
}

impl Model {
    pub fn meta(&self) -> PostMeta {
        PostMeta {
            id: self.id,
            title: self.title.clone(),
            sub_title: self.sub_title.clone(),
            author_id: self.author_id,
            date_created: pretty_date(&self.date_created),
            date_updated: self
                .date_updated
                .as_ref()
                .map(pretty_date)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostFields {
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub published: Option<bool>,
}

#[async_trait]
impl OrderedEntity for Entity {
    type Active = ActiveModel;
    type Fields = PostFields;

    const KIND: &'static str = "post";

    fn id_column() -> Column {
        Column::Id
    }

    fn order_column() -> Column {
        Column::Order
    }

    fn published_column() -> Column {
        Column::Published
    }

    fn published_sort() -> (Column, Order) {
        (Column::DateCreated, Order::Desc)
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }

    fn order_of(model: &Model) -> i32 {
        model.order
    }

    fn blank(order: i32) -> ActiveModel {
        ActiveModel {
            order: Set(order),
            published: Set(false),
            title: Set(String::new()),
            sub_title: Set(String::new()),
            date_created: Set(Utc::now()),
            date_updated: Set(None),
            author_id: Set(None),
            ..Default::default()
        }
    }

    /// Any edit stamps `date_updated`.
    fn patch(fields: PostFields) -> ActiveModel {
        ActiveModel {
            title: set_if(fields.title),
            sub_title: set_if(fields.sub_title),
            published: set_if(fields.published),
            date_updated: Set(Some(Utc::now())),
            ..Default::default()
        }
    }

    fn to_json(model: &Model) -> serde_json::Value {
        json!({
            "id": model.id,
            "order": model.order,
            "published": model.published,
            "title": model.title,
            "sub_title": model.sub_title,
            "author_id": model.author_id,
            "date_created": model.date_created,
            "date_updated": model.date_updated,
        })
    }

    fn row(model: &Model) -> DashboardRow {
        DashboardRow {
            id: model.id,
            order: model.order,
            published: model.published,
            primary: model.title.clone(),
            secondary: model.sub_title.clone(),
        }
    }

    async fn on_delete(txn: &DatabaseTransaction, id: i32) -> Result<(), DbErr> {
        super::post_content::Entity::delete_many()
            .filter(super::post_content::Column::PostId.eq(id))
            .exec(txn)
            .await?;
        Ok(())
    }
}
