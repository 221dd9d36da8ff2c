use super::set_if;
use crate::store::{DashboardRow, OrderedEntity};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order: i32,
    pub published: bool,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// `text` is the description, under the name every other kind uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoFields {
    pub title: Option<String>,
    #[serde(alias = "description")]
    pub text: Option<String>,
    pub url: Option<String>,
    pub published: Option<bool>,
}

impl OrderedEntity for Entity {
    type Active = ActiveModel;
    type Fields = VideoFields;

    const KIND: &'static str = "video";

    fn id_column() -> Column {
        Column::Id
    }

    fn order_column() -> Column {
        Column::Order
    }

    fn published_column() -> Column {
        Column::Published
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
            description: Set(String::new()),
            url: Set(String::new()),
            ..Default::default()
        }
    }

    fn patch(fields: VideoFields) -> ActiveModel {
        ActiveModel {
            title: set_if(fields.title),
            description: set_if(fields.text),
            url: set_if(fields.url),
            published: set_if(fields.published),
            ..Default::default()
        }
    }

    fn to_json(model: &Model) -> serde_json::Value {
        json!({
            "id": model.id,
            "order": model.order,
            "published": model.published,
            "title": model.title,
            "text": model.description,
            "url": model.url,
        })
    }

    fn row(model: &Model) -> DashboardRow {
        DashboardRow {
            id: model.id,
            order: model.order,
            published: model.published,
            primary: model.title.clone(),
            secondary: model.description.clone(),
        }
    }
}
