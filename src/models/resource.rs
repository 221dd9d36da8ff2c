use super::set_if;
use crate::store::{DashboardRow, OrderedEntity};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A link to something worth reading elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order: i32,
    pub published: bool,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub uri: String,
    pub uri_title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceFields {
    pub title: Option<String>,
    pub text: Option<String>,
    pub uri: Option<String>,
    pub uri_title: Option<String>,
    pub published: Option<bool>,
}

impl OrderedEntity for Entity {
    type Active = ActiveModel;
    type Fields = ResourceFields;

    const KIND: &'static str = "resource";

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
            text: Set(String::new()),
            uri: Set(String::new()),
            uri_title: Set(String::new()),
            ..Default::default()
        }
    }

    fn patch(fields: ResourceFields) -> ActiveModel {
        ActiveModel {
            title: set_if(fields.title),
            text: set_if(fields.text),
            uri: set_if(fields.uri),
            uri_title: set_if(fields.uri_title),
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
            "text": model.text,
            "uri": model.uri,
            "uri_title": model.uri_title,
        })
    }

    fn row(model: &Model) -> DashboardRow {
        DashboardRow {
            id: model.id,
            order: model.order,
            published: model.published,
            primary: model.title.clone(),
            secondary: model.text.clone(),
        }
    }
}
