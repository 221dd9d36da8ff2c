use super::set_if;
use crate::store::{DashboardRow, OrderedEntity};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order: i32,
    pub published: bool,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuoteFields {
    pub author: Option<String>,
    pub text: Option<String>,
    pub published: Option<bool>,
}

impl OrderedEntity for Entity {
    type Active = ActiveModel;
    type Fields = QuoteFields;

    const KIND: &'static str = "quote";

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
            author: Set(String::new()),
            text: Set(String::new()),
            ..Default::default()
        }
    }

    fn patch(fields: QuoteFields) -> ActiveModel {
        ActiveModel {
            author: set_if(fields.author),
            text: set_if(fields.text),
            published: set_if(fields.published),
            ..Default::default()
        }
    }

    fn to_json(model: &Model) -> serde_json::Value {
        json!({
            "id": model.id,
            "order": model.order,
            "published": model.published,
            "author": model.author,
            "text": model.text,
        })
    }

    fn row(model: &Model) -> DashboardRow {
        DashboardRow {
            id: model.id,
            order: model.order,
            published: model.published,
            primary: model.author.clone(),
            secondary: model.text.clone(),
        }
    }
}
