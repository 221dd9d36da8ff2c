//! Thesaurus entries.
//!
//! `synonyms` and `antonyms` hold titles of other entries, comma-joined in
//! the row. Use [`Model::synonym_terms`] / [`Model::antonym_terms`] or
//! [`Model::entry`] to get them as lists; nothing checks that the titles
//! exist.

use super::set_if;
use crate::error::CmsError;
use crate::store::{DashboardRow, OrderedEntity};
use lectern_core::graph::Entry;
use lectern_core::Terms;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order: i32,
    pub published: bool,
    #[sea_orm(indexed)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub definition: String,
    #[sea_orm(column_type = "Text")]
    pub example: String,
    #[sea_orm(column_type = "Text")]
    pub synonyms: String,
    #[sea_orm(column_type = "Text")]
    pub antonyms: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn synonym_terms(&self) -> Terms {
        Terms::parse(&self.synonyms)
    }

    pub fn antonym_terms(&self) -> Terms {
        Terms::parse(&self.antonyms)
    }

    pub fn entry(&self) -> Entry {
        Entry {
            id: self.id,
            title: self.title.clone(),
            definition: self.definition.clone(),
            example: self.example.clone(),
            order: self.order,
            synonyms: self.synonym_terms(),
            antonyms: self.antonym_terms(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeFields {
    pub title: Option<String>,
    #[serde(alias = "definition")]
    pub text: Option<String>,
    pub example: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub published: Option<bool>,
}

fn joined(terms: Option<Vec<String>>) -> Option<String> {
    terms.map(|t| Terms::new(t).to_string())
}

impl OrderedEntity for Entity {
    type Active = ActiveModel;
    type Fields = NodeFields;

    const KIND: &'static str = "node";

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
            definition: Set(String::new()),
            example: Set(String::new()),
            synonyms: Set(String::new()),
            antonyms: Set(String::new()),
            ..Default::default()
        }
    }

    fn check(fields: &NodeFields) -> crate::error::Result<()> {
        for terms in [&fields.synonyms, &fields.antonyms].into_iter().flatten() {
            if let Some(term) = Terms::delimited(terms) {
                return Err(CmsError::validation(format!("term {term:?} contains a comma")));
            }
        }
        Ok(())
    }

    fn patch(fields: NodeFields) -> ActiveModel {
        ActiveModel {
            title: set_if(fields.title),
            definition: set_if(fields.text),
            example: set_if(fields.example),
            synonyms: set_if(joined(fields.synonyms)),
            antonyms: set_if(joined(fields.antonyms)),
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
            "text": model.definition,
            "example": model.example,
            "synonyms": model.synonym_terms(),
            "antonyms": model.antonym_terms(),
        })
    }

    fn row(model: &Model) -> DashboardRow {
        DashboardRow {
            id: model.id,
            order: model.order,
            published: model.published,
            primary: model.title.clone(),
            secondary: model.definition.clone(),
        }
    }
}
