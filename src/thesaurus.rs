//! The visual thesaurus: published entries drawn as node-link graphs.

use crate::error::{CmsError, Lookup, Result};
use crate::models::node;
use crate::store::OrderedEntity;
use lectern_core::{Graph, LinkStrength};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// How a caller names the entry to centre the graph on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Id(i32),
    Title(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTitle {
    pub id: i32,
    pub title: String,
}

async fn published(db: &DatabaseConnection) -> Result<Vec<node::Model>> {
    Ok(node::Entity::find()
        .filter(node::Column::Published.eq(true))
        .order_by_asc(node::Column::Order)
        .order_by_asc(node::Column::Id)
        .all(db)
        .await?)
}

/// Published entries as `(id, title)` pairs, in display order.
pub async fn titles(db: &DatabaseConnection) -> Result<Vec<NodeTitle>> {
    Ok(published(db)
        .await?
        .into_iter()
        .map(|n| NodeTitle {
            id: n.id,
            title: n.title,
        })
        .collect())
}

// Exact, case-sensitive titles. A duplicated title resolves to the entry
// that comes first.
async fn title_index(db: &DatabaseConnection) -> Result<HashMap<String, i32>> {
    let mut index = HashMap::new();
    for entry in titles(db).await? {
        index.entry(entry.title).or_insert(entry.id);
    }
    Ok(index)
}

async fn graph_for(db: &DatabaseConnection, center: &node::Model, strength: LinkStrength) -> Result<Graph> {
    let index = title_index(db).await?;
    Ok(Graph::new(&center.entry(), strength, |term| {
        index.get(term).copied()
    }))
}

/// Graph centred on the published entry named by `key`.
#[instrument(skip(db, strength))]
pub async fn to_graph(db: &DatabaseConnection, key: NodeKey, strength: LinkStrength) -> Result<Graph> {
    let query = node::Entity::find().filter(node::Column::Published.eq(true));
    let (query, lookup) = match key {
        NodeKey::Id(id) => (query.filter(node::Column::Id.eq(id)), Lookup::Id(id)),
        NodeKey::Title(title) => (
            query.filter(node::Column::Title.eq(title.as_str())),
            Lookup::Title(title),
        ),
    };

    let center = query
        .order_by_asc(node::Column::Order)
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found(node::Entity::KIND, lookup))?;

    graph_for(db, &center, strength).await
}

/// Graph of the first published entry, if there is one.
pub async fn default_entry(db: &DatabaseConnection, strength: LinkStrength) -> Result<Option<Graph>> {
    match published(db).await?.first() {
        Some(center) => Ok(Some(graph_for(db, center, strength).await?)),
        None => Ok(None),
    }
}
