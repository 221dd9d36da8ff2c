//! Ordered record store.
//!
//! Every content kind keeps a dense `order` column: for N rows the orders are
//! exactly `0..N`. The operations here keep it that way (creating appends,
//! inserting at a position shifts the tail up, deleting shifts it back down),
//! each inside one transaction so nobody observes a duplicate or a gap.
//! Concurrent reorders of the same kind are last-writer-wins.

use crate::error::{CmsError, Lookup, Result};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, Iterable, Order, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One line of the administrative listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    pub id: i32,
    pub order: i32,
    pub published: bool,
    pub primary: String,
    pub secondary: String,
}

/// A `(id, new_order)` pair from a drag-and-drop reorder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reorder {
    pub id: i32,
    pub order: i32,
}

/// A sea-orm entity whose rows form one flat, densely ordered sequence.
#[async_trait]
pub trait OrderedEntity: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + Send;

    /// Partial update payload; `None` fields are left alone.
    type Fields: DeserializeOwned + Send;

    const KIND: &'static str;

    fn id_column() -> Self::Column;

    fn order_column() -> Self::Column;

    fn published_column() -> Self::Column;

    /// Sort applied to the published listing. Ties on the column are broken
    /// by id in the same direction.
    fn published_sort() -> (Self::Column, Order) {
        (Self::order_column(), Order::Asc)
    }

    fn id_of(model: &Self::Model) -> i32;

    fn order_of(model: &Self::Model) -> i32;

    /// An empty, unpublished row sitting at `order`.
    fn blank(order: i32) -> Self::Active;

    /// Rejects a payload that can't be stored faithfully.
    fn check(_fields: &Self::Fields) -> Result<()> {
        Ok(())
    }

    fn patch(fields: Self::Fields) -> Self::Active;

    fn to_json(model: &Self::Model) -> serde_json::Value;

    fn row(model: &Self::Model) -> DashboardRow;

    /// Removes rows owned by the record `id` before it is deleted.
    async fn on_delete(_txn: &DatabaseTransaction, _id: i32) -> std::result::Result<(), DbErr> {
        Ok(())
    }
}

async fn find<E, C>(db: &C, id: i32) -> Result<E::Model>
where
    E: OrderedEntity,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found(E::KIND, Lookup::Id(id)))
}

fn check_position(position: i32) -> Result<()> {
    if position < 0 {
        return Err(CmsError::validation(format!(
            "order must not be negative, got {position}"
        )));
    }
    Ok(())
}

/// Every row, in storage order.
#[instrument(skip(db), fields(kind = E::KIND))]
pub async fn list_all<E: OrderedEntity>(db: &DatabaseConnection) -> Result<Vec<E::Model>> {
    Ok(E::find().all(db).await?)
}

#[instrument(skip(db), fields(kind = E::KIND))]
pub async fn list_published<E: OrderedEntity>(db: &DatabaseConnection) -> Result<Vec<E::Model>> {
    let (column, direction) = E::published_sort();
    Ok(E::find()
        .filter(E::published_column().eq(true))
        .order_by(column, direction.clone())
        .order_by(E::id_column(), direction)
        .all(db)
        .await?)
}

/// Rows for the administrative listing, sorted by `order`.
#[instrument(skip(db), fields(kind = E::KIND))]
pub async fn dashboard<E: OrderedEntity>(db: &DatabaseConnection) -> Result<Vec<DashboardRow>> {
    let models = E::find()
        .order_by_asc(E::order_column())
        .order_by_asc(E::id_column())
        .all(db)
        .await?;
    Ok(models.iter().map(E::row).collect())
}

pub async fn get_by_id<E: OrderedEntity>(db: &DatabaseConnection, id: i32) -> Result<E::Model> {
    find::<E, _>(db, id).await
}

pub async fn get_by_order<E: OrderedEntity>(db: &DatabaseConnection, order: i32) -> Result<E::Model> {
    E::find()
        .filter(E::order_column().eq(order))
        .order_by_asc(E::id_column())
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found(E::KIND, Lookup::Order(order)))
}

// Ids are handed out in increasing order, so the newest row at `position`
// is the one just inserted.
async fn inserted_at<E, C>(db: &C, position: i32) -> Result<E::Model>
where
    E: OrderedEntity,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::order_column().eq(position))
        .order_by_desc(E::id_column())
        .one(db)
        .await?
        .ok_or_else(|| CmsError::not_found(E::KIND, Lookup::Order(position)))
}

/// Appends a blank row after the last one.
pub async fn create<E>(db: &DatabaseConnection) -> Result<E::Model>
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let txn = db.begin().await?;
    let model = append::<E>(&txn, E::blank(0)).await?;
    txn.commit().await?;
    Ok(model)
}

/// Inserts `active` at `order = count` inside `txn`.
#[instrument(skip(txn, active), fields(kind = E::KIND))]
pub(crate) async fn append<E>(txn: &DatabaseTransaction, mut active: E::Active) -> Result<E::Model>
where
    E: OrderedEntity,
    E::Model: Send + Sync,
{
    let order = E::find().count(txn).await? as i32;
    active.set(E::order_column(), order.into());
    E::insert(active).exec(txn).await?;
    let model = inserted_at::<E, _>(txn, order).await?;

    info!(order, "created {}", E::KIND);
    Ok(model)
}

/// Inserts a blank row at `position`, moving everything at or after it down
/// by one. A position past the end is used as given.
pub async fn create_at<E: OrderedEntity>(db: &DatabaseConnection, position: i32) -> Result<E::Model> {
    let txn = db.begin().await?;
    let model = insert_at::<E>(&txn, position, E::blank(position)).await?;
    txn.commit().await?;
    Ok(model)
}

/// Inserts `active` at `position` inside `txn` after shifting the tail.
#[instrument(skip(txn, active), fields(kind = E::KIND))]
pub(crate) async fn insert_at<E: OrderedEntity>(
    txn: &DatabaseTransaction,
    position: i32,
    mut active: E::Active,
) -> Result<E::Model> {
    check_position(position)?;
    active.set(E::order_column(), position.into());

    let shifted = E::update_many()
        .col_expr(E::order_column(), Expr::col(E::order_column()).add(1))
        .filter(E::order_column().gte(position))
        .exec(txn)
        .await?;
    E::insert(active).exec(txn).await?;
    let model = inserted_at::<E, _>(txn, position).await?;

    info!(position, shifted = shifted.rows_affected, "inserted {}", E::KIND);
    Ok(model)
}

/// Overwrites the fields present in `fields` and returns the stored row.
#[instrument(skip(db, fields), fields(kind = E::KIND))]
pub async fn update_by_id<E: OrderedEntity>(
    db: &DatabaseConnection,
    id: i32,
    fields: E::Fields,
) -> Result<E::Model> {
    E::check(&fields)?;
    let active = E::patch(fields);
    let changed = E::Column::iter().any(|column| !active.is_not_set(column));

    let txn = db.begin().await?;
    if changed {
        E::update_many()
            .set(active)
            .filter(E::id_column().eq(id))
            .exec(&txn)
            .await?;
    }
    let model = find::<E, _>(&txn, id).await?;
    txn.commit().await?;

    debug!(changed, "updated {}", E::KIND);
    Ok(model)
}

/// Like [`update_by_id`], decoding the payload from a field map first.
pub async fn update_from_json<E: OrderedEntity>(
    db: &DatabaseConnection,
    id: i32,
    fields: serde_json::Value,
) -> Result<E::Model> {
    let fields = serde_json::from_value::<E::Fields>(fields)
        .map_err(|why| CmsError::validation(format!("bad {} fields: {why}", E::KIND)))?;
    update_by_id::<E>(db, id, fields).await
}

/// Writes every new order as one unit. Density is the caller's business.
#[instrument(skip(db, entries), fields(kind = E::KIND, count = entries.len()))]
pub async fn update_order_batch<E: OrderedEntity>(
    db: &DatabaseConnection,
    entries: &[Reorder],
) -> Result<()> {
    for entry in entries {
        check_position(entry.order)?;
    }

    let txn = db.begin().await?;
    for entry in entries {
        let res = E::update_many()
            .col_expr(E::order_column(), Expr::value(entry.order))
            .filter(E::id_column().eq(entry.id))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            return Err(CmsError::not_found(E::KIND, Lookup::Id(entry.id)));
        }
    }
    txn.commit().await?;

    info!("reordered {}", E::KIND);
    Ok(())
}

/// Deletes the row and closes the gap it leaves.
#[instrument(skip(db), fields(kind = E::KIND))]
pub async fn delete<E: OrderedEntity>(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;
    let model = find::<E, _>(&txn, id).await?;
    let order = E::order_of(&model);

    E::on_delete(&txn, id).await?;
    E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(&txn)
        .await?;
    E::update_many()
        .col_expr(E::order_column(), Expr::col(E::order_column()).sub(1))
        .filter(E::order_column().gt(order))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    info!(order, "deleted {}", E::KIND);
    Ok(())
}
