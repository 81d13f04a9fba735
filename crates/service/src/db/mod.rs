//! SeaORM helpers shared by the repository implementations.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

use crate::bulk::IdSet;
use crate::errors::ServiceError;

/// Delete every row whose `id_column` is in `ids`, returning the removed rows.
///
/// The rows are read and deleted in one transaction so callers can release
/// resources (e.g. stored images) belonging to exactly what was removed.
pub async fn delete_by_ids<E>(
    db: &DatabaseConnection,
    id_column: E::Column,
    ids: &IdSet,
) -> Result<Vec<E::Model>, ServiceError>
where
    E: EntityTrait,
{
    let txn = db.begin().await?;
    let rows = E::find()
        .filter(id_column.is_in(ids.as_slice().iter().copied()))
        .all(&txn)
        .await?;
    let res = E::delete_many()
        .filter(id_column.is_in(ids.as_slice().iter().copied()))
        .exec(&txn)
        .await?;
    txn.commit().await?;
    tracing::debug!(requested = ids.len(), deleted = res.rows_affected, "bulk delete");
    Ok(rows)
}
