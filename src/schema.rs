use crate::models::{node, post, post_content, quote, resource, user, video};
use sea_orm::sea_query::{IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};
use tracing::info;

#[derive(Default)]
struct Statements {
    tables: Vec<TableCreateStatement>,
    indexes: Vec<IndexCreateStatement>,
}

impl Statements {
    fn add<E: EntityTrait>(&mut self, schema: &Schema, entity: E) {
        self.tables.push(schema.create_table_from_entity(entity));
        self.indexes.extend(schema.create_index_from_entity(entity));
    }
}

/// Creates any missing table, and the indexes its `indexed` columns ask for,
/// straight from the entity definitions. Good enough for development and
/// tests; production schemas are migrated outside this crate.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = Statements::default();
    statements.add(&schema, user::Entity);
    statements.add(&schema, post::Entity);
    statements.add(&schema, post_content::Entity);
    statements.add(&schema, quote::Entity);
    statements.add(&schema, resource::Entity);
    statements.add(&schema, video::Entity);
    statements.add(&schema, node::Entity);

    for table in statements.tables.iter_mut() {
        table.if_not_exists();
        db.execute(backend.build(&*table)).await?;
    }
    for index in statements.indexes.iter_mut() {
        index.if_not_exists();
        db.execute(backend.build(&*index)).await?;
    }

    info!(
        tables = statements.tables.len(),
        indexes = statements.indexes.len(),
        "schema ready"
    );
    Ok(())
}
