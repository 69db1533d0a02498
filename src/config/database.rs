//! Database configuration module for `OurCheckSplitter`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::{
    AppUser, Friend, FriendAssignment, Item, ItemAssignment, Receipt, ReceiptFriend, friend,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://our_check_splitter.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables if they do not exist yet.
///
/// Parent tables are created before the join tables that reference them.
/// Friend names are unique per owner through `idx_unique_friend_name_owner`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, AppUser).await?;
    create_table(db, Receipt).await?;
    create_table(db, Item).await?;
    create_table(db, ItemAssignment).await?;
    create_table(db, Friend).await?;
    create_table(db, FriendAssignment).await?;
    create_table(db, ReceiptFriend).await?;

    let builder = db.get_database_backend();
    let friend_name_index = Index::create()
        .name("idx_unique_friend_name_owner")
        .table(Friend)
        .col(friend::Column::OwnerId)
        .col(friend::Column::Name)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&friend_name_index)).await?;
    debug!("Database tables ensured");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        AppUserModel, FriendAssignmentModel, FriendModel, ItemAssignmentModel, ItemModel,
        ReceiptFriendModel, ReceiptModel,
    };
    use sea_orm::{ActiveModelTrait, QuerySelect, Set};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<AppUserModel> = AppUser::find().limit(1).all(&db).await?;
        let _: Vec<ReceiptModel> = Receipt::find().limit(1).all(&db).await?;
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;
        let _: Vec<ItemAssignmentModel> = ItemAssignment::find().limit(1).all(&db).await?;
        let _: Vec<FriendModel> = Friend::find().limit(1).all(&db).await?;
        let _: Vec<FriendAssignmentModel> = FriendAssignment::find().limit(1).all(&db).await?;
        let _: Vec<ReceiptFriendModel> = ReceiptFriend::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_friend_name_unique_per_owner_index() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let owner = crate::test_utils::create_test_user(&db, "user-1").await?;

        let insert_friend = |name: &str| friend::ActiveModel {
            owner_id: Set(owner.id),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        insert_friend("Alice").insert(&db).await?;
        let duplicate = insert_friend("Alice").insert(&db).await;
        assert!(duplicate.is_err());
        insert_friend("Bob").insert(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
