//! App user business logic.
//!
//! Users are created lazily the first time an identity shows up.

use crate::{
    entities::{AppUser, app_user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Looks up a user by the identity the chat platform hands us.
pub async fn get_user_by_external_id(
    db: &DatabaseConnection,
    external_id: &str,
) -> Result<Option<app_user::Model>> {
    AppUser::find()
        .filter(app_user::Column::ExternalId.eq(external_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the user for `external_id`, creating it on first sight.
///
/// The display name is refreshed when it changed since the last call.
pub async fn get_or_create_user(
    db: &DatabaseConnection,
    external_id: &str,
    display_name: &str,
) -> Result<app_user::Model> {
    if external_id.trim().is_empty() {
        return Err(Error::validation("External user id cannot be empty"));
    }

    if let Some(user) = get_user_by_external_id(db, external_id).await? {
        if user.display_name == display_name {
            return Ok(user);
        }
        let mut active: app_user::ActiveModel = user.into();
        active.display_name = Set(display_name.to_string());
        return active.update(db).await.map_err(Into::into);
    }

    let user = app_user::ActiveModel {
        external_id: Set(external_id.to_string()),
        display_name: Set(display_name.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = user.id, external_id, "Registered new user");
    Ok(user)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_get_or_create_user() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_user_by_external_id(&db, "123").await?.is_none());

        let created = get_or_create_user(&db, "123", "alice").await?;
        let again = get_or_create_user(&db, "123", "alice").await?;
        assert_eq!(created, again);

        let renamed = get_or_create_user(&db, "123", "Alice A.").await?;
        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.display_name, "Alice A.");

        let other = get_or_create_user(&db, "456", "bob").await?;
        assert_ne!(other.id, created.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_external_id_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_or_create_user(&db, " ", "nobody").await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }
}
