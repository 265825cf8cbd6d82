//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use portal_app::ports::UserRepository;
use portal_domain::error::PortalError;
use portal_domain::id::UserId;
use portal_domain::user::User;

use crate::error::StorageError;

fn user_id_from_row(raw: i64) -> Result<UserId, StorageError> {
    i32::try_from(raw)
        .map(UserId::new)
        .map_err(|_| StorageError::IdOutOfRange(raw))
}

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("user_id")?;
        let name: String = row.try_get("user_name")?;
        let email: String = row.try_get("user_email")?;
        let band: String = row.try_get("user_band")?;

        let id = user_id_from_row(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(User {
            id,
            name,
            email,
            band,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO users (user_name, user_email, user_band) VALUES (?, ?, ?) RETURNING user_id";
const UPSERT: &str = "INSERT INTO users (user_id, user_name, user_email, user_band) VALUES (?, ?, ?, ?) \
     ON CONFLICT (user_id) DO UPDATE SET \
     user_name = excluded.user_name, user_email = excluded.user_email, user_band = excluded.user_band";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE user_id = ?";
const SELECT_ALL: &str = "SELECT * FROM users";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE user_id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<User>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn save(&self, user: User) -> impl Future<Output = Result<User, PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            if user.id.is_assigned() {
                sqlx::query(UPSERT)
                    .bind(user.id.get())
                    .bind(&user.name)
                    .bind(&user.email)
                    .bind(&user.band)
                    .execute(&pool)
                    .await
                    .map_err(StorageError::from)?;

                return Ok(user);
            }

            let raw: i64 = sqlx::query_scalar(INSERT)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.band)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from_insert)?;

            Ok(user.with_id(user_id_from_row(raw)?))
        }
    }

    fn delete_by_id(&self, id: UserId) -> impl Future<Output = Result<(), PortalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteUserRepository {
        let db = Config::in_memory().open().await.unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn test_user() -> User {
        User::builder()
            .name("John Doe")
            .email("john.doe@example.com")
            .band("L2")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_first_id_when_inserting() {
        let repo = setup().await;

        let saved = repo.save(test_user()).await.unwrap();
        assert_eq!(saved.id, UserId::new(1));
        assert_eq!(saved.name, "John Doe");
    }

    #[tokio::test]
    async fn should_retrieve_saved_user_unchanged() {
        let repo = setup().await;
        let saved = repo.save(test_user()).await.unwrap();

        let fetched = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn should_return_none_when_user_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(UserId::new(99999)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_users() {
        let repo = setup().await;
        repo.save(test_user()).await.unwrap();
        repo.save(User {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            ..test_user()
        })
        .await
        .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }

    #[tokio::test]
    async fn should_overwrite_row_when_id_assigned() {
        let repo = setup().await;
        let mut user = repo.save(test_user()).await.unwrap();

        user.band = "L5".to_string();
        user.email = "john@corp.example".to_string();
        repo.save(user.clone()).await.unwrap();

        let fetched = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched, user);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_create_row_under_given_id_when_absent() {
        let repo = setup().await;
        let user = test_user().with_id(UserId::new(40));

        let saved = repo.save(user.clone()).await.unwrap();
        assert_eq!(saved, user);

        let next = repo.save(test_user()).await.unwrap();
        assert_eq!(next.id, UserId::new(41));
    }

    #[tokio::test]
    async fn should_delete_user_when_exists() {
        let repo = setup().await;
        let saved = repo.save(test_user()).await.unwrap();

        repo.delete_by_id(saved.id).await.unwrap();

        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_ignore_delete_of_missing_id() {
        let repo = setup().await;
        repo.delete_by_id(UserId::new(12)).await.unwrap();
    }

    #[tokio::test]
    async fn should_not_reuse_id_of_deleted_user() {
        let repo = setup().await;
        let first = repo.save(test_user()).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();

        let second = repo.save(test_user()).await.unwrap();
        assert_ne!(second.id, first.id);
    }

    #[tokio::test]
    async fn should_refuse_insert_past_largest_id_without_storing_it() {
        let repo = setup().await;
        let last = test_user().with_id(UserId::new(i32::MAX));
        repo.save(last.clone()).await.unwrap();

        let err = repo.save(test_user()).await.unwrap_err();
        assert!(matches!(err, PortalError::Storage(_)));
        assert_eq!(err.to_string(), "no user id left to assign");

        assert_eq!(repo.find_all().await.unwrap(), vec![last.clone()]);
        repo.delete_by_id(last.id).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_keep_explicit_negative_ids_within_range() {
        let repo = setup().await;
        let user = test_user().with_id(UserId::new(i32::MIN));

        repo.save(user.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user));
    }

    #[test]
    fn should_reject_ids_outside_i32_range() {
        assert!(user_id_from_row(i64::from(i32::MAX) + 1).is_err());
        assert_eq!(user_id_from_row(3).unwrap(), UserId::new(3));
    }
}
