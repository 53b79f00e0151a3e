//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! The `users` table is written by the identity side, so a stored name may
//! not satisfy [`DisplayName`] rules. Such rows are logged and read as
//! absent; the profile they own is still served, without an owner
//! projection.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Option<User> {
    match DisplayName::new(row.name) {
        Ok(name) => Some(User::new(UserId::from_uuid(row.id), name, row.avatar)),
        Err(error) => {
            warn!(
                user = %row.id,
                %error,
                "stored user name is not displayable; skipping projection"
            );
            None
        }
    }
}

fn rows_to_users(rows: Vec<UserRow>) -> Vec<User> {
    rows.into_iter().filter_map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            avatar: user.avatar(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::name.eq(excluded(users::name)),
                users::avatar.eq(excluded(users::avatar)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.and_then(row_to_user))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows_to_users(rows))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(name: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            avatar: None,
        }
    }

    #[rstest]
    fn row_to_user_keeps_avatar() {
        let id = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id,
            name: "Ada Lovelace".to_owned(),
            avatar: Some("https://example.com/a.png".to_owned()),
        })
        .expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.avatar(), Some("https://example.com/a.png"));
    }

    #[rstest]
    #[case("X")]
    #[case("O\u{2019}Brien")]
    #[case("$")]
    fn undisplayable_names_read_as_absent(#[case] name: &str) {
        assert!(row_to_user(row(name)).is_none());
    }

    #[rstest]
    fn one_undisplayable_row_does_not_hide_the_others() {
        let grace = row("Grace Hopper");
        let grace_id = grace.id;

        let users = rows_to_users(vec![row("X"), grace]);

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id().as_uuid(), &grace_id);
    }

    #[rstest]
    fn pool_checkout_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
