//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! Scalar profile fields map to columns; `social`, `experience`, and
//! `education` are stored as JSONB documents. Sparse upserts run in a single
//! transaction that locks the owner's row with `SELECT ... FOR UPDATE`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError, UpsertOutcome};
use crate::domain::{EntryList, Profile, ProfileFields, ProfileId, Skills, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use devconnector::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/devconnector")).await?;
    /// let repository = DieselProfileRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Failure inside the upsert transaction.
///
/// Diesel requires the transaction error type to absorb its own errors; the
/// second variant carries document decoding failures out of the closure.
#[derive(Debug)]
enum UpsertTxError {
    Diesel(diesel::result::Error),
    Repository(ProfileRepositoryError),
}

impl From<diesel::result::Error> for UpsertTxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

impl From<ProfileRepositoryError> for UpsertTxError {
    fn from(value: ProfileRepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<UpsertTxError> for ProfileRepositoryError {
    fn from(value: UpsertTxError) -> Self {
        match value {
            UpsertTxError::Diesel(err) => map_diesel_error(err),
            UpsertTxError::Repository(err) => err,
        }
    }
}

fn encode<T: serde::Serialize>(
    value: &T,
    column: &str,
) -> Result<serde_json::Value, ProfileRepositoryError> {
    serde_json::to_value(value).map_err(|err| {
        ProfileRepositoryError::serialization(format!("encode {column}: {err}"))
    })
}

fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    column: &str,
) -> Result<T, ProfileRepositoryError> {
    serde_json::from_value(value).map_err(|err| {
        ProfileRepositoryError::serialization(format!("decode {column}: {err}"))
    })
}

/// Convert a database row to a domain profile.
fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    Ok(Profile {
        id: ProfileId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        company: row.company,
        website: row.website,
        location: row.location,
        bio: row.bio,
        status: row.status,
        github_username: row.github_username,
        skills: row.skills.map(Skills::from_vec),
        social: decode(row.social, "social")?,
        experience: decode::<EntryList<_>>(row.experience, "experience")?,
        education: decode::<EntryList<_>>(row.education, "education")?,
    })
}

fn profile_to_new_row(profile: &Profile) -> Result<NewProfileRow, ProfileRepositoryError> {
    Ok(NewProfileRow {
        id: *profile.id.as_uuid(),
        owner_id: *profile.owner.as_uuid(),
        company: profile.company.clone(),
        website: profile.website.clone(),
        location: profile.location.clone(),
        bio: profile.bio.clone(),
        status: profile.status.clone(),
        github_username: profile.github_username.clone(),
        skills: profile.skills.clone().map(Skills::into_vec),
        social: encode(&profile.social, "social")?,
        experience: encode(&profile.experience, "experience")?,
        education: encode(&profile.education, "education")?,
    })
}

fn profile_to_changeset(profile: &Profile) -> Result<ProfileChangeset, ProfileRepositoryError> {
    let row = profile_to_new_row(profile)?;
    Ok(ProfileChangeset {
        company: row.company,
        website: row.website,
        location: row.location,
        bio: row.bio,
        status: row.status,
        github_username: row.github_username,
        skills: row.skills,
        social: row.social,
        experience: row.experience,
        education: row.education,
        updated_at: Utc::now(),
    })
}

/// A whole-document save never inserts; zero updated rows means the profile
/// was deleted after it was loaded.
fn require_updated(updated: usize, owner: &UserId) -> Result<(), ProfileRepositoryError> {
    if updated == 0 {
        return Err(ProfileRepositoryError::missing(owner.to_string()));
    }
    Ok(())
}

async fn lock_by_owner(
    conn: &mut AsyncPgConnection,
    owner: Uuid,
) -> Result<Option<ProfileRow>, diesel::result::Error> {
    profiles::table
        .filter(profiles::owner_id.eq(owner))
        .select(ProfileRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()
}

async fn patch_locked(
    conn: &mut AsyncPgConnection,
    row: ProfileRow,
    fields: &ProfileFields,
) -> Result<Profile, UpsertTxError> {
    let mut profile = row_to_profile(row)?;
    profile.apply(fields);
    let changeset = profile_to_changeset(&profile)?;
    diesel::update(profiles::table.filter(profiles::id.eq(profile.id.as_uuid())))
        .set(&changeset)
        .execute(conn)
        .await?;
    Ok(profile)
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::owner_id.eq(owner.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProfileRow> = profiles::table
            .select(ProfileRow::as_select())
            .order(profiles::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn upsert_fields(
        &self,
        owner: &UserId,
        fields: &ProfileFields,
    ) -> Result<(Profile, UpsertOutcome), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = owner.clone();
        let fields = fields.clone();

        let result: Result<(Profile, UpsertOutcome), UpsertTxError> = conn
            .transaction(|conn| {
                async move {
                    if let Some(row) = lock_by_owner(conn, *owner.as_uuid()).await? {
                        let profile = patch_locked(conn, row, &fields).await?;
                        return Ok((profile, UpsertOutcome::Updated));
                    }

                    let profile = Profile::from_fields(owner.clone(), &fields);
                    let new_row = profile_to_new_row(&profile)?;
                    let inserted = diesel::insert_into(profiles::table)
                        .values(&new_row)
                        .on_conflict(profiles::owner_id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    if inserted == 1 {
                        return Ok((profile, UpsertOutcome::Created));
                    }

                    // A concurrent request created the profile first; patch it.
                    debug!(%owner, "profile insert lost race, patching existing row");
                    let row = lock_by_owner(conn, *owner.as_uuid())
                        .await?
                        .ok_or(diesel::result::Error::NotFound)?;
                    let profile = patch_locked(conn, row, &fields).await?;
                    Ok((profile, UpsertOutcome::Updated))
                }
                .scope_boxed()
            })
            .await;

        result.map_err(ProfileRepositoryError::from)
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let changeset = profile_to_changeset(profile)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            profiles::table.filter(profiles::owner_id.eq(profile.owner.as_uuid())),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        require_updated(updated, &profile.owner)
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(profiles::table.filter(profiles::owner_id.eq(owner.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
