//! Port for profile persistence.
//!
//! Adapters store one [`Profile`] per owner. Sparse upserts go through
//! [`ProfileRepository::upsert_fields`], which must be atomic per owner so
//! that concurrent first-time upserts never produce two profiles.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileFields, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// No profile is stored for the owner being written.
        Missing { owner: String } =>
            "no profile stored for owner {owner}",
        /// A stored document could not be encoded or decoded.
        Serialization { message: String } =>
            "profile repository serialization failed: {message}",
    }
}

/// Whether an upsert created a profile or patched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No profile existed; one was inserted.
    Created,
    /// The stored profile was patched.
    Updated,
}

/// Port for profile storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile owned by `owner`, if any.
    async fn find_by_owner(&self, owner: &UserId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Every stored profile, in no particular order.
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Insert-if-absent-else-patch keyed by owner.
    ///
    /// When a profile exists the sparse `fields` are merged over it with
    /// [`Profile::apply`]; otherwise a new profile is built with
    /// [`Profile::from_fields`]. The read and the write happen atomically.
    async fn upsert_fields(
        &self,
        owner: &UserId,
        fields: &ProfileFields,
    ) -> Result<(Profile, UpsertOutcome), ProfileRepositoryError>;

    /// Overwrite the whole stored document for `profile.owner`.
    ///
    /// Never inserts: when the owner's profile was deleted after it was
    /// loaded, the write fails with [`ProfileRepositoryError::Missing`].
    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Delete the owner's profile. Returns `false` when none existed.
    async fn delete_by_owner(&self, owner: &UserId) -> Result<bool, ProfileRepositoryError>;
}
