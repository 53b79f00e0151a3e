//! Driving port for profile mutations.
//!
//! Inbound adapters call [`ProfileCommand`] once the request has passed
//! validation and the caller's identity is known.

use async_trait::async_trait;

use crate::domain::{EntryId, Error, NewEducation, NewExperience, Profile, ProfileFields, UserId};

/// Request to create or patch the caller's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertProfileRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Fields to set; absent ones are kept.
    pub fields: ProfileFields,
}

/// Driving port for profile mutations.
///
/// Every method returns the complete profile as stored after the change,
/// except [`ProfileCommand::delete_account`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create the owner's profile or merge `fields` into it.
    async fn upsert(&self, request: UpsertProfileRequest) -> Result<Profile, Error>;

    /// Prepend an experience entry. Fails with `not_found` without a profile.
    async fn add_experience(&self, owner: &UserId, entry: NewExperience)
    -> Result<Profile, Error>;

    /// Remove one experience entry by id.
    ///
    /// Fails with `not_found` without a profile and `no_match` for an
    /// unknown id.
    async fn remove_experience(&self, owner: &UserId, id: EntryId) -> Result<Profile, Error>;

    /// Prepend an education entry. Fails with `not_found` without a profile.
    async fn add_education(&self, owner: &UserId, entry: NewEducation) -> Result<Profile, Error>;

    /// Remove one education entry by id, with the same failures as
    /// [`ProfileCommand::remove_experience`].
    async fn remove_education(&self, owner: &UserId, id: EntryId) -> Result<Profile, Error>;

    /// Delete the owner's profile and then the owner's user record.
    ///
    /// The two deletes are not atomic; a failure deleting the user leaves the
    /// profile already removed.
    async fn delete_account(&self, owner: &UserId) -> Result<(), Error>;
}
