//! Profile domain service.
//!
//! [`ProfileService`] implements both driving ports, [`ProfileCommand`] and
//! [`ProfileQuery`], on top of the profile and user repositories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError, ProfileView,
    UpsertOutcome, UpsertProfileRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EntryId, EntryNotFound, Error, NewEducation, NewExperience, Profile, User, UserId,
};

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Profile service implementing the driving ports.
#[derive(Clone)]
pub struct ProfileService<P, U> {
    profiles: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ProfileService<P, U> {
    /// Create a new service over the given repositories.
    pub fn new(profiles: Arc<P>, users: Arc<U>) -> Self {
        Self { profiles, users }
    }
}

impl<P, U> ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    fn map_profile_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Error::internal(format!("profile repository unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => {
                Error::internal(format!("profile repository error: {message}"))
            }
            ProfileRepositoryError::Missing { .. } => Error::not_found(NO_PROFILE),
            ProfileRepositoryError::Serialization { message } => {
                Error::internal(format!("profile document is corrupt: {message}"))
            }
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn entry_not_found(err: EntryNotFound) -> Error {
        Error::no_match(format!("No entry with id {}", err.0))
    }

    async fn find_profile(&self, owner: &UserId) -> Result<Option<Profile>, Error> {
        self.profiles
            .find_by_owner(owner)
            .await
            .map_err(Self::map_profile_error)
    }

    /// Load the owner's profile, apply `edit`, and write the whole document.
    ///
    /// A missing profile is `not_found`; sub-record edits need a parent.
    async fn edit_profile<F>(&self, owner: &UserId, edit: F) -> Result<Profile, Error>
    where
        F: FnOnce(&mut Profile) -> Result<(), Error> + Send,
    {
        let mut profile = self
            .find_profile(owner)
            .await?
            .ok_or_else(|| Error::not_found(NO_PROFILE))?;
        edit(&mut profile)?;
        self.profiles
            .save(&profile)
            .await
            .map_err(Self::map_profile_error)?;
        Ok(profile)
    }

    async fn project(&self, profile: Profile) -> Result<ProfileView, Error> {
        let owner = self
            .users
            .find_by_id(&profile.owner)
            .await
            .map_err(Self::map_user_error)?;
        Ok(ProfileView { profile, owner })
    }
}

#[async_trait]
impl<P, U> ProfileCommand for ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    async fn upsert(&self, request: UpsertProfileRequest) -> Result<Profile, Error> {
        let (profile, outcome) = self
            .profiles
            .upsert_fields(&request.owner, &request.fields)
            .await
            .map_err(Self::map_profile_error)?;
        match outcome {
            UpsertOutcome::Created => {
                info!(owner = %request.owner, profile = %profile.id, "profile created");
            }
            UpsertOutcome::Updated => {
                debug!(owner = %request.owner, profile = %profile.id, "profile updated");
            }
        }
        Ok(profile)
    }

    async fn add_experience(
        &self,
        owner: &UserId,
        entry: NewExperience,
    ) -> Result<Profile, Error> {
        self.edit_profile(owner, |profile| {
            let id = profile.add_experience(entry).id;
            debug!(%owner, entry = %id, "experience added");
            Ok(())
        })
        .await
    }

    async fn remove_experience(&self, owner: &UserId, id: EntryId) -> Result<Profile, Error> {
        self.edit_profile(owner, |profile| {
            profile
                .remove_experience(id)
                .map(drop)
                .map_err(Self::entry_not_found)
        })
        .await
    }

    async fn add_education(&self, owner: &UserId, entry: NewEducation) -> Result<Profile, Error> {
        self.edit_profile(owner, |profile| {
            let id = profile.add_education(entry).id;
            debug!(%owner, entry = %id, "education added");
            Ok(())
        })
        .await
    }

    async fn remove_education(&self, owner: &UserId, id: EntryId) -> Result<Profile, Error> {
        self.edit_profile(owner, |profile| {
            profile
                .remove_education(id)
                .map(drop)
                .map_err(Self::entry_not_found)
        })
        .await
    }

    async fn delete_account(&self, owner: &UserId) -> Result<(), Error> {
        let had_profile = self
            .profiles
            .delete_by_owner(owner)
            .await
            .map_err(Self::map_profile_error)?;
        let had_user = self
            .users
            .delete(owner)
            .await
            .map_err(Self::map_user_error)?;
        info!(%owner, had_profile, had_user, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl<P, U> ProfileQuery for ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    async fn profile_for_owner(&self, owner: &UserId) -> Result<ProfileView, Error> {
        let profile = self
            .find_profile(owner)
            .await?
            .ok_or_else(|| Error::no_match(NO_PROFILE))?;
        self.project(profile).await
    }

    async fn public_profile(&self, raw_owner_id: &str) -> Result<ProfileView, Error> {
        let Ok(owner) = UserId::new(raw_owner_id) else {
            debug!(raw_owner_id, "malformed owner id treated as missing profile");
            return Err(Error::no_match(PROFILE_NOT_FOUND));
        };
        let profile = self
            .find_profile(&owner)
            .await?
            .ok_or_else(|| Error::no_match(PROFILE_NOT_FOUND))?;
        self.project(profile).await
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileView>, Error> {
        let profiles = self
            .profiles
            .list_all()
            .await
            .map_err(Self::map_profile_error)?;
        let owner_ids: Vec<UserId> = profiles.iter().map(|p| p.owner.clone()).collect();
        let owners: HashMap<UserId, User> = self
            .users
            .find_by_ids(&owner_ids)
            .await
            .map_err(Self::map_user_error)?
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let owner = owners.get(&profile.owner).cloned();
                ProfileView { profile, owner }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
