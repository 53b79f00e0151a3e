//! Developer profile aggregate.
//!
//! A [`Profile`] belongs to exactly one user. Scalar fields are patched by
//! sparse [`ProfileFields`] sets, while experience and education live in
//! ordered [`EntryList`]s that grow at the front.

mod entries;
mod fields;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

pub use entries::{
    DuplicateEntryId, Education, Entry, EntryId, EntryList, Experience, NewEducation,
    NewExperience,
};
pub use fields::{ProfileFields, SocialLinks, Skills};

use fields::merge_field;

/// System-generated profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Generate a fresh identifier for a new profile.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored identifier.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when an entry id is not present on the profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entry {0} not found")]
pub struct EntryNotFound(pub EntryId);

/// One developer's profile.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - Optional scalar fields are either absent or hold a non-empty string.
/// - Entries in `experience` and `education` are unique by id, newest first.
///
/// # Examples
/// ```
/// use devconnector::domain::{Profile, ProfileFields, UserId};
///
/// let owner = UserId::random();
/// let mut profile = Profile::from_fields(owner, &ProfileFields::default().bio(Some("x".into())));
/// profile.apply(&ProfileFields::default().company(Some("y".into())));
///
/// assert_eq!(profile.bio.as_deref(), Some("x"));
/// assert_eq!(profile.company.as_deref(), Some("y"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Profile identifier, distinct from the owner's id.
    pub id: ProfileId,
    /// User this profile belongs to.
    pub owner: UserId,
    /// Current employer.
    pub company: Option<String>,
    /// Personal website URL.
    pub website: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Short biography.
    pub bio: Option<String>,
    /// Professional status.
    pub status: Option<String>,
    /// GitHub account name.
    pub github_username: Option<String>,
    /// Skills in input order.
    pub skills: Option<Skills>,
    /// Social network links.
    #[serde(default)]
    pub social: SocialLinks,
    /// Work history, newest first.
    #[serde(default)]
    pub experience: EntryList<Experience>,
    /// Schooling history, newest first.
    #[serde(default)]
    pub education: EntryList<Education>,
}

impl Profile {
    /// Build a brand-new profile for `owner` from a sparse field set.
    pub fn from_fields(owner: UserId, fields: &ProfileFields) -> Self {
        let mut profile = Self {
            id: ProfileId::random(),
            owner,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: None,
            github_username: None,
            skills: None,
            social: SocialLinks::default(),
            experience: EntryList::default(),
            education: EntryList::default(),
        };
        profile.apply(fields);
        profile
    }

    /// Merge a sparse field set over this profile.
    ///
    /// Present fields overwrite, absent fields are kept. Social links merge
    /// per platform. Experience and education are never touched.
    pub fn apply(&mut self, fields: &ProfileFields) {
        merge_field(&mut self.company, &fields.company);
        merge_field(&mut self.website, &fields.website);
        merge_field(&mut self.location, &fields.location);
        merge_field(&mut self.bio, &fields.bio);
        merge_field(&mut self.status, &fields.status);
        merge_field(&mut self.github_username, &fields.github_username);
        merge_field(&mut self.skills, &fields.skills);
        self.social.merge(&fields.social);
    }

    /// Prepend a new experience entry with a fresh id.
    pub fn add_experience(&mut self, experience: NewExperience) -> &Experience {
        self.experience.prepend(experience.into_entry())
    }

    /// Remove one experience entry; the profile is unchanged on error.
    pub fn remove_experience(&mut self, id: EntryId) -> Result<Experience, EntryNotFound> {
        self.experience.remove(id).ok_or(EntryNotFound(id))
    }

    /// Prepend a new education entry with a fresh id.
    pub fn add_education(&mut self, education: NewEducation) -> &Education {
        self.education.prepend(education.into_entry())
    }

    /// Remove one education entry; the profile is unchanged on error.
    pub fn remove_education(&mut self, id: EntryId) -> Result<Education, EntryNotFound> {
        self.education.remove(id).ok_or(EntryNotFound(id))
    }
}

#[cfg(test)]
mod tests;
