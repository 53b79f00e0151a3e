//! Driving port for reading profiles.

use async_trait::async_trait;

use crate::domain::{Error, Profile, User, UserId};

/// A profile together with its owner's public projection.
///
/// `owner` is `None` when the owning user record no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// The stored profile.
    pub profile: Profile,
    /// Projection of the owning user, when one can be shown.
    pub owner: Option<User>,
}

/// Driving port for profile lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The profile owned by an authenticated user; `no_match` when absent.
    async fn profile_for_owner(&self, owner: &UserId) -> Result<ProfileView, Error>;

    /// The profile owned by `raw_owner_id`, taken verbatim from a public URL.
    ///
    /// A missing profile or a malformed id reports `no_match`.
    async fn public_profile(&self, raw_owner_id: &str) -> Result<ProfileView, Error>;

    /// Every profile, each with its owner projection.
    async fn list_profiles(&self) -> Result<Vec<ProfileView>, Error>;
}
