//! In-memory adapters for the profile and user repositories.
//!
//! Used when no database is configured and throughout the test suites. Each
//! store keeps insertion order and guards its state with one `RwLock`, so a
//! profile upsert reads and writes under a single lock scope.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    ProfileRepository, ProfileRepositoryError, UpsertOutcome, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Profile, ProfileFields, User, UserId};

/// Profiles held in process memory, in creation order.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| &p.owner == owner).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn upsert_fields(
        &self,
        owner: &UserId,
        fields: &ProfileFields,
    ) -> Result<(Profile, UpsertOutcome), ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        if let Some(existing) = profiles.iter_mut().find(|p| &p.owner == owner) {
            existing.apply(fields);
            return Ok((existing.clone(), UpsertOutcome::Updated));
        }

        let profile = Profile::from_fields(owner.clone(), fields);
        profiles.push(profile.clone());
        Ok((profile, UpsertOutcome::Created))
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .iter_mut()
            .find(|p| p.owner == profile.owner)
            .ok_or_else(|| ProfileRepositoryError::missing(profile.owner.to_string()))?;
        *existing = profile.clone();
        Ok(())
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<bool, ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|p| &p.owner != owner);
        Ok(profiles.len() != before)
    }
}

/// Users held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `users` already stored.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id() == user.id()) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| ids.contains(u.id()))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id() != id);
        Ok(users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> Arc<InMemoryProfileRepository> {
        Arc::new(InMemoryProfileRepository::new())
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_creates_then_updates(repo: Arc<InMemoryProfileRepository>) {
        let owner = UserId::random();
        let (created, first) = repo
            .upsert_fields(&owner, &ProfileFields::default().bio(Some("x".into())))
            .await
            .expect("create");
        let (updated, second) = repo
            .upsert_fields(&owner, &ProfileFields::default().company(Some("y".into())))
            .await
            .expect("update");

        assert_eq!(first, UpsertOutcome::Created);
        assert_eq!(second, UpsertOutcome::Updated);
        assert_eq!(created.id, updated.id);
        assert_eq!(updated.bio.as_deref(), Some("x"));
        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_first_upserts_create_one_profile(repo: Arc<InMemoryProfileRepository>) {
        let owner = UserId::random();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let owner = owner.clone();
                tokio::spawn(async move {
                    let fields = ProfileFields::default().bio(Some(format!("bio {i}")));
                    repo.upsert_fields(&owner, &fields).await
                })
            })
            .collect();
        for task in tasks {
            task.await.expect("task joins").expect("upsert succeeds");
        }

        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_profile_existed(repo: Arc<InMemoryProfileRepository>) {
        let owner = UserId::random();
        repo.upsert_fields(&owner, &ProfileFields::default())
            .await
            .expect("create");

        assert!(repo.delete_by_owner(&owner).await.expect("delete"));
        assert!(!repo.delete_by_owner(&owner).await.expect("delete again"));
        assert!(repo.find_by_owner(&owner).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn save_after_delete_does_not_recreate_the_profile(
        repo: Arc<InMemoryProfileRepository>,
    ) {
        let owner = UserId::random();
        let (loaded, _) = repo
            .upsert_fields(&owner, &ProfileFields::default())
            .await
            .expect("create");
        repo.delete_by_owner(&owner).await.expect("delete");

        let err = repo.save(&loaded).await.expect_err("profile is gone");

        assert!(matches!(err, ProfileRepositoryError::Missing { .. }));
        assert!(repo.list_all().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn users_can_be_found_in_bulk_and_deleted() {
        let ada = User::try_from_parts(UserId::random().as_ref(), "Ada Lovelace", None)
            .expect("valid user");
        let grace = User::try_from_parts(UserId::random().as_ref(), "Grace Hopper", None)
            .expect("valid user");
        let users = InMemoryUserRepository::with_users([ada.clone(), grace.clone()]);

        let found = users
            .find_by_ids(&[grace.id().clone(), UserId::random()])
            .await
            .expect("bulk lookup");
        assert_eq!(found, vec![grace]);

        assert!(users.delete(ada.id()).await.expect("delete"));
        assert!(users.find_by_id(ada.id()).await.expect("find").is_none());
    }
}
