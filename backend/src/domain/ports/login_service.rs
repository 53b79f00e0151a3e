//! Driving port for session login.
//!
//! Handlers authenticate through [`LoginService`] so tests can swap in a
//! double without touching storage.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, LoginCredentials, User, UserId, UserValidationError};

/// Fixed id of the development user accepted by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Display name of the development user.
pub const FIXTURE_USER_NAME: &str = "Ada Lovelace";

/// The user record behind [`FIXTURE_USER_ID`], used to seed stores that
/// start empty.
pub fn fixture_user() -> Result<User, UserValidationError> {
    Ok(User::new(
        UserId::new(FIXTURE_USER_ID)?,
        DisplayName::new(FIXTURE_USER_NAME)?,
        None,
    ))
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator: `admin` / `password` maps to
/// [`FIXTURE_USER_ID`]; everything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn fixture_user_matches_login_id() {
        let user = fixture_user().expect("fixture user is valid");
        assert_eq!(user.id().as_ref(), FIXTURE_USER_ID);
        assert_eq!(user.name().as_ref(), FIXTURE_USER_NAME);
    }

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "wrong", false)]
    #[case("guest", "password", false)]
    #[tokio::test]
    async fn fixture_accepts_only_the_development_user(
        #[case] username: &str,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials");
        match (accepted, FixtureLoginService.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), FIXTURE_USER_ID),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (_, other) => panic!("unexpected login result: {other:?}"),
        }
    }
}
