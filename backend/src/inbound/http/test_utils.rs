//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;

use crate::domain::ProfileService;
use crate::domain::ports::{FixtureLoginService, fixture_user};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginRequest;
use crate::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state backed by empty in-memory stores holding only the fixture user.
pub fn memory_state() -> HttpState {
    let users = InMemoryUserRepository::with_users([fixture_user().expect("fixture user")]);
    let service = Arc::new(ProfileService::new(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(users),
    ));
    HttpState::new(Arc::new(FixtureLoginService), service.clone(), service)
}

/// Log in as the fixture user and return the session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: "admin".into(),
            password: "password".into(),
        })
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "fixture login failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
