//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ProfileCommand, ProfileQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Profile mutations.
    pub profiles: Arc<dyn ProfileCommand>,
    /// Profile lookups.
    pub profiles_query: Arc<dyn ProfileQuery>,
}

impl HttpState {
    /// Bundle the port implementations handlers call.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use devconnector::domain::ProfileService;
    /// use devconnector::domain::ports::FixtureLoginService;
    /// use devconnector::inbound::http::state::HttpState;
    /// use devconnector::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
    ///
    /// let service = Arc::new(ProfileService::new(
    ///     Arc::new(InMemoryProfileRepository::new()),
    ///     Arc::new(InMemoryUserRepository::new()),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        profiles: Arc<dyn ProfileCommand>,
        profiles_query: Arc<dyn ProfileQuery>,
    ) -> Self {
        Self {
            login,
            profiles,
            profiles_query,
        }
    }
}
