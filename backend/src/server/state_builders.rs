//! Builders for HTTP state ports.
//!
//! A configured pool selects the Diesel repositories; otherwise profiles and
//! users live in memory, with the development user pre-seeded so the fixture
//! login owns a projectable user record.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use devconnector::domain::ProfileService;
use devconnector::domain::ports::{
    FixtureLoginService, ProfileCommand, ProfileQuery, fixture_user,
};
use devconnector::inbound::http::state::HttpState;
use devconnector::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
use devconnector::outbound::persistence::{DieselProfileRepository, DieselUserRepository};

use super::ServerConfig;

/// Wrap one service in both driving ports.
fn as_ports<S>(service: S) -> (Arc<dyn ProfileCommand>, Arc<dyn ProfileQuery>)
where
    S: ProfileCommand + ProfileQuery + 'static,
{
    let service = Arc::new(service);
    (service.clone(), service)
}

fn build_profile_ports(config: &ServerConfig) -> (Arc<dyn ProfileCommand>, Arc<dyn ProfileQuery>) {
    match &config.db_pool {
        Some(pool) => as_ports(ProfileService::new(
            Arc::new(DieselProfileRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        )),
        None => {
            let users = match fixture_user() {
                Ok(user) => InMemoryUserRepository::with_users([user]),
                Err(error) => {
                    warn!(%error, "fixture user invalid; starting with no users");
                    InMemoryUserRepository::new()
                }
            };
            as_ports(ProfileService::new(
                Arc::new(InMemoryProfileRepository::new()),
                Arc::new(users),
            ))
        }
    }
}

/// Build the shared handler state from server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (profiles, profiles_query) = build_profile_ports(config);
    web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        profiles,
        profiles_query,
    ))
}
