//! Backend entry-point: loads configuration, prepares the store, and serves
//! the REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use devconnector::domain::ports::{UserRepository, fixture_user};
use devconnector::inbound::http::health::HealthState;
use devconnector::inbound::http::session_config::{BuildMode, session_settings_from_env};
use devconnector::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

use server::{AppSettings, ServerConfig, create_server};

/// Make sure the development login resolves to a stored user.
async fn seed_fixture_user(pool: &DbPool) {
    let user = match fixture_user() {
        Ok(user) => user,
        Err(error) => {
            warn!(%error, "fixture user invalid; skipping seed");
            return;
        }
    };
    let users = DieselUserRepository::new(pool.clone());
    if let Err(error) = users.upsert(&user).await {
        warn!(%error, "failed to seed fixture user");
    }
}

async fn connect_store(settings: &AppSettings, database_url: &str) -> io::Result<DbPool> {
    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
    }
    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    seed_fixture_user(&pool).await;
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = connect_store(&settings, url).await?;
            config = config.with_db_pool(pool);
        }
        None => info!("no database configured; profiles are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
