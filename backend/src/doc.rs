//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every profile, login, and health endpoint together
//! with the schema wrappers for domain types and the session cookie security
//! scheme. Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::profiles_dto::{
    DeleteAccountResponse, EducationRequest, EducationResponse, ExperienceRequest,
    ExperienceResponse, OwnerResponse, ProfileRequest, ProfileResponse, SocialResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Developer profile API",
        description = "Session-authenticated developer profiles with experience and education history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::profiles::get_my_profile,
        crate::inbound::http::profiles::upsert_profile,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::get_profile_by_owner,
        crate::inbound::http::profiles::delete_account,
        crate::inbound::http::profiles::add_experience,
        crate::inbound::http::profiles::remove_experience,
        crate::inbound::http::profiles::add_education,
        crate::inbound::http::profiles::remove_education,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        ProfileRequest,
        ExperienceRequest,
        EducationRequest,
        ProfileResponse,
        OwnerResponse,
        SocialResponse,
        ExperienceResponse,
        EducationResponse,
        DeleteAccountResponse,
    )),
    tags(
        (name = "profiles", description = "Developer profiles and their history"),
        (name = "users", description = "Session login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
