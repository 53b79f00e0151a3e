//! Profile API handlers.
//!
//! ```text
//! GET    /api/v1/profile/me
//! POST   /api/v1/profile
//! GET    /api/v1/profile
//! GET    /api/v1/profile/user/{owner_id}
//! DELETE /api/v1/profile
//! PUT    /api/v1/profile/experience
//! DELETE /api/v1/profile/experience/{entry_id}
//! PUT    /api/v1/profile/education
//! DELETE /api/v1/profile/education/{entry_id}
//! ```
//!
//! Mutating routes resolve the caller from the session before validating the
//! body; the domain service never sees an unvalidated request. Their
//! responses carry only the owner id under `user`, while reads include the
//! owner's name and avatar.
//!
//! A lookup that matches nothing (no profile behind `/me` or a public id, or
//! an unknown entry id) is a `400` with a user-facing message. Only a
//! sub-record edit whose parent profile is missing is a `404`.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::UpsertProfileRequest;
use crate::domain::{EntryId, Error, NewEducation, NewExperience, ProfileFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::profiles_dto::{
    DeleteAccountResponse, EducationRequest, ExperienceRequest, ProfileRequest, ProfileResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Entry ids arrive in the path; a malformed one cannot match any entry.
fn parse_entry_id(raw: &str) -> Result<EntryId, Error> {
    raw.parse::<EntryId>()
        .map_err(|_| Error::no_match(format!("No entry with id {raw}")))
}

/// Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 400, description = "No profile for this user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getMyProfile"
)]
#[get("/profile/me")]
pub async fn get_my_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let view = state.profiles_query.profile_for_owner(&owner).await?;
    Ok(web::Json(ProfileResponse::from(view)))
}

/// Create the caller's profile or patch the supplied fields into it.
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertProfile"
)]
#[post("/profile")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let fields = ProfileFields::try_from(payload.into_inner())?;
    let profile = state
        .profiles
        .upsert(UpsertProfileRequest { owner, fields })
        .await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// List every profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "All profiles", body = [ProfileResponse]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles",
    security([])
)]
#[get("/profile")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    let views = state.profiles_query.list_profiles().await?;
    Ok(web::Json(
        views.into_iter().map(ProfileResponse::from).collect(),
    ))
}

/// Fetch the profile owned by `owner_id`.
///
/// An unknown or malformed id is reported as `400 Bad Request`.
#[utoipa::path(
    get,
    path = "/api/v1/profile/user/{owner_id}",
    params(("owner_id" = String, Path, description = "Owning user's id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Profile not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfileByOwner",
    security([])
)]
#[get("/profile/user/{owner_id}")]
pub async fn get_profile_by_owner(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let view = state.profiles_query.public_profile(&path.into_inner()).await?;
    Ok(web::Json(ProfileResponse::from(view)))
}

/// Delete the caller's profile and user record, then end the session.
#[utoipa::path(
    delete,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Account deleted", body = DeleteAccountResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "deleteAccount"
)]
#[delete("/profile")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    state.profiles.delete_account(&owner).await?;
    session.clear();
    Ok(HttpResponse::Ok().json(DeleteAccountResponse {
        message: "user deleted".to_owned(),
    }))
}

/// Prepend an experience entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/v1/profile/experience",
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No profile for this user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "addExperience"
)]
#[put("/profile/experience")]
pub async fn add_experience(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ExperienceRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let entry = NewExperience::try_from(payload.into_inner())?;
    let profile = state.profiles.add_experience(&owner, entry).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Remove one experience entry from the caller's profile.
#[utoipa::path(
    delete,
    path = "/api/v1/profile/experience/{entry_id}",
    params(("entry_id" = String, Path, description = "Experience entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No entry with this id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No profile for this user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "removeExperience"
)]
#[delete("/profile/experience/{entry_id}")]
pub async fn remove_experience(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_entry_id(&path.into_inner())?;
    let profile = state.profiles.remove_experience(&owner, id).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Prepend an education entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/v1/profile/education",
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No profile for this user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "addEducation"
)]
#[put("/profile/education")]
pub async fn add_education(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EducationRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let entry = NewEducation::try_from(payload.into_inner())?;
    let profile = state.profiles.add_education(&owner, entry).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Remove one education entry from the caller's profile.
#[utoipa::path(
    delete,
    path = "/api/v1/profile/education/{entry_id}",
    params(("entry_id" = String, Path, description = "Education entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No entry with this id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No profile for this user", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "removeEducation"
)]
#[delete("/profile/education/{entry_id}")]
pub async fn remove_education(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owner = session.require_user_id()?;
    let id = parse_entry_id(&path.into_inner())?;
    let profile = state.profiles.remove_education(&owner, id).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
