//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: model developer profiles and the users that own them without any
//! knowledge of HTTP or storage. Inbound adapters talk to the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Profile and its sub-records: the aggregate edited by the service.
//! - ProfileService: implementation of the profile command and query ports.
//! - User / UserId: the owning identity and its public projection.

pub mod auth;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    DuplicateEntryId, Education, Entry, EntryId, EntryList, EntryNotFound, Experience,
    NewEducation, NewExperience, Profile, ProfileFields, ProfileId, Skills, SocialLinks,
};
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use devconnector::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
