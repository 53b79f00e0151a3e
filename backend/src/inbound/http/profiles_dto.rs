//! Request and response payloads for the profile endpoints.
//!
//! Request bodies keep every field optional so the handlers can report all
//! missing fields at once through [`FieldErrors`]. Responses flatten a
//! [`ProfileView`] into the JSON shape clients consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::ProfileView;
use crate::domain::{
    Education, Error, Experience, NewEducation, NewExperience, Profile, ProfileFields,
    SocialLinks,
};
use crate::inbound::http::validation::{FieldErrors, FieldName};

const STATUS: FieldName = FieldName::new("status");
const SKILLS: FieldName = FieldName::new("skills");
const TITLE: FieldName = FieldName::new("title");
const COMPANY: FieldName = FieldName::new("company");
const SCHOOL: FieldName = FieldName::new("school");
const DEGREE: FieldName = FieldName::new("degree");
const FIELD_OF_STUDY: FieldName = FieldName::new("fieldOfStudy");
const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");

/// Body for `POST /api/v1/profile`.
///
/// `status` and `skills` are required; every other field is optional and an
/// empty string counts as not supplied. `skills` is a comma-separated list.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    /// Current employer.
    pub company: Option<String>,
    /// Personal website URL.
    pub website: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Short biography.
    pub bio: Option<String>,
    /// Professional status.
    #[schema(example = "Developer")]
    pub status: Option<String>,
    /// GitHub account name.
    pub github_username: Option<String>,
    /// Comma-separated skills.
    #[schema(example = "rust, actix, postgres")]
    pub skills: Option<String>,
    /// Twitter / X URL.
    pub twitter: Option<String>,
    /// YouTube URL.
    pub youtube: Option<String>,
    /// Facebook URL.
    pub facebook: Option<String>,
    /// LinkedIn URL.
    pub linkedin: Option<String>,
    /// Instagram URL.
    pub instagram: Option<String>,
}

impl TryFrom<ProfileRequest> for ProfileFields {
    type Error = Error;

    fn try_from(body: ProfileRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let status = errors.require(STATUS, body.status);
        let skills = errors.require(SKILLS, body.skills);
        errors.finish()?;

        Ok(ProfileFields::default()
            .company(body.company)
            .website(body.website)
            .location(body.location)
            .bio(body.bio)
            .status(status)
            .github_username(body.github_username)
            .skills(skills.as_deref())
            .twitter(body.twitter)
            .youtube(body.youtube)
            .facebook(body.facebook)
            .linkedin(body.linkedin)
            .instagram(body.instagram))
    }
}

/// Body for `PUT /api/v1/profile/experience`.
///
/// Dates accept `YYYY-MM-DD` or an RFC 3339 timestamp.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    /// Job title.
    #[schema(example = "Senior Engineer")]
    pub title: Option<String>,
    /// Current employer.
    pub company: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Start date, `YYYY-MM-DD`.
    #[schema(example = "2021-03-01")]
    pub from: Option<String>,
    /// End date, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Still ongoing; defaults to `false`.
    pub current: Option<bool>,
    /// Free-form notes.
    pub description: Option<String>,
}

impl TryFrom<ExperienceRequest> for NewExperience {
    type Error = Error;

    fn try_from(body: ExperienceRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let title = errors.require(TITLE, body.title);
        let company = errors.require(COMPANY, body.company);
        let from = errors.required_date(FROM, body.from);
        let to = errors.optional_date(TO, body.to);
        errors.finish()?;

        let (Some(title), Some(company), Some(from)) = (title, company, from) else {
            return Err(Error::invalid_request("request validation failed"));
        };
        let mut entry = NewExperience::new(title, company, from);
        entry.location = non_empty(body.location);
        entry.to = to;
        entry.current = body.current.unwrap_or(false);
        entry.description = non_empty(body.description);
        Ok(entry)
    }
}

/// Body for `PUT /api/v1/profile/education`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationRequest {
    /// School or institution.
    pub school: Option<String>,
    /// Degree or certificate.
    pub degree: Option<String>,
    /// Field of study.
    pub field_of_study: Option<String>,
    /// Start date, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// End date, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Still ongoing; defaults to `false`.
    pub current: Option<bool>,
    /// Free-form notes.
    pub description: Option<String>,
}

impl TryFrom<EducationRequest> for NewEducation {
    type Error = Error;

    fn try_from(body: EducationRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let school = errors.require(SCHOOL, body.school);
        let degree = errors.require(DEGREE, body.degree);
        let field_of_study = errors.require(FIELD_OF_STUDY, body.field_of_study);
        let from = errors.required_date(FROM, body.from);
        let to = errors.optional_date(TO, body.to);
        errors.finish()?;

        let (Some(school), Some(degree), Some(field_of_study), Some(from)) =
            (school, degree, field_of_study, from)
        else {
            return Err(Error::invalid_request("request validation failed"));
        };
        let mut entry = NewEducation::new(school, degree, field_of_study, from);
        entry.to = to;
        entry.current = body.current.unwrap_or(false);
        entry.description = non_empty(body.description);
        Ok(entry)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Public projection of a profile owner.
///
/// `name` and `avatar` are omitted when the user record no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct OwnerResponse {
    /// Owner user id.
    pub id: Uuid,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Social links present on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SocialResponse {
    /// Twitter / X URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// YouTube URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Facebook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    /// LinkedIn URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Instagram URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl From<SocialLinks> for SocialResponse {
    fn from(links: SocialLinks) -> Self {
        let SocialLinks {
            twitter,
            youtube,
            facebook,
            linkedin,
            instagram,
        } = links;
        Self {
            twitter,
            youtube,
            facebook,
            linkedin,
            instagram,
        }
    }
}

/// One experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResponse {
    /// Entry id.
    pub id: Uuid,
    /// Job title.
    pub title: String,
    /// Current employer.
    pub company: String,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Start date.
    pub from: NaiveDate,
    /// End date, absent while ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Still ongoing.
    pub current: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Experience> for ExperienceResponse {
    fn from(entry: Experience) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            title: entry.title,
            company: entry.company,
            location: entry.location,
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description,
        }
    }
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationResponse {
    /// Entry id.
    pub id: Uuid,
    /// School or institution.
    pub school: String,
    /// Degree or certificate.
    pub degree: String,
    /// Field of study.
    pub field_of_study: String,
    /// Start date.
    pub from: NaiveDate,
    /// End date, absent while ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Still ongoing.
    pub current: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Education> for EducationResponse {
    fn from(entry: Education) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            school: entry.school,
            degree: entry.degree,
            field_of_study: entry.field_of_study,
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description,
        }
    }
}

/// A profile with its owner's public projection.
///
/// Experience and education are listed newest first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Profile id.
    pub id: Uuid,
    /// Owner projection.
    pub user: OwnerResponse,
    /// Current employer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Personal website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Short biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Professional status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// GitHub account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    /// Skills in input order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Social network links.
    #[serde(default)]
    pub social: SocialResponse,
    /// Work history.
    #[serde(default)]
    pub experience: Vec<ExperienceResponse>,
    /// Schooling history.
    #[serde(default)]
    pub education: Vec<EducationResponse>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        let ProfileView { profile, owner } = view;
        let user = OwnerResponse {
            id: *profile.owner.as_uuid(),
            name: owner.as_ref().map(|user| user.name().as_ref().to_owned()),
            avatar: owner.as_ref().and_then(|user| user.avatar().map(str::to_owned)),
        };
        Self {
            id: *profile.id.as_uuid(),
            user,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            github_username: profile.github_username,
            skills: profile.skills.map(|skills| skills.into_vec()),
            social: profile.social.into(),
            experience: profile
                .experience
                .into_vec()
                .into_iter()
                .map(ExperienceResponse::from)
                .collect(),
            education: profile
                .education
                .into_vec()
                .into_iter()
                .map(EducationResponse::from)
                .collect(),
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self::from(ProfileView {
            profile,
            owner: None,
        })
    }
}

/// Confirmation returned by `DELETE /api/v1/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteAccountResponse {
    /// Confirmation text.
    #[schema(example = "user deleted")]
    pub message: String,
}
