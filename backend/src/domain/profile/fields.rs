//! Sparse field sets used to create or patch a profile.
//!
//! Every field is optional. A field that is `None` is left untouched on an
//! existing profile and omitted from a new one. Empty input strings never
//! become stored values.

use serde::{Deserialize, Serialize};

/// Ordered skill list parsed from a comma-delimited string.
///
/// Pieces are trimmed. Order and duplicates are kept, and so are empty pieces
/// produced by consecutive commas.
///
/// # Examples
/// ```
/// use devconnector::domain::Skills;
///
/// let skills = Skills::parse("rust, sql,go");
/// assert_eq!(skills.as_slice(), ["rust", "sql", "go"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skills(Vec<String>);

impl Skills {
    /// Split `raw` on commas and trim each piece.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(',').map(|piece| piece.trim().to_owned()).collect())
    }

    /// Wrap an already split list, e.g. one read back from storage.
    pub fn from_vec(skills: Vec<String>) -> Self {
        Self(skills)
    }

    /// Skills in input order.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Consume the list.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Social network links keyed by platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    /// Twitter / X profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// YouTube channel URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Facebook page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    /// LinkedIn profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Instagram profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialLinks {
    /// `true` when no platform is set.
    pub fn is_empty(&self) -> bool {
        self.twitter.is_none()
            && self.youtube.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.instagram.is_none()
    }

    /// Overwrite each platform present in `patch`; keep the others.
    pub fn merge(&mut self, patch: &SocialLinks) {
        merge_field(&mut self.twitter, &patch.twitter);
        merge_field(&mut self.youtube, &patch.youtube);
        merge_field(&mut self.facebook, &patch.facebook);
        merge_field(&mut self.linkedin, &patch.linkedin);
        merge_field(&mut self.instagram, &patch.instagram);
    }
}

pub(super) fn merge_field<T: Clone>(target: &mut Option<T>, patch: &Option<T>) {
    if let Some(value) = patch {
        *target = Some(value.clone());
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Sparse set of profile fields supplied by an upsert.
///
/// Setters drop empty strings so that the set only ever carries values the
/// caller actually provided.
///
/// # Examples
/// ```
/// use devconnector::domain::ProfileFields;
///
/// let fields = ProfileFields::default()
///     .company(Some("Acme".to_owned()))
///     .website(Some(String::new()))
///     .skills(Some("rust"));
/// assert_eq!(fields.company.as_deref(), Some("Acme"));
/// assert!(fields.website.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    /// Current employer.
    pub company: Option<String>,
    /// Personal website URL.
    pub website: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Short biography.
    pub bio: Option<String>,
    /// Professional status, e.g. "Developer".
    pub status: Option<String>,
    /// GitHub account name.
    pub github_username: Option<String>,
    /// Parsed skills list.
    pub skills: Option<Skills>,
    /// Platforms to set; unset platforms are left alone on merge.
    pub social: SocialLinks,
}

impl ProfileFields {
    /// Set `company`; an empty string is absent.
    pub fn company(mut self, value: Option<String>) -> Self {
        self.company = present(value);
        self
    }

    /// Set `website`; an empty string is absent.
    pub fn website(mut self, value: Option<String>) -> Self {
        self.website = present(value);
        self
    }

    /// Set `location`; an empty string is absent.
    pub fn location(mut self, value: Option<String>) -> Self {
        self.location = present(value);
        self
    }

    /// Set `bio`; an empty string is absent.
    pub fn bio(mut self, value: Option<String>) -> Self {
        self.bio = present(value);
        self
    }

    /// Set `status`; an empty string is absent.
    pub fn status(mut self, value: Option<String>) -> Self {
        self.status = present(value);
        self
    }

    /// Set `github_username`; an empty string is absent.
    pub fn github_username(mut self, value: Option<String>) -> Self {
        self.github_username = present(value);
        self
    }

    /// Parse a comma-delimited skills string; an empty string is absent.
    pub fn skills(mut self, raw: Option<&str>) -> Self {
        self.skills = raw.filter(|text| !text.is_empty()).map(Skills::parse);
        self
    }

    /// Set the Twitter link; an empty string is absent.
    pub fn twitter(mut self, value: Option<String>) -> Self {
        self.social.twitter = present(value);
        self
    }

    /// Set the YouTube link; an empty string is absent.
    pub fn youtube(mut self, value: Option<String>) -> Self {
        self.social.youtube = present(value);
        self
    }

    /// Set the Facebook link; an empty string is absent.
    pub fn facebook(mut self, value: Option<String>) -> Self {
        self.social.facebook = present(value);
        self
    }

    /// Set the LinkedIn link; an empty string is absent.
    pub fn linkedin(mut self, value: Option<String>) -> Self {
        self.social.linkedin = present(value);
        self
    }

    /// Set the Instagram link; an empty string is absent.
    pub fn instagram(mut self, value: Option<String>) -> Self {
        self.social.instagram = present(value);
        self
    }
}
