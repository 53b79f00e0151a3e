//! Ordered sub-collections of a profile: work experience and education.
//!
//! Entries are kept newest first. New entries are prepended and removal is
//! by identifier; lookups are linear scans, which suits the handful of
//! entries a profile carries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier of one experience or education entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored identifier.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Anything stored in an [`EntryList`].
pub trait Entry {
    /// Identifier unique within the owning list.
    fn id(&self) -> EntryId;
}

/// Error raised when an [`EntryList`] would contain the same id twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate entry id {0}")]
pub struct DuplicateEntryId(pub EntryId);

/// Ordered list of entries, newest first, unique by id.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use devconnector::domain::{EntryList, Experience, NewExperience};
///
/// let from = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let mut list: EntryList<Experience> = EntryList::default();
/// let first = list.prepend(NewExperience::new("Engineer", "Acme", from).into_entry()).id;
/// let second = list.prepend(NewExperience::new("Lead", "Acme", from).into_entry()).id;
///
/// let ids: Vec<_> = list.iter().map(|e| e.id).collect();
/// assert_eq!(ids, vec![second, first]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Entry> EntryList<T> {
    /// Build a list from stored entries, rejecting duplicate ids.
    pub fn try_from_vec(entries: Vec<T>) -> Result<Self, DuplicateEntryId> {
        for (index, entry) in entries.iter().enumerate() {
            let id = entry.id();
            if entries[..index].iter().any(|earlier| earlier.id() == id) {
                return Err(DuplicateEntryId(id));
            }
        }
        Ok(Self(entries))
    }

    /// Insert `entry` at the front and return a reference to it.
    ///
    /// Callers mint entries with [`EntryId::random`], so the id is fresh.
    pub fn prepend(&mut self, entry: T) -> &T {
        self.0.insert(0, entry);
        &self.0[0]
    }

    /// Look up an entry by id.
    pub fn find(&self, id: EntryId) -> Option<&T> {
        self.0.iter().find(|entry| entry.id() == id)
    }

    /// Remove the entry with `id`, keeping the order of the rest.
    ///
    /// Returns `None` and leaves the list untouched when no entry matches.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        let index = self.0.iter().position(|entry| entry.id() == id)?;
        Some(self.0.remove(index))
    }
}

impl<T> EntryList<T> {
    /// Iterate newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries newest first.
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Consume the list, keeping order.
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T> Deserialize<'de> for EntryList<T>
where
    T: Entry + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        Self::try_from_vec(entries).map_err(serde::de::Error::custom)
    }
}

/// A stored work-experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Entry identifier.
    pub id: EntryId,
    /// Job title.
    pub title: String,
    /// Employer.
    pub company: String,
    /// Where the work took place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// First day.
    pub from: NaiveDate,
    /// Last day; absent while ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Whether this is still ongoing.
    #[serde(default)]
    pub current: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry for Experience {
    fn id(&self) -> EntryId {
        self.id
    }
}

/// Experience details supplied by a caller, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    /// Job title.
    pub title: String,
    /// Employer.
    pub company: String,
    /// Where the work took place.
    pub location: Option<String>,
    /// First day.
    pub from: NaiveDate,
    /// Last day; absent while ongoing.
    pub to: Option<NaiveDate>,
    /// Whether this is still ongoing.
    pub current: bool,
    /// Free-form notes.
    pub description: Option<String>,
}

impl NewExperience {
    /// Required fields only; optional fields start empty and `current` false.
    pub fn new(title: impl Into<String>, company: impl Into<String>, from: NaiveDate) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: None,
            from,
            to: None,
            current: false,
            description: None,
        }
    }

    /// Assign a fresh [`EntryId`].
    pub fn into_entry(self) -> Experience {
        Experience {
            id: EntryId::random(),
            title: self.title,
            company: self.company,
            location: self.location,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

/// A stored education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Entry identifier.
    pub id: EntryId,
    /// School or institution.
    pub school: String,
    /// Degree or certificate.
    pub degree: String,
    /// Field of study.
    pub field_of_study: String,
    /// First day.
    pub from: NaiveDate,
    /// Last day; absent while ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Whether this is still ongoing.
    #[serde(default)]
    pub current: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry for Education {
    fn id(&self) -> EntryId {
        self.id
    }
}

/// Education details supplied by a caller, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEducation {
    /// School or institution.
    pub school: String,
    /// Degree or certificate.
    pub degree: String,
    /// Field of study.
    pub field_of_study: String,
    /// First day.
    pub from: NaiveDate,
    /// Last day; absent while ongoing.
    pub to: Option<NaiveDate>,
    /// Whether this is still ongoing.
    pub current: bool,
    /// Free-form notes.
    pub description: Option<String>,
}

impl NewEducation {
    /// Required fields only; optional fields start empty and `current` false.
    pub fn new(
        school: impl Into<String>,
        degree: impl Into<String>,
        field_of_study: impl Into<String>,
        from: NaiveDate,
    ) -> Self {
        Self {
            school: school.into(),
            degree: degree.into(),
            field_of_study: field_of_study.into(),
            from,
            to: None,
            current: false,
            description: None,
        }
    }

    /// Assign a fresh [`EntryId`].
    pub fn into_entry(self) -> Education {
        Education {
            id: EntryId::random(),
            school: self.school,
            degree: self.degree,
            field_of_study: self.field_of_study,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}
