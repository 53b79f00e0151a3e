//! Tests for the profile aggregate, its sparse fields, and entry lists.

use super::*;
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use serde_json::json;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[fixture]
fn owner() -> UserId {
    UserId::new("123e4567-e89b-12d3-a456-426614174000").expect("fixture id")
}

#[fixture]
fn profile(owner: UserId) -> Profile {
    let fields = ProfileFields::default()
        .status(Some("Developer".to_owned()))
        .skills(Some("rust,sql"));
    Profile::from_fields(owner, &fields)
}

#[rstest]
#[case("a, b,c", &["a", "b", "c"])]
#[case("a,,b", &["a", "", "b"])]
#[case(" rust ", &["rust"])]
#[case("go,go", &["go", "go"])]
fn skills_split_and_trim(#[case] raw: &str, #[case] expected: &[&str]) {
    assert_eq!(Skills::parse(raw).as_slice(), expected);
}

#[rstest]
fn empty_strings_are_absent() {
    let fields = ProfileFields::default()
        .company(Some(String::new()))
        .skills(Some(""))
        .twitter(Some(String::new()));

    assert_eq!(fields, ProfileFields::default());
}

#[rstest]
fn new_profile_only_carries_supplied_fields(profile: Profile, owner: UserId) {
    assert_eq!(profile.owner, owner);
    assert_eq!(profile.status.as_deref(), Some("Developer"));
    assert!(profile.company.is_none());
    assert!(profile.social.is_empty());
    assert!(profile.experience.is_empty());
    assert!(profile.education.is_empty());
}

#[rstest]
fn sequential_patches_accumulate(owner: UserId) {
    let mut profile = Profile::from_fields(owner, &ProfileFields::default().bio(Some("x".into())));
    profile.apply(&ProfileFields::default().company(Some("y".into())));

    assert_eq!(profile.bio.as_deref(), Some("x"));
    assert_eq!(profile.company.as_deref(), Some("y"));
}

#[rstest]
fn applying_same_fields_twice_is_idempotent(mut profile: Profile) {
    let fields = ProfileFields::default()
        .location(Some("Leeds".to_owned()))
        .youtube(Some("https://youtube.com/@dev".to_owned()));
    profile.apply(&fields);
    let once = profile.clone();
    profile.apply(&fields);

    assert_eq!(profile, once);
}

#[rstest]
fn social_links_merge_per_platform(mut profile: Profile) {
    profile.apply(&ProfileFields::default().twitter(Some("https://x.com/a".into())));
    profile.apply(&ProfileFields::default().linkedin(Some("https://linkedin.com/in/a".into())));

    assert_eq!(profile.social.twitter.as_deref(), Some("https://x.com/a"));
    assert_eq!(
        profile.social.linkedin.as_deref(),
        Some("https://linkedin.com/in/a")
    );
}

#[rstest]
fn experience_is_newest_first(mut profile: Profile) {
    let first = profile
        .add_experience(NewExperience::new("E1", "Acme", date(2018, 1, 1)))
        .id;
    let second = profile
        .add_experience(NewExperience::new("E2", "Acme", date(2019, 1, 1)))
        .id;
    let third = profile
        .add_experience(NewExperience::new("E3", "Acme", date(2020, 1, 1)))
        .id;

    let ids: Vec<_> = profile.experience.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[rstest]
fn removing_middle_entry_keeps_order(mut profile: Profile) {
    let oldest = profile
        .add_education(NewEducation::new("Uni", "BSc", "CS", date(2010, 9, 1)))
        .id;
    let middle = profile
        .add_education(NewEducation::new("Uni", "MSc", "CS", date(2013, 9, 1)))
        .id;
    let newest = profile
        .add_education(NewEducation::new("Uni", "PhD", "CS", date(2014, 9, 1)))
        .id;

    let removed = profile.remove_education(middle).expect("entry exists");
    assert_eq!(removed.degree, "MSc");

    let ids: Vec<_> = profile.education.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newest, oldest]);
}

#[rstest]
fn removing_only_entry_leaves_empty_list(mut profile: Profile) {
    let id = profile
        .add_experience(NewExperience::new("Dev", "Acme", date(2021, 3, 1)))
        .id;
    profile.remove_experience(id).expect("entry exists");
    assert!(profile.experience.is_empty());
}

#[rstest]
fn removing_unknown_entry_changes_nothing(mut profile: Profile) {
    profile.add_experience(NewExperience::new("Dev", "Acme", date(2021, 3, 1)));
    let before = profile.clone();
    let unknown = EntryId::random();

    assert_eq!(
        profile.remove_experience(unknown),
        Err(EntryNotFound(unknown))
    );
    assert_eq!(profile, before);
}

#[rstest]
fn entry_list_rejects_duplicate_ids() {
    let id = "5f0e5a44-6b8c-4b58-9d0e-1a4f2f3b2c11";
    let entry = json!({
        "id": id,
        "title": "Dev",
        "company": "Acme",
        "from": "2020-01-01",
    });
    let result: Result<EntryList<Experience>, _> =
        serde_json::from_value(json!([entry.clone(), entry]));

    let err = result.expect_err("duplicate ids must be rejected");
    assert!(err.to_string().contains(id));
}

#[rstest]
fn experience_serialises_camel_case_and_defaults_current() {
    let value = json!({
        "id": "5f0e5a44-6b8c-4b58-9d0e-1a4f2f3b2c11",
        "school": "Uni",
        "degree": "BSc",
        "fieldOfStudy": "CS",
        "from": "2010-09-01",
    });
    let education: Education = serde_json::from_value(value).expect("valid education");
    assert!(!education.current);
    assert_eq!(education.field_of_study, "CS");

    let back = serde_json::to_value(&education).expect("serialise education");
    assert_eq!(back["fieldOfStudy"], "CS");
    assert!(back.get("to").is_none());
}
