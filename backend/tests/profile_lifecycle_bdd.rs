//! Behavioural tests for the profile lifecycle, driven through the profile
//! service over the in-memory adapters.

use std::cell::RefCell;
use std::sync::Arc;

use devconnector::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, ProfileView, UpsertProfileRequest,
    UserRepository,
};
use devconnector::domain::{
    DisplayName, EntryId, Error, ErrorCode, NewExperience, Profile, ProfileFields, ProfileService,
    User, UserId,
};
use chrono::NaiveDate;
use devconnector::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Service = ProfileService<InMemoryProfileRepository, InMemoryUserRepository>;

struct ProfileWorld {
    runtime: Runtime,
    service: Service,
    profiles: Arc<InMemoryProfileRepository>,
    users: Arc<InMemoryUserRepository>,
    owner: UserId,
    outcome: RefCell<Option<Result<Profile, Error>>>,
    lookup: RefCell<Option<Result<ProfileView, Error>>>,
}

impl ProfileWorld {
    fn new() -> Self {
        let owner = UserId::random();
        let user = User::new(
            owner.clone(),
            DisplayName::new("Grace Hopper").expect("valid name"),
            None,
        );
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let users = Arc::new(InMemoryUserRepository::with_users([user]));
        Self {
            runtime: Runtime::new().expect("tokio runtime"),
            service: ProfileService::new(profiles.clone(), users.clone()),
            profiles,
            users,
            owner,
            outcome: RefCell::new(None),
            lookup: RefCell::new(None),
        }
    }

    fn upsert(&self, fields: ProfileFields) {
        let request = UpsertProfileRequest {
            owner: self.owner.clone(),
            fields,
        };
        let result = self.runtime.block_on(self.service.upsert(request));
        *self.outcome.borrow_mut() = Some(result);
    }

    fn record(&self, result: Result<Profile, Error>) {
        *self.outcome.borrow_mut() = Some(result);
    }

    fn stored(&self) -> Profile {
        self.runtime
            .block_on(self.service.profile_for_owner(&self.owner))
            .expect("profile stored")
            .profile
    }
}

#[fixture]
fn world() -> ProfileWorld {
    ProfileWorld::new()
}

#[given("a registered developer")]
fn a_registered_developer(world: &ProfileWorld) {
    let _ = world;
}

#[given("a developer with a profile")]
fn a_developer_with_a_profile(world: &ProfileWorld) {
    world.upsert(
        ProfileFields::default()
            .status(Some("Developer".to_owned()))
            .skills(Some("rust")),
    );
}

#[when("they save a bio of {bio}")]
fn they_save_a_bio(world: &ProfileWorld, bio: String) {
    world.upsert(ProfileFields::default().bio(Some(bio)));
}

#[when("they save a company of {company}")]
fn they_save_a_company(world: &ProfileWorld, company: String) {
    world.upsert(ProfileFields::default().company(Some(company)));
}

#[when("they save the skills list \"a, b,c\"")]
fn they_save_the_skills_list(world: &ProfileWorld) {
    world.upsert(ProfileFields::default().skills(Some("a, b,c")));
}

fn add_experience(world: &ProfileWorld, title: String) {
    let from = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    let entry = NewExperience::new(title, "Acme", from);
    let result = world
        .runtime
        .block_on(world.service.add_experience(&world.owner, entry));
    world.record(result);
}

#[given("they add experience {title}")]
fn they_have_added_experience(world: &ProfileWorld, title: String) {
    add_experience(world, title);
}

#[when("they add experience {title}")]
fn they_add_experience(world: &ProfileWorld, title: String) {
    add_experience(world, title);
}

#[when("they remove an experience entry that does not exist")]
fn they_remove_an_unknown_experience(world: &ProfileWorld) {
    let result = world
        .runtime
        .block_on(world.service.remove_experience(&world.owner, EntryId::random()));
    world.record(result);
}

#[when("they remove the most recent experience entry")]
fn they_remove_the_most_recent_experience(world: &ProfileWorld) {
    let id = world
        .stored()
        .experience
        .iter()
        .next()
        .map(|entry| entry.id)
        .expect("an experience entry");
    let result = world
        .runtime
        .block_on(world.service.remove_experience(&world.owner, id));
    world.record(result);
}

#[when("they delete their account")]
fn they_delete_their_account(world: &ProfileWorld) {
    world
        .runtime
        .block_on(world.service.delete_account(&world.owner))
        .expect("account deleted");
}

#[when("their profile is looked up")]
fn their_profile_is_looked_up(world: &ProfileWorld) {
    let result = world
        .runtime
        .block_on(world.service.profile_for_owner(&world.owner));
    *world.lookup.borrow_mut() = Some(result);
}

#[then("the profile has bio {bio} and company {company}")]
fn the_profile_has_bio_and_company(world: &ProfileWorld, bio: String, company: String) {
    let profile = world.stored();
    assert_eq!(profile.bio.as_deref(), Some(bio.as_str()));
    assert_eq!(profile.company.as_deref(), Some(company.as_str()));
}

#[then("exactly one profile exists")]
fn exactly_one_profile_exists(world: &ProfileWorld) {
    let all = world
        .runtime
        .block_on(world.service.list_profiles())
        .expect("list profiles");
    assert_eq!(all.len(), 1);
}

#[then("the skills are a, b and c in order")]
fn the_skills_are_in_order(world: &ProfileWorld) {
    let profile = world.stored();
    let skills = profile.skills.expect("skills stored");
    assert_eq!(skills.as_slice(), ["a", "b", "c"]);
}

#[then("the experience titles read E3, E2, E1")]
fn the_experience_titles_read_newest_first(world: &ProfileWorld) {
    let titles: Vec<String> = world
        .stored()
        .experience
        .iter()
        .map(|entry| entry.title.clone())
        .collect();
    assert_eq!(titles, ["E3", "E2", "E1"]);
}

#[then("the last change matched nothing")]
fn the_last_change_matched_nothing(world: &ProfileWorld) {
    let outcome = world.outcome.borrow();
    let error = match outcome.as_ref().expect("a recorded change") {
        Ok(_) => panic!("expected the change to fail"),
        Err(error) => error,
    };
    assert_eq!(error.code(), ErrorCode::NoMatch);
}

#[then("the profile has {count} experience entries")]
fn the_profile_has_experience_entries(world: &ProfileWorld, count: usize) {
    assert_eq!(world.stored().experience.len(), count);
}

#[then("the lookup matched nothing")]
fn the_lookup_matched_nothing(world: &ProfileWorld) {
    let lookup = world.lookup.borrow();
    let error = match lookup.as_ref().expect("a recorded lookup") {
        Ok(_) => panic!("expected the lookup to fail"),
        Err(error) => error,
    };
    assert_eq!(error.code(), ErrorCode::NoMatch);
}

#[then("their user record is gone")]
fn their_user_record_is_gone(world: &ProfileWorld) {
    let user = world
        .runtime
        .block_on(world.users.find_by_id(&world.owner))
        .expect("user lookup");
    assert!(user.is_none());
    let profile = world
        .runtime
        .block_on(world.profiles.find_by_owner(&world.owner))
        .expect("profile lookup");
    assert!(profile.is_none());
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Sparse upserts keep earlier fields"
)]
fn sparse_upserts_keep_earlier_fields(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Skills are split on commas and trimmed"
)]
fn skills_are_split_on_commas_and_trimmed(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Experience is listed newest first"
)]
fn experience_is_listed_newest_first(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Removing an unknown experience entry changes nothing"
)]
fn removing_an_unknown_experience_entry_changes_nothing(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Removing the only experience entry empties the list"
)]
fn removing_the_only_experience_entry_empties_the_list(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Looking up a developer without a profile"
)]
fn looking_up_a_developer_without_a_profile(world: ProfileWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/profile_lifecycle.feature",
    name = "Deleting the account removes profile and user"
)]
fn deleting_the_account_removes_profile_and_user(world: ProfileWorld) {
    drop(world);
}
