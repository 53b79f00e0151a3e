//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users that own profiles. Written by the identity side; read here for
    /// the `{id, name, avatar}` projection.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        avatar -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One developer profile per owner.
    ///
    /// `social`, `experience`, and `education` hold JSON documents; the two
    /// lists are arrays ordered newest first.
    profiles (id) {
        id -> Uuid,
        owner_id -> Uuid,
        company -> Nullable<Text>,
        website -> Nullable<Text>,
        location -> Nullable<Text>,
        bio -> Nullable<Text>,
        status -> Nullable<Text>,
        github_username -> Nullable<Text>,
        skills -> Nullable<Array<Text>>,
        social -> Jsonb,
        experience -> Jsonb,
        education -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, profiles);
