//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. When migrations change, regenerate with `diesel print-schema` or
//! update by hand.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries the `users_email_key` unique constraint; `id` is the
    /// primary key (`users_pkey`).
    users (id) {
        id -> Uuid,
        /// Canonical (trimmed, lowercased) email, max 120 characters.
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Encoded bcrypt hash.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Active sessions keyed by the SHA-256 hex digest of the token.
    sessions (token_digest) {
        token_digest -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    /// To-do items, each owned by one user.
    tasks (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        description -> Text,
        due_date -> Date,
        created_on -> Timestamptz,
        completed -> Bool,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(tasks -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(sessions, tasks, users);
