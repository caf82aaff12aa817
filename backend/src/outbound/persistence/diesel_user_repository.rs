//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Inserts are a single statement, so the `users_email_key` and `users_pkey`
//! constraints decide uniqueness atomically and a failed insert leaves no
//! row behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, PersonName, User, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match unique_violation_constraint(&error) {
        Some(EMAIL_CONSTRAINT) => return UserPersistenceError::duplicate_email(),
        Some(PRIMARY_KEY_CONSTRAINT) => return UserPersistenceError::duplicate_id(),
        _ => {}
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Rebuild a domain user, re-validating stored values.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        email,
        first_name,
        last_name,
        password_hash,
    } = row;
    let corrupt = |err| UserPersistenceError::query(format!("corrupt user row {id}: {err}"));

    Ok(User::new(
        UserId::from_uuid(id),
        EmailAddress::new(email).map_err(corrupt)?,
        PersonName::new(first_name).map_err(corrupt)?,
        PersonName::new(last_name).map_err(corrupt)?,
        PasswordHash::new(password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            first_name: user.first_name().as_ref(),
            last_name: user.last_name().as_ref(),
            password_hash: user.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::super::diesel_basic_error_mapping::test_support::ConstraintInfo;
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        )
    }

    #[rstest]
    #[case(Some("users_email_key"), UserPersistenceError::DuplicateEmail)]
    #[case(Some("users_pkey"), UserPersistenceError::DuplicateId)]
    #[case(None, UserPersistenceError::query("database error"))]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(map_diesel_error(unique_violation(constraint)), expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn row_conversion_rejects_corrupt_email() {
        let row = UserRow {
            id: Uuid::nil(),
            email: "not-an-email".to_owned(),
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            password_hash: "hash".to_owned(),
        };
        let err = row_to_user(row).expect_err("corrupt row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_fields() {
        let row = UserRow {
            id: Uuid::nil(),
            email: "a@x.io".to_owned(),
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            password_hash: "hash".to_owned(),
        };
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id().as_uuid(), &Uuid::nil());
        assert_eq!(user.email().as_ref(), "a@x.io");
        assert_eq!(user.password_hash().as_str(), "hash");
    }
}
