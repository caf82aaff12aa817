//! In-memory `UserRepository` adapter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

#[derive(Default)]
struct UserIndex {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<EmailAddress, UserId>,
}

/// User store held in process memory.
///
/// Both indexes sit behind one mutex so the uniqueness check and the insert
/// happen in a single critical section.
#[derive(Default)]
pub struct InMemoryUserRepository {
    index: Mutex<UserIndex>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, UserIndex>, UserPersistenceError> {
        self.index
            .lock()
            .map_err(|_| UserPersistenceError::query("user index lock poisoned"))
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.index.lock().map(|index| index.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut index = self.lock()?;
        if index.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::duplicate_id());
        }
        if index.id_by_email.contains_key(user.email()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        index
            .id_by_email
            .insert(user.email().clone(), user.id().clone());
        index.by_id.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let index = self.lock()?;
        Ok(index
            .id_by_email
            .get(email)
            .and_then(|id| index.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let index = self.lock()?;
        Ok(index.by_id.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::{PasswordHash, PersonName};
    use rstest::{fixture, rstest};

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            EmailAddress::new(email).expect("valid email"),
            PersonName::new("Ann").expect("valid name"),
            PersonName::new("Lee").expect("valid name"),
            PasswordHash::new("hash"),
        )
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_find_by_both_keys(repo: InMemoryUserRepository) {
        let ann = user("a@x.io");
        repo.insert(&ann).await.expect("insert");

        assert_eq!(
            repo.find_by_email(ann.email()).await.expect("lookup"),
            Some(ann.clone())
        );
        assert_eq!(repo.find_by_id(ann.id()).await.expect("lookup"), Some(ann));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_keys_return_none(repo: InMemoryUserRepository) {
        let email = EmailAddress::new("nobody@x.io").expect("valid email");
        assert!(repo.find_by_email(&email).await.expect("lookup").is_none());
        assert!(repo.find_by_id(&UserId::random()).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_without_side_effects(repo: InMemoryUserRepository) {
        let first = user("a@x.io");
        repo.insert(&first).await.expect("first insert");

        let second = user("A@X.io");
        let err = repo.insert(&second).await.expect_err("duplicate email");
        assert_eq!(err, UserPersistenceError::DuplicateEmail);
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_id(second.id()).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_id_is_rejected(repo: InMemoryUserRepository) {
        let first = user("a@x.io");
        repo.insert(&first).await.expect("first insert");

        let clash = User::new(
            first.id().clone(),
            EmailAddress::new("b@x.io").expect("valid email"),
            PersonName::new("Bob").expect("valid name"),
            PersonName::new("Ray").expect("valid name"),
            PasswordHash::new("hash"),
        );
        let err = repo.insert(&clash).await.expect_err("duplicate id");
        assert_eq!(err, UserPersistenceError::DuplicateId);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_admit_exactly_one_owner_per_email() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(&user("race@x.io")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.expect("task completes") {
                Ok(()) => successes += 1,
                Err(err) => assert_eq!(err, UserPersistenceError::DuplicateEmail),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.len(), 1);
    }
}
