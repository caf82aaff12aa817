//! Test utilities shared by unit tests across the crate.
//!
//! Only compiled when running tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    LoginService, RegistrationService, SessionService, TaskBoard, UserProfileQuery,
};
use crate::domain::{CredentialService, SessionManager, SessionPolicy, TaskService};
use crate::outbound::memory::{
    InMemorySessionRepository, InMemoryTaskRepository, InMemoryUserRepository,
};
use crate::outbound::password::{BcryptPasswordHasher, MIN_BCRYPT_COST};

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fully wired in-memory account stack with a fast bcrypt cost.
pub struct AccountStack {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub clock: Arc<MutableClock>,
    pub session_manager: Arc<SessionManager<InMemorySessionRepository>>,
    pub credentials: Arc<
        CredentialService<
            InMemoryUserRepository,
            BcryptPasswordHasher,
            SessionManager<InMemorySessionRepository>,
        >,
    >,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub task_service: Arc<TaskService<InMemoryTaskRepository>>,
}

impl AccountStack {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&sessions),
            clock.clone(),
            SessionPolicy::default(),
        ));
        let credentials = Arc::new(CredentialService::new(
            Arc::clone(&users),
            Arc::new(BcryptPasswordHasher::new(MIN_BCRYPT_COST)),
            Arc::clone(&session_manager),
        ));
        let tasks = Arc::new(InMemoryTaskRepository::default());
        let task_service = Arc::new(TaskService::new(Arc::clone(&tasks), clock.clone()));
        Self {
            users,
            sessions,
            clock,
            session_manager,
            credentials,
            tasks,
            task_service,
        }
    }

    pub fn registration(&self) -> Arc<dyn RegistrationService> {
        self.credentials.clone()
    }

    pub fn login(&self) -> Arc<dyn LoginService> {
        self.credentials.clone()
    }

    pub fn profiles(&self) -> Arc<dyn UserProfileQuery> {
        self.credentials.clone()
    }

    pub fn session_service(&self) -> Arc<dyn SessionService> {
        self.session_manager.clone()
    }

    pub fn task_board(&self) -> Arc<dyn TaskBoard> {
        self.task_service.clone()
    }
}
