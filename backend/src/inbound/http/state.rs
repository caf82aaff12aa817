//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RegistrationService, SessionService, TaskBoard, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub sessions: Arc<dyn SessionService>,
    pub profiles: Arc<dyn UserProfileQuery>,
    pub tasks: Arc<dyn TaskBoard>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::{CredentialService, SessionManager, SessionPolicy, TaskService};
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::memory::{
    ///     InMemorySessionRepository, InMemoryTaskRepository, InMemoryUserRepository,
    /// };
    /// use accounts::outbound::password::BcryptPasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let sessions = Arc::new(SessionManager::new(
    ///     Arc::new(InMemorySessionRepository::default()),
    ///     Arc::new(DefaultClock),
    ///     SessionPolicy::default(),
    /// ));
    /// let credentials = Arc::new(CredentialService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(BcryptPasswordHasher::default()),
    ///     sessions.clone(),
    /// ));
    /// let tasks = Arc::new(TaskService::new(
    ///     Arc::new(InMemoryTaskRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     credentials.clone(),
    ///     credentials.clone(),
    ///     sessions,
    ///     credentials,
    ///     tasks,
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        registration: Arc<dyn RegistrationService>,
        login: Arc<dyn LoginService>,
        sessions: Arc<dyn SessionService>,
        profiles: Arc<dyn UserProfileQuery>,
        tasks: Arc<dyn TaskBoard>,
    ) -> Self {
        Self {
            registration,
            login,
            sessions,
            profiles,
            tasks,
        }
    }
}
