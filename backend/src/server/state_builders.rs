//! Builders wiring the account services over the configured stores.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use accounts::domain::ports::{SessionRepository, TaskRepository, UserRepository};
use accounts::domain::{CredentialService, SessionManager, SessionPolicy, TaskService};
use accounts::inbound::http::state::HttpState;
use accounts::outbound::memory::{
    InMemorySessionRepository, InMemoryTaskRepository, InMemoryUserRepository,
};
use accounts::outbound::password::BcryptPasswordHasher;
use accounts::outbound::persistence::{
    DieselSessionRepository, DieselTaskRepository, DieselUserRepository,
};

use super::ServerConfig;

/// User, session and task stores of one kind.
struct Stores<U, S, T> {
    users: Arc<U>,
    sessions: Arc<S>,
    tasks: Arc<T>,
}

/// Compose the services over one set of stores and expose them as driving
/// ports.
fn wire_services<U, S, T>(
    stores: Stores<U, S, T>,
    policy: SessionPolicy,
    bcrypt_cost: u32,
) -> HttpState
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    T: TaskRepository + 'static,
{
    let Stores {
        users,
        sessions,
        tasks,
    } = stores;
    let clock = Arc::new(DefaultClock);
    let session_manager = Arc::new(SessionManager::new(sessions, clock.clone(), policy));
    let credentials = Arc::new(CredentialService::new(
        users,
        Arc::new(BcryptPasswordHasher::new(bcrypt_cost)),
        Arc::clone(&session_manager),
    ));
    HttpState::new(
        credentials.clone(),
        credentials.clone(),
        session_manager,
        credentials,
        Arc::new(TaskService::new(tasks, clock)),
    )
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory stores otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL stores");
            wire_services(
                Stores {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
                    tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
                },
                config.session_policy,
                config.bcrypt_cost,
            )
        }
        None => {
            info!("no database configured; accounts and tasks are kept in memory");
            wire_services(
                Stores {
                    users: Arc::new(InMemoryUserRepository::default()),
                    sessions: Arc::new(InMemorySessionRepository::default()),
                    tasks: Arc::new(InMemoryTaskRepository::default()),
                },
                config.session_policy,
                config.bcrypt_cost,
            )
        }
    };
    web::Data::new(state)
}
