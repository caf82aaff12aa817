//! End-to-end account flow over HTTP.
//!
//! Wires the public handlers to in-memory adapters and walks two people
//! through sign-up, login, the session-gated home page, their task lists
//! and logout.

use std::sync::Arc;

use accounts::Trace;
use accounts::domain::{
    CredentialService, SessionManager, SessionPolicy, TRACE_ID_HEADER, TaskService,
};
use accounts::inbound::http::accounts::{current_session, login, logout, register};
use accounts::inbound::http::state::HttpState;
use accounts::inbound::http::tasks::{create_task, delete_task, list_tasks};
use accounts::outbound::memory::{
    InMemorySessionRepository, InMemoryTaskRepository, InMemoryUserRepository,
};
use accounts::outbound::password::BcryptPasswordHasher;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct World {
    users: Arc<InMemoryUserRepository>,
    sessions: Arc<InMemorySessionRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    state: web::Data<HttpState>,
}

#[fixture]
fn world() -> World {
    let users = Arc::new(InMemoryUserRepository::default());
    let sessions = Arc::new(InMemorySessionRepository::default());
    let manager = Arc::new(SessionManager::new(
        Arc::clone(&sessions),
        Arc::new(DefaultClock),
        SessionPolicy::default(),
    ));
    let credentials = Arc::new(CredentialService::new(
        Arc::clone(&users),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::clone(&manager),
    ));
    let tasks = Arc::new(InMemoryTaskRepository::default());
    let state = web::Data::new(HttpState::new(
        credentials.clone(),
        credentials.clone(),
        manager,
        credentials,
        Arc::new(TaskService::new(Arc::clone(&tasks), Arc::new(DefaultClock))),
    ));
    World {
        users,
        sessions,
        tasks,
        state,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(Trace)
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .service(register)
                .service(login)
                .service(logout)
                .service(current_session)
                .service(list_tasks)
                .service(create_task)
                .service(delete_task),
        )
        .await
    };
}

fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

fn location(response: &ServiceResponse) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn read_json(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response JSON")
}

#[rstest]
#[actix_web::test]
async fn two_people_share_an_email_and_only_the_first_gets_in(world: World) {
    let app = init_app!(world.state);

    let ann = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "email": "a@x.io",
            "firstName": "Ann",
            "lastName": "Lee",
            "password": "pw1"
        }))
        .send_request(&app)
        .await;
    assert_eq!(ann.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&ann).as_deref(), Some("/login"));

    let bob = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "email": "A@X.IO",
            "firstName": "Bob",
            "lastName": "Ray",
            "password": "pw2"
        }))
        .send_request(&app)
        .await;
    assert_eq!(bob.status(), StatusCode::CONFLICT);
    assert!(bob.headers().contains_key(TRACE_ID_HEADER));
    let body = read_json(bob).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(world.users.len(), 1);

    let bob_login = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "a@x.io", "password": "pw2" }))
        .send_request(&app)
        .await;
    assert_eq!(bob_login.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&bob_login).is_none());

    let ann_login = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "a@x.io", "password": "pw1" }))
        .send_request(&app)
        .await;
    assert_eq!(ann_login.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&ann_login).as_deref(), Some("/"));
    let cookie = session_cookie(&ann_login).expect("session cookie");
    assert_eq!(world.sessions.len(), 1);

    let home = actix_test::TestRequest::get()
        .uri("/")
        .cookie(cookie.clone())
        .send_request(&app)
        .await;
    assert_eq!(home.status(), StatusCode::OK);
    let home = read_json(home).await;
    assert_eq!(home["authenticated"], true);
    assert_eq!(home["user"]["email"], "a@x.io");
    assert_eq!(home["user"]["firstName"], "Ann");
    assert_eq!(home["user"]["lastName"], "Lee");
    assert!(home["user"].get("password").is_none());
    assert!(home["user"].get("passwordHash").is_none());

    let bye = actix_test::TestRequest::get()
        .uri("/logout")
        .cookie(cookie.clone())
        .send_request(&app)
        .await;
    assert_eq!(bye.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&bye).as_deref(), Some("/"));
    assert!(world.sessions.is_empty());

    let replay = actix_test::TestRequest::get()
        .uri("/")
        .cookie(cookie)
        .send_request(&app)
        .await;
    let replay = read_json(replay).await;
    assert_eq!(replay, json!({ "authenticated": false, "user": null }));
}

#[rstest]
#[actix_web::test]
async fn failed_logins_look_the_same_for_unknown_and_known_emails(world: World) {
    let app = init_app!(world.state);

    let registered = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "email": "a@x.io",
            "firstName": "Ann",
            "lastName": "Lee",
            "password": "pw1"
        }))
        .send_request(&app)
        .await;
    assert_eq!(registered.status(), StatusCode::SEE_OTHER);

    let mut messages = Vec::new();
    for (email, password) in [("a@x.io", "wrong"), ("ghost@x.io", "pw1")] {
        let response = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        messages.push((body["code"].clone(), body["message"].clone()));
    }

    assert_eq!(messages[0], messages[1]);
    assert!(world.sessions.is_empty());
}

#[rstest]
#[actix_web::test]
async fn invalid_registration_is_rejected_without_storing(world: World) {
    let app = init_app!(world.state);

    let response = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "email": "not-an-email",
            "firstName": "Ann",
            "lastName": "Lee",
            "password": "pw1"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(world.users.is_empty());
}

#[rstest]
#[actix_web::test]
async fn tasks_follow_the_session_and_stay_private(world: World) {
    let app = init_app!(world.state);

    let mut cookies = Vec::new();
    for (email, first) in [("a@x.io", "Ann"), ("b@x.io", "Bob")] {
        let registered = actix_test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "email": email,
                "firstName": first,
                "lastName": "Lee",
                "password": "pw1"
            }))
            .send_request(&app)
            .await;
        assert_eq!(registered.status(), StatusCode::SEE_OTHER);
        let logged_in = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": "pw1" }))
            .send_request(&app)
            .await;
        cookies.push(session_cookie(&logged_in).expect("session cookie"));
    }
    let (ann, bob) = (cookies[0].clone(), cookies[1].clone());

    let created = actix_test::TestRequest::post()
        .uri("/tasks/todo")
        .cookie(ann.clone())
        .set_json(json!({
            "title": "File taxes",
            "description": "Before the deadline",
            "dueDate": "2026-04-30"
        }))
        .send_request(&app)
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = read_json(created).await["id"]
        .as_str()
        .expect("task id")
        .to_owned();

    let bobs = actix_test::TestRequest::get()
        .uri("/tasks")
        .cookie(bob.clone())
        .send_request(&app)
        .await;
    assert_eq!(read_json(bobs).await, json!([]));
    let stolen = actix_test::TestRequest::delete()
        .uri(&format!("/tasks/delete/{id}"))
        .cookie(bob)
        .send_request(&app)
        .await;
    assert_eq!(stolen.status(), StatusCode::NOT_FOUND);
    assert_eq!(world.tasks.len(), 1);

    let bye = actix_test::TestRequest::get()
        .uri("/logout")
        .cookie(ann.clone())
        .send_request(&app)
        .await;
    assert_eq!(bye.status(), StatusCode::SEE_OTHER);

    let after = actix_test::TestRequest::get()
        .uri("/tasks")
        .cookie(ann)
        .send_request(&app)
        .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(world.tasks.len(), 1);
}
