//! Account API handlers.
//!
//! ```text
//! POST /register {"email":"a@x.io","firstName":"Ann","lastName":"Lee","password":"pw1"}
//! POST /login {"email":"a@x.io","password":"pw1"}
//! GET /logout
//! GET /
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::domain::{
    AuthError, Error, LoginCredentials, Registration, RegistrationError,
    RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = "Ann")]
    pub first_name: String,
    #[schema(example = "Lee")]
    pub last_name: String,
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.email,
            &value.first_name,
            &value.last_name,
            &value.password,
        )
    }
}

/// Login request body for `POST /login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ann@example.com")]
    pub email: String,
    pub password: String,
}

/// Public view of an account; never includes the password hash.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
        }
    }
}

/// Response body for `GET /`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<UserView>,
}

impl SessionStatus {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    fn signed_in(user: &User) -> Self {
        Self {
            authenticated: true,
            user: Some(UserView::from(user)),
        }
    }
}

fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Create an account and redirect to the login page.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 303, description = "Account created", headers(("Location" = String, description = "/login"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(RegistrationError::from)?;
    state.registration.register(&registration).await?;
    Ok(see_other("/login"))
}

/// Verify credentials, store the issued session token and redirect home.
///
/// Every rejection, including blank fields, yields the same `401` body. A
/// session the client already held is ended before the new one is stored.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 303, description = "Login success", headers(
            ("Set-Cookie" = String, description = "Session cookie"),
            ("Location" = String, description = "/")
        )),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(|err| {
        warn!(reason = %err, "login rejected");
        AuthError::InvalidCredentials
    })?;
    let token = state.login.login(&credentials).await?;
    if let Ok(Some(previous)) = session.token() {
        if let Err(err) = state.sessions.destroy(&previous).await {
            error!(error = %err, "failed to destroy replaced session");
        }
    }
    session.persist_token(&token)?;
    Ok(see_other("/"))
}

/// End the current session and redirect home.
///
/// Always succeeds from the client's point of view; store failures are
/// logged and the cookie is purged regardless.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session ended", headers(("Location" = String, description = "/")))
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    match session.token() {
        Ok(Some(token)) => match state.sessions.destroy(&token).await {
            Ok(()) => info!("session ended"),
            Err(err) => error!(error = %err, "failed to destroy session"),
        },
        Ok(None) => {}
        Err(err) => warn!(error = %err, "unreadable session cookie on logout"),
    }
    session.purge();
    see_other("/")
}

/// Report whether the caller holds a live session, and as whom.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Session status", body = SessionStatus),
        (status = 503, description = "Session store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentSession"
)]
#[get("/")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionStatus>> {
    let Some(token) = session.token()? else {
        return Ok(web::Json(SessionStatus::anonymous()));
    };
    let Some(user_id) = state.sessions.resolve(&token).await.map_err(Error::from)? else {
        session.purge();
        return Ok(web::Json(SessionStatus::anonymous()));
    };
    let status = match state.profiles.fetch_profile(&user_id).await? {
        Some(user) => SessionStatus::signed_in(&user),
        None => {
            warn!(user_id = %user_id, "session bound to a missing account");
            session.purge();
            SessionStatus::anonymous()
        }
    };
    Ok(web::Json(status))
}
