//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries only the opaque session token issued by the session
//! manager. The user it belongs to is resolved server-side on every request.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionToken};

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a freshly issued token in the session cookie.
    ///
    /// The session id is renewed so a pre-login cookie can never be reused.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.expose())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Raw token from the cookie, if one is present.
    ///
    /// The value is not validated here; the session manager treats malformed
    /// tokens as unknown.
    pub fn token(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Drop every value and instruct the browser to delete the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
