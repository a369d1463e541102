//! Shared helpers for inbound HTTP tests.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

/// Session middleware for tests: fresh key per call, `session` cookie name,
/// `Secure` flag off so plain-HTTP test requests round-trip.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
