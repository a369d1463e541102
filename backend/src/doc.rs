//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification for
//! the REST API: every inbound HTTP path, the adapter-layer schema wrappers,
//! and the session cookie security scheme. Swagger UI serves the document in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::chapters::ProgressRequest;
use crate::inbound::http::courses::RatingRequest;
use crate::inbound::http::profiles::ProfileUpdateRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course backend API",
        description = "HTTP interface for course browsing, progress, ratings, and instructor profiles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::courses::course_overview,
        crate::inbound::http::courses::check_rating_eligibility,
        crate::inbound::http::courses::submit_rating,
        crate::inbound::http::chapters::chapter_view,
        crate::inbound::http::chapters::set_chapter_completion,
        crate::inbound::http::chapters::unpublish_chapter,
        crate::inbound::http::profiles::profile_page,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RatingRequest,
        ProgressRequest,
        ProfileUpdateRequest,
    )),
    tags(
        (name = "users", description = "Session and identity operations"),
        (name = "courses", description = "Course overview and ratings"),
        (name = "chapters", description = "Chapter views, progress, and publication"),
        (name = "profiles", description = "Instructor profile pages"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
