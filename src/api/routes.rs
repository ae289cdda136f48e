//! API route configuration.

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse, LinkResponse, ProjectResponse, TagResponse};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Project Catalog API",
        version = "0.1.0",
        description = "Read-only listing of projects with their tags and links",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_projects,
        handlers::get_project,
    ),
    components(
        schemas(
            HealthResponse,
            ProjectResponse,
            TagResponse,
            LinkResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "projects", description = "Project listing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Project routes (generic over Database)
    let project_routes = routes!(D => {
        get "/projects" => handlers::list_projects,
        get "/projects/{id}" => handlers::get_project,
    });

    system_routes
        .merge(project_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
