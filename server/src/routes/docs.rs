//! OpenAPI document and Swagger UI.
//!
//! Request bodies are described by local schema types so the dispatch crate
//! stays free of documentation concerns.

use axum::Router;
use serde::Serialize;
use utoipa::openapi::server::Server;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::handlers::MessageResponse;
use crate::routes::health::{HealthResponse, PoolSummary};
use crate::AppState;

/// Where Swagger UI is served.
pub const DOCS_PATH: &str = "/api-docs";

/// Where the raw OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Body of `POST /insertar-personas`.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertPeopleSchema {
    pub cantidad: i64,
    /// Empty string or null means any gender
    pub genero: Option<String>,
    #[schema(format = Date, example = "2020-01-01")]
    pub fecha_inicio: String,
    #[schema(format = Date, example = "2020-12-31")]
    pub fecha_fin: String,
}

/// Body of `POST /insertar-usuario`.
#[derive(Serialize, ToSchema)]
pub struct InsertUsersSchema {
    pub cantidad: i64,
    pub tipo_usuario: String,
    pub edad_minima: i64,
    pub edad_maxima: i64,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Personas",
        version = "1.0.0",
        description = "Documentación de la API para insertar personas, usuarios y asignar roles."
    ),
    paths(
        crate::routes::procedures::insert_people,
        crate::routes::procedures::insert_users,
        crate::routes::procedures::assign_roles,
        crate::routes::procedures::clear_people,
        crate::routes::health::health_check,
    ),
    components(schemas(
        InsertPeopleSchema,
        InsertUsersSchema,
        MessageResponse,
        ErrorResponse,
        HealthResponse,
        PoolSummary,
    )),
    tags(
        (name = "personas", description = "Generación y limpieza de datos de población"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

/// OpenAPI document advertising `server_url` as the base URL.
pub fn openapi(server_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(server_url)]);
    doc
}

/// Create documentation routes.
pub fn routes(server_url: &str) -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, openapi(server_url)))
}
