//! Population data endpoints.

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use personas_dispatch::{InsertPeopleRequest, InsertUsersRequest, ProcedureCall};

use crate::error::{ErrorResponse, Result};
use crate::extract::JsonBody;
use crate::handlers::{handle_procedure, MessageResponse};
use crate::routes::docs::{InsertPeopleSchema, InsertUsersSchema};
use crate::AppState;

/// Create procedure routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/insertar-personas", post(insert_people))
        .route("/insertar-usuario", post(insert_users))
        .route("/asignar-roles", post(assign_roles))
        .route("/limpiar-personas", delete(clear_people))
}

/// Inserta personas en la base de datos.
#[utoipa::path(
    post,
    path = "/insertar-personas",
    tag = "personas",
    request_body = InsertPeopleSchema,
    responses(
        (status = 200, description = "Personas insertadas correctamente.", body = MessageResponse),
        (status = 400, description = "Cuerpo de la solicitud inválido.", body = ErrorResponse),
        (status = 500, description = "Error al insertar personas.", body = ErrorResponse)
    )
)]
pub async fn insert_people(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InsertPeopleRequest>,
) -> Result<Json<MessageResponse>> {
    let call = ProcedureCall::insert_people(&request);
    let response = handle_procedure(state.dispatcher.as_ref(), call).await?;
    Ok(Json(response))
}

/// Inserta usuarios en la base de datos con un rol específico.
#[utoipa::path(
    post,
    path = "/insertar-usuario",
    tag = "personas",
    request_body = InsertUsersSchema,
    responses(
        (status = 200, description = "Usuarios insertados correctamente.", body = MessageResponse),
        (status = 400, description = "Cuerpo de la solicitud inválido.", body = ErrorResponse),
        (status = 500, description = "Error al insertar usuarios.", body = ErrorResponse)
    )
)]
pub async fn insert_users(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InsertUsersRequest>,
) -> Result<Json<MessageResponse>> {
    let call = ProcedureCall::insert_users(&request);
    let response = handle_procedure(state.dispatcher.as_ref(), call).await?;
    Ok(Json(response))
}

/// Asigna roles a los usuarios.
#[utoipa::path(
    post,
    path = "/asignar-roles",
    tag = "personas",
    responses(
        (status = 200, description = "Roles asignados correctamente.", body = MessageResponse),
        (status = 500, description = "Error al asignar roles.", body = ErrorResponse)
    )
)]
pub async fn assign_roles(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    let response =
        handle_procedure(state.dispatcher.as_ref(), ProcedureCall::assign_roles()).await?;
    Ok(Json(response))
}

/// Elimina todos los registros de la tabla de personas.
#[utoipa::path(
    delete,
    path = "/limpiar-personas",
    tag = "personas",
    responses(
        (status = 200, description = "Tabla de personas limpiada correctamente.", body = MessageResponse),
        (status = 500, description = "Error al limpiar la tabla de personas.", body = ErrorResponse)
    )
)]
pub async fn clear_people(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    let response =
        handle_procedure(state.dispatcher.as_ref(), ProcedureCall::clear_people()).await?;
    Ok(Json(response))
}
