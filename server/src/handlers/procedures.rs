//! Procedure handler - runs one stored procedure per request.

use crate::error::{AppError, Result};
use personas_dispatch::{Dispatcher, ProcedureCall};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for a successful procedure call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Dispatch `call` and turn the outcome into a response.
///
/// Acquisition and execution failures both become
/// [`AppError::Procedure`], tagged with the procedure's error category.
pub async fn handle_procedure(
    dispatcher: &dyn Dispatcher,
    call: ProcedureCall,
) -> Result<MessageResponse> {
    let procedure = dispatcher
        .dispatch(&call)
        .await
        .map_err(|e| AppError::procedure(call.procedure, e))?;

    Ok(MessageResponse {
        message: procedure.success_message().to_string(),
    })
}
