//! Acquire, call, release.

use crate::error::Result;
use crate::pool::{ConnectionPool, PoolStatus, ProcedureConnection};
use crate::procedure::{Procedure, ProcedureCall};
use async_trait::async_trait;

/// Object-safe view of a pool, for callers that should not care which
/// database sits behind it.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, call: &ProcedureCall) -> Result<Procedure>;

    fn pool_status(&self) -> PoolStatus;
}

#[async_trait]
impl<P: ConnectionPool> Dispatcher for P {
    async fn dispatch(&self, call: &ProcedureCall) -> Result<Procedure> {
        dispatch(self, call).await
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            size: self.size(),
            idle: self.idle(),
        }
    }
}

/// Run one procedure call on a pooled connection.
///
/// The connection lives only inside this function, so it is back in the pool
/// by the time the caller sees the outcome, whichever way the call went.
pub async fn dispatch<P: ConnectionPool>(pool: &P, call: &ProcedureCall) -> Result<Procedure> {
    let procedure = call.procedure;

    let outcome = async {
        let mut conn = pool.acquire().await?;
        conn.call(call).await
    }
    .await;

    match outcome {
        Ok(()) => {
            tracing::debug!(procedure = procedure.name(), "procedure call succeeded");
            Ok(procedure)
        }
        Err(e) => {
            tracing::error!(
                procedure = procedure.name(),
                error = %e,
                "procedure call failed"
            );
            Err(e)
        }
    }
}
