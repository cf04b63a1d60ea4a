//! Stored-procedure calls over MySQL.

use async_trait::async_trait;
use personas_dispatch::{
    ConnectionPool, DispatchError, ProcArg, ProcedureCall, ProcedureConnection,
};
use sqlx::pool::PoolConnection;
use sqlx::MySql;

use super::Database;

/// A MySQL session borrowed from [`Database`]. Dropping it hands the session
/// back to the pool.
pub struct MySqlSession(PoolConnection<MySql>);

#[async_trait]
impl ConnectionPool for Database {
    type Connection = MySqlSession;

    async fn acquire(&self) -> Result<MySqlSession, DispatchError> {
        self.pool
            .acquire()
            .await
            .map(MySqlSession)
            .map_err(|e| DispatchError::acquire(error_detail(&e)))
    }

    fn size(&self) -> u32 {
        self.pool.size()
    }

    fn idle(&self) -> usize {
        self.pool.num_idle()
    }
}

#[async_trait]
impl ProcedureConnection for MySqlSession {
    async fn call(&mut self, call: &ProcedureCall) -> Result<(), DispatchError> {
        let sql = call.statement();
        let mut query = sqlx::query::<MySql>(&sql);

        for arg in &call.args {
            query = match arg {
                ProcArg::Int(value) => query.bind(*value),
                ProcArg::Text(value) => query.bind(value.as_str()),
                ProcArg::Date(value) => query.bind(*value),
                ProcArg::Null => query.bind(None::<String>),
            };
        }

        query
            .execute(&mut *self.0)
            .await
            .map(|_| ())
            .map_err(|e| DispatchError::execution(call.procedure.name(), error_detail(&e)))
    }
}

/// The server's own message for database errors, the driver's text otherwise.
fn error_detail(e: &sqlx::Error) -> String {
    match e {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    }
}
