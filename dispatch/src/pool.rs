//! The seam between dispatch and whatever actually talks to the database.
//!
//! A pool hands out connections; a connection runs procedure calls. Giving a
//! connection back is its `Drop`: whoever owns the value owns the session, and
//! the session returns to the pool exactly once, when that owner goes out of
//! scope. There is no explicit release to forget or to call twice.

use crate::error::Result;
use crate::procedure::ProcedureCall;
use async_trait::async_trait;
use serde::Serialize;

/// A bounded source of database sessions.
///
/// `acquire` waits while the pool is saturated, up to whatever acquire
/// timeout the implementation is configured with, and fails with
/// [`DispatchError::Acquire`](crate::DispatchError::Acquire) after that.
#[async_trait]
pub trait ConnectionPool: Send + Sync + 'static {
    type Connection: ProcedureConnection;

    async fn acquire(&self) -> Result<Self::Connection>;

    /// Connections currently open, idle or borrowed.
    fn size(&self) -> u32;

    /// Connections open and not borrowed.
    fn idle(&self) -> usize;
}

/// A borrowed database session. Dropping it returns it to its pool.
#[async_trait]
pub trait ProcedureConnection: Send {
    async fn call(&mut self, call: &ProcedureCall) -> Result<()>;
}

/// Point-in-time pool occupancy, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
}
