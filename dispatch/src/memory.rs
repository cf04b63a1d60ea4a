//! In-memory [`ConnectionPool`] for tests.
//!
//! Behaves like a real bounded pool (callers queue on a semaphore, give up
//! after the acquire timeout, and get their slot back when the connection is
//! dropped) but runs every procedure call against a script instead of a
//! database.

use crate::error::{DispatchError, Result};
use crate::pool::{ConnectionPool, ProcedureConnection};
use crate::procedure::{Procedure, ProcedureCall};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default wait before an acquire gives up.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
struct Script {
    calls: Vec<ProcedureCall>,
    failures: HashMap<Procedure, String>,
    acquire_failure: Option<String>,
}

#[derive(Default)]
struct Shared {
    script: Mutex<Script>,
    borrowed: AtomicUsize,
    peak_borrowed: AtomicUsize,
}

impl Shared {
    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Bounded pool of fake connections. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct MemoryPool {
    permits: Arc<Semaphore>,
    max_connections: u32,
    acquire_timeout: Duration,
    latency: Duration,
    shared: Arc<Shared>,
}

impl MemoryPool {
    pub fn new(max_connections: u32) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_connections as usize)),
            max_connections,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            latency: Duration::ZERO,
            shared: Arc::default(),
        }
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Every procedure call takes this long before completing.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every call to `procedure` fail with `message` from now on.
    pub fn fail_procedure(&self, procedure: Procedure, message: impl Into<String>) {
        self.shared
            .script()
            .failures
            .insert(procedure, message.into());
    }

    /// Make every acquire fail with `message` from now on.
    pub fn fail_acquire(&self, message: impl Into<String>) {
        self.shared.script().acquire_failure = Some(message.into());
    }

    /// Clear all scripted failures.
    pub fn heal(&self) {
        let mut script = self.shared.script();
        script.failures.clear();
        script.acquire_failure = None;
    }

    /// Every call made so far, in the order connections received them.
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.shared.script().calls.clone()
    }

    /// Connections not currently borrowed.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Highest number of connections borrowed at the same time.
    pub fn peak_borrowed(&self) -> usize {
        self.shared.peak_borrowed.load(Ordering::SeqCst)
    }

    /// Refuse new acquires. Borrowed connections may still finish.
    pub fn close(&self) {
        self.permits.close();
    }
}

#[async_trait]
impl ConnectionPool for MemoryPool {
    type Connection = MemoryConnection;

    async fn acquire(&self) -> Result<MemoryConnection> {
        let scripted = self.shared.script().acquire_failure.clone();
        if let Some(message) = scripted {
            return Err(DispatchError::acquire(message));
        }

        let permit = match tokio::time::timeout(
            self.acquire_timeout,
            self.permits.clone().acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                return Err(DispatchError::acquire(
                    "attempted to acquire a connection on a closed pool",
                ))
            }
            Err(_) => {
                return Err(DispatchError::acquire(
                    "pool timed out while waiting for an open connection",
                ))
            }
        };

        let borrowed = self.shared.borrowed.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared
            .peak_borrowed
            .fetch_max(borrowed, Ordering::SeqCst);

        Ok(MemoryConnection {
            shared: Arc::clone(&self.shared),
            latency: self.latency,
            _permit: permit,
        })
    }

    fn size(&self) -> u32 {
        self.max_connections
    }

    fn idle(&self) -> usize {
        self.available()
    }
}

/// A fake session borrowed from a [`MemoryPool`].
pub struct MemoryConnection {
    shared: Arc<Shared>,
    latency: Duration,
    _permit: OwnedSemaphorePermit,
}

#[async_trait]
impl ProcedureConnection for MemoryConnection {
    async fn call(&mut self, call: &ProcedureCall) -> Result<()> {
        self.shared.script().calls.push(call.clone());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failure = self
            .shared
            .script()
            .failures
            .get(&call.procedure)
            .cloned();
        match failure {
            Some(message) => Err(DispatchError::execution(call.procedure.name(), message)),
            None => Ok(()),
        }
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.shared.borrowed.fetch_sub(1, Ordering::SeqCst);
    }
}
