//! # Personas Dispatch
//!
//! Turns Personas API requests into stored-procedure calls.
//!
//! Every endpoint of the service follows the same shape: take a payload, borrow
//! one pooled connection, run exactly one stored procedure with positional
//! arguments, give the connection back, report the outcome. This crate owns
//! that shape and nothing else. All data generation, role assignment and
//! cleanup rules live inside the procedures.
//!
//! ## Pieces
//!
//! - [`InsertPeopleRequest`] / [`InsertUsersRequest`]: typed request bodies
//! - [`Procedure`] and [`ProcedureCall`]: which routine to run and with what
//! - [`ConnectionPool`] / [`ProcedureConnection`]: the seam to the database;
//!   releasing a connection is dropping it
//! - [`dispatch`]: acquire, call, release; [`Dispatcher`] is the same
//!   thing behind a trait object
//! - [`DispatchError`]: acquisition vs. execution failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use personas_dispatch::{dispatch, ProcedureCall};
//!
//! let procedure = dispatch(&pool, &ProcedureCall::assign_roles()).await?;
//! println!("{}", procedure.success_message());
//! ```

pub mod dispatch;
pub mod error;
pub mod payload;
pub mod pool;
pub mod procedure;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use dispatch::{dispatch, Dispatcher};
pub use error::{DispatchError, Result};
pub use payload::{InsertPeopleRequest, InsertUsersRequest};
pub use pool::{ConnectionPool, PoolStatus, ProcedureConnection};
pub use procedure::{ProcArg, Procedure, ProcedureCall};

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryConnection, MemoryPool};
