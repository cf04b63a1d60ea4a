//! Database module for MySQL stored-procedure calls.

mod pool;
mod procedures;

pub use pool::*;
pub use procedures::*;
