//! Request handlers for stored-procedure endpoints.

mod procedures;

pub use procedures::*;
