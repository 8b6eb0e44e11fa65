//! Shared wire types.

mod response;

pub use response::{ErrorResponse, UserEnvelope};
