//! Framework-level helpers shared by Awase services: health handlers,
//! request-id middleware, tracing setup, and serde formatting.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
