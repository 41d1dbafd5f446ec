//! Session identity types shared across Awase services.
//!
//! Session issuance and validation live in the session gateway; services
//! only consume the identity headers it injects.

pub mod identity;
