//! Capability projection for the datasource explorer.
//!
//! The data layer hands out opaque permission tokens per subject: one set for
//! the workspace the application lives in and one set per datasource. The
//! explorer never stores decisions made from them; every render projects the
//! current token sets into plain capability flags.

mod permission;
mod projector;

pub use permission::Permission;
pub use projector::{Capabilities, PermissionConfig, PermissionProjector};
