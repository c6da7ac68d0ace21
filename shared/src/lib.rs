//! Shared types for the queue portal
//!
//! Common types used by both the server and the client: domain models,
//! error types, response structures, the registration gate and
//! capacity rules.

pub mod capacity;
pub mod countdown;
pub mod error;
pub mod event;
pub mod gate;
pub mod models;
pub mod serde_helpers;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use capacity::Capacity;
pub use countdown::CountdownTrigger;
pub use event::{EventKind, PortalEvent};
pub use gate::{GateStatus, evaluate};
