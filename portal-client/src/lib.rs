//! Portal Client - HTTP client for the pre-registration portal
//!
//! - [`HttpClient`]: typed calls for every REST endpoint
//! - [`GateWatcher`]: polls the server and keeps a local registration countdown

pub mod config;
pub mod error;
pub mod http;
pub mod watcher;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{Health, HttpClient};
pub use watcher::{GateTracker, GateWatcher};

// Re-export shared types for convenience
pub use shared::error::{ApiResponse, AppError, ErrorCode};
pub use shared::gate::GateStatus;
pub use shared::models::{CurrentUserResponse, LoginResponse, UserInfo};
