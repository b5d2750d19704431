//! masal-server: HTTP gateway for voice-preset text-to-speech

pub mod config;
pub mod http;

pub use config::{HttpConfig, LogConfig, ServerConfig, ServerConfigError};
pub use http::{create_router, ApiError, ApiState};
