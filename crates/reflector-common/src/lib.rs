//! Shared types for the state reflector: error taxonomy and session ids.

pub mod errors;
pub mod id;

pub use errors::{BridgeError, ConfigError, ReflectorError};
pub use id::SessionId;

pub type Result<T> = std::result::Result<T, ReflectorError>;
