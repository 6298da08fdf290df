//! # Error Types
//!
//! Error conditions surfaced by the instance and controller modules.
//! Zone validation rejections are deliberately not part of this enum; they
//! are silently dropped by the zone store.

use thiserror::Error as ThisError;

use crate::types::InstanceId;

/// Result type with a typed error
pub type TrainsResult<T> = Result<T, TrainsError>;

#[derive(Debug, ThisError)]
pub enum TrainsError {
    /// A patch referenced an instance the controller does not know about.
    /// The directory and the actual fleet of instances have diverged.
    #[error("unknown instance with id: {0}")]
    UnknownInstance(InstanceId),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote command failed: {0}")]
    Rcon(String),

    #[error("unknown ipc channel: {0}")]
    UnknownChannel(String),

    #[error("malformed payload on {channel}: {source}")]
    Payload {
        channel: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("controller is no longer running")]
    ControllerGone,

    #[error("instance actor is no longer running")]
    InstanceGone,
}
