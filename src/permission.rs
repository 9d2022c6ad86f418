//! Microphone permission capability
//!
//! The permission provider is the platform gate for microphone access. It is
//! queried at most once per coordinator instance; the grant/deny result
//! re-enters the coordinator asynchronously. Audio-session activation is a
//! separate call that can fail independently of the permission grant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoordinatorResult;

/// Resolution state of the microphone permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    /// Provider has not answered yet
    Unknown,
    /// Microphone access granted
    Granted,
    /// Microphone access denied
    Denied,
}

impl PermissionState {
    /// Check if permission has been granted
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// Check if the provider has answered either way
    pub fn is_resolved(&self) -> bool {
        !matches!(self, PermissionState::Unknown)
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionState::Unknown => write!(f, "Unknown"),
            PermissionState::Granted => write!(f, "Granted"),
            PermissionState::Denied => write!(f, "Denied"),
        }
    }
}

/// Capability trait for the platform microphone permission gate
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Ask the user for microphone permission
    ///
    /// One-shot from the coordinator's point of view; resolves with the
    /// user's decision.
    async fn request_microphone_permission(&self) -> bool;

    /// Activate the audio capture session
    ///
    /// Called after a grant. Failure is reported but never blocks a call
    /// attempt: the grant is the gating fact, not activation success.
    async fn activate_audio_session(&self) -> CoordinatorResult<()>;
}
