//! Session client capability
//!
//! The session client is the externally-owned, authenticated connection
//! manager. The coordinator only reads its status, asks it to log in, and
//! dispatches calls through it; it never manages the client's lifecycle.
//! Injecting the capability as a trait object keeps the coordinator free of
//! any concrete SDK and makes test doubles trivial.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::call::{CallHandle, RoutingMode};
use crate::error::CoordinatorResult;

/// Connection status of the session client
///
/// Owned by the session client; the coordinator caches the last value it
/// observed from a status-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// No session established
    Disconnected,
    /// Login/connect in progress
    Connecting,
    /// Session established, calls can be dispatched
    Connected,
    /// Session establishment failed
    Failed,
}

impl ConnectionStatus {
    /// Check if calls can be dispatched in this status
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Connecting => write!(f, "Connecting"),
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Capability trait for the external session client
///
/// Status-change notifications are delivered by the embedding application
/// into [`CallIntentCoordinator::on_connection_changed`]; subscription
/// mechanics belong to the client implementation.
///
/// [`CallIntentCoordinator::on_connection_changed`]:
///     crate::coordinator::CallIntentCoordinator::on_connection_changed
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Current connection status
    fn connection_status(&self) -> ConnectionStatus;

    /// Request login with the given auth token
    ///
    /// Idempotent: calling while already connecting or connected is a no-op
    /// for conforming implementations.
    async fn login(&self, auth_token: &str) -> CoordinatorResult<()>;

    /// Dispatch one outbound call
    ///
    /// Resolves exactly once with the call handle or the dispatch error.
    async fn call(&self, destination: &str, routing: RoutingMode) -> CoordinatorResult<CallHandle>;
}
