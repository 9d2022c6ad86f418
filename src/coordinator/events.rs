//! Event types for call-intent coordination
//!
//! The coordinator consumes explicit events through one update function
//! instead of mutating ad hoc flags from scattered callbacks. The three
//! variants below are the only ways the outside world can drive it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::call::{CallHandle, CallId, RoutingMode};
use crate::error::{CoordinatorError, CoordinatorResult};
use crate::session::ConnectionStatus;

/// An input to the coordinator's update function
#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    /// The user pressed the call action
    UserAction,
    /// The permission provider resolved the microphone request
    PermissionResult {
        /// Whether microphone access was granted
        granted: bool,
    },
    /// The session client's connection status changed
    ConnectionChanged {
        /// New connection status
        status: ConnectionStatus,
        /// Reason for the change (if the client provided one)
        reason: Option<String>,
    },
}

/// Outcome of one dispatched call, delivered exactly once per dispatch
#[derive(Debug, Clone)]
pub struct CallOutcome {
    /// Identifier of the dispatched call
    pub call_id: CallId,
    /// Destination that was dialed
    pub destination: String,
    /// Routing mode the call was dispatched with
    pub routing: RoutingMode,
    /// When the completion fired
    pub completed_at: DateTime<Utc>,
    /// The session client's result, forwarded verbatim
    pub result: CoordinatorResult<CallHandle>,
}

impl CallOutcome {
    /// Check if the dispatch succeeded
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Get the call handle (if the dispatch succeeded)
    pub fn handle(&self) -> Option<&CallHandle> {
        self.result.as_ref().ok()
    }

    /// Get the dispatch error (if the dispatch failed)
    pub fn error(&self) -> Option<&CoordinatorError> {
        self.result.as_ref().err()
    }
}

/// Completion callback for dispatched calls
///
/// Registered by the embedding application; invoked exactly once per
/// dispatched call, after the in-flight guard has cleared. Precondition
/// failures never reach this handler.
#[async_trait]
pub trait CallCompletionHandler: Send + Sync {
    /// Handle the outcome of a dispatched call
    async fn on_call_completed(&self, outcome: CallOutcome);
}
