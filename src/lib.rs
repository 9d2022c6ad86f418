//! Outdial-core: call-intent coordination layer for outbound calls
//!
//! This crate coordinates the three asynchronous preconditions of an outbound
//! call - microphone permission, session connectivity, and explicit user
//! intent - and dispatches at most one call per satisfied intent.
//!
//! ## Proper Layer Separation
//! ```text
//! application UI -> outdial-core -> {SessionClient, PermissionProvider}
//! ```
//!
//! Outdial-core focuses on:
//! - Reconciling permission, connectivity and intent at a single choke point
//! - Preventing duplicate concurrent call dispatch
//! - Destination classification (server-bridge vs in-app routing)
//! - Completion reporting for UI integration
//!
//! The session transport, authentication protocol, and the platform
//! permission dialog are handled by the injected collaborators.

pub mod coordinator;
pub mod call;
pub mod session;
pub mod permission;
pub mod error;

// Public API exports (only high-level coordination types)
pub use coordinator::{CallIntentCoordinator, CoordinatorBuilder, CoordinatorConfig, CoordinatorStats, IntentPhase};
pub use call::{CallId, CallHandle, CallAttemptRecord, RoutingMode};
pub use session::{ConnectionStatus, SessionClient};
pub use permission::{PermissionProvider, PermissionState};
pub use coordinator::events::{
    CallCompletionHandler, CallOutcome, CoordinatorEvent,
};
pub use error::{CoordinatorError, CoordinatorResult};

/// Outdial-core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outdial_core_compiles() {
        // Basic compilation test
        assert!(!VERSION.is_empty());
    }
}
