//! Builder for creating call-intent coordinators

use std::sync::Arc;

use crate::coordinator::config::CoordinatorConfig;
use crate::coordinator::manager::CallIntentCoordinator;
use crate::permission::PermissionProvider;
use crate::session::SessionClient;

/// Builder for a [`CallIntentCoordinator`]
///
/// Construction is explicit: the session client and permission provider are
/// attached here rather than reached through any global singleton, so test
/// doubles can stand in for either collaborator.
pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
}

impl CoordinatorBuilder {
    /// Create a new coordinator builder
    pub fn new() -> Self {
        Self {
            config: CoordinatorConfig::default(),
        }
    }

    /// Set the full configuration
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the auth token for session login
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    /// Set the destination to dial
    pub fn callee(mut self, callee: impl Into<String>) -> Self {
        self.config.callee = Some(callee.into());
        self
    }

    /// Attach the collaborators and build the coordinator
    pub fn attach(
        self,
        session: Arc<dyn SessionClient>,
        permissions: Arc<dyn PermissionProvider>,
    ) -> Arc<CallIntentCoordinator> {
        CallIntentCoordinator::new(self.config, session, permissions)
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
