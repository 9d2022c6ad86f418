use serde::{Deserialize, Serialize};

/// Configuration for the call-intent coordinator
///
/// Both fields are optional at construction time; their absence only matters
/// when the corresponding step runs. A missing auth token blocks login, a
/// missing or empty callee aborts the call attempt. Either way the failure
/// is logged and the coordinator stays reusable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Credential passed to the session client's login
    pub auth_token: Option<String>,
    /// Destination to dial when intent and preconditions are satisfied
    pub callee: Option<String>,
}

impl CoordinatorConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auth token for session login
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the destination to dial
    pub fn with_callee(mut self, callee: impl Into<String>) -> Self {
        self.callee = Some(callee.into());
        self
    }
}
