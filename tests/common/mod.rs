//! Shared test doubles for the integration suites

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use outdial_core::{
    CallCompletionHandler, CallHandle, CallOutcome, ConnectionStatus, CoordinatorError,
    CoordinatorResult, PermissionProvider, RoutingMode, SessionClient,
};

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("outdial_core=debug")
        .with_test_writer()
        .try_init();
}

/// Session client double that records logins and dispatched calls
pub struct FakeSessionClient {
    status: Mutex<ConnectionStatus>,
    pub login_calls: AtomicUsize,
    pub dispatched: Mutex<Vec<(String, RoutingMode)>>,
}

impl FakeSessionClient {
    pub fn new(status: ConnectionStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            login_calls: AtomicUsize::new(0),
            dispatched: Mutex::new(Vec::new()),
        })
    }

    pub fn set_status(&self, status: ConnectionStatus) {
        *self.status.lock().unwrap() = status;
    }

    pub fn call_count(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionClient for FakeSessionClient {
    fn connection_status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap()
    }

    async fn login(&self, auth_token: &str) -> CoordinatorResult<()> {
        if auth_token.is_empty() {
            return Err(CoordinatorError::login_failed("empty token"));
        }
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.set_status(ConnectionStatus::Connecting);
        Ok(())
    }

    async fn call(
        &self,
        destination: &str,
        routing: RoutingMode,
    ) -> CoordinatorResult<CallHandle> {
        self.dispatched
            .lock()
            .unwrap()
            .push((destination.to_string(), routing));
        Ok(CallHandle::new(destination, routing))
    }
}

/// Permission provider double that always grants
pub struct GrantingPermissions {
    pub requests: AtomicUsize,
}

impl GrantingPermissions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PermissionProvider for GrantingPermissions {
    async fn request_microphone_permission(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        true
    }

    async fn activate_audio_session(&self) -> CoordinatorResult<()> {
        Ok(())
    }
}

/// Completion handler double that records every outcome
#[derive(Default)]
pub struct RecordingHandler {
    pub outcomes: Mutex<Vec<CallOutcome>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl CallCompletionHandler for RecordingHandler {
    async fn on_call_completed(&self, outcome: CallOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}
