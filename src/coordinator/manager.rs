//! The call-intent coordinator state machine
//!
//! All three entry points (user action, permission result, connection
//! change) funnel into [`CallIntentCoordinator::process_event`], and every
//! potential trigger re-evaluates the full precondition set through the
//! single [`attempt_call`](CallIntentCoordinator::attempt_call) choke point
//! rather than assuming any event ordering.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::call::{classify_destination, CallAttemptRecord, CallId, RoutingMode};
use crate::coordinator::config::CoordinatorConfig;
use crate::coordinator::events::{CallCompletionHandler, CallOutcome, CoordinatorEvent};
use crate::error::CoordinatorError;
use crate::permission::{PermissionProvider, PermissionState};
use crate::session::{ConnectionStatus, SessionClient};

/// Phase of the intent state machine
///
/// User intent and the call-in-flight guard are one enum, so invalid
/// combinations such as "call in flight with unconsumed intent" cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentPhase {
    /// No pending user intent
    Idle,
    /// User pressed; waiting for all preconditions to hold
    AwaitingPreconditions,
    /// A call has been dispatched and its completion has not fired yet
    InCall,
}

impl IntentPhase {
    /// Check if a user press is waiting to be satisfied
    pub fn is_intent_pending(&self) -> bool {
        matches!(self, IntentPhase::AwaitingPreconditions)
    }

    /// Check if a call is currently in flight
    pub fn is_in_call(&self) -> bool {
        matches!(self, IntentPhase::InCall)
    }
}

/// Aggregate counters for coordinator activity
#[derive(Debug, Clone, Default)]
pub struct CoordinatorStats {
    /// User presses observed (including ignored mid-call presses)
    pub presses: usize,
    /// Permission requests issued to the provider
    pub permission_requests: usize,
    /// Calls dispatched through the session client
    pub dispatched_calls: usize,
    /// Dispatched calls that completed successfully
    pub completed_calls: usize,
    /// Dispatched calls whose completion reported an error
    pub failed_dispatches: usize,
}

/// Mutable facts owned by the coordinator, all behind one lock
#[derive(Debug)]
struct CoordinatorState {
    phase: IntentPhase,
    permission: PermissionState,
    connection: ConnectionStatus,
    /// Latch: the provider is queried at most once per coordinator instance
    permission_requested: bool,
}

/// Coordinates permission, connectivity and user intent into at most one
/// outbound call dispatch per satisfied intent
///
/// The coordinator owns no external resources: the session client and the
/// permission provider are shared, externally-owned collaborators whose
/// state it only reads and whose callbacks it consumes as events.
pub struct CallIntentCoordinator {
    config: CoordinatorConfig,
    session: Arc<dyn SessionClient>,
    permissions: Arc<dyn PermissionProvider>,
    state: Mutex<CoordinatorState>,
    completion_handler: RwLock<Option<Arc<dyn CallCompletionHandler>>>,
    stats: Mutex<CoordinatorStats>,
    attempts: DashMap<CallId, CallAttemptRecord>,
}

impl CallIntentCoordinator {
    /// Create a coordinator with injected collaborators
    ///
    /// Prefer [`CoordinatorBuilder`](crate::coordinator::CoordinatorBuilder)
    /// for the fluent configuration surface.
    pub fn new(
        config: CoordinatorConfig,
        session: Arc<dyn SessionClient>,
        permissions: Arc<dyn PermissionProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            session,
            permissions,
            state: Mutex::new(CoordinatorState {
                phase: IntentPhase::Idle,
                permission: PermissionState::Unknown,
                connection: ConnectionStatus::Disconnected,
                permission_requested: false,
            }),
            completion_handler: RwLock::new(None),
            stats: Mutex::new(CoordinatorStats::default()),
            attempts: DashMap::new(),
        })
    }

    /// Register the completion handler invoked once per dispatched call
    pub async fn set_completion_handler(&self, handler: Arc<dyn CallCompletionHandler>) {
        *self.completion_handler.write().await = Some(handler);
    }

    /// Process one coordinator event
    ///
    /// The single update function: every external stimulus becomes a
    /// [`CoordinatorEvent`] and flows through here.
    pub async fn process_event(self: &Arc<Self>, event: CoordinatorEvent) {
        match event {
            CoordinatorEvent::UserAction => self.handle_user_action().await,
            CoordinatorEvent::PermissionResult { granted } => {
                self.handle_permission_result(granted).await
            }
            CoordinatorEvent::ConnectionChanged { status, reason } => {
                self.handle_connection_changed(status, reason).await
            }
        }
    }

    /// The user pressed the call action
    pub async fn on_user_action(self: &Arc<Self>) {
        self.process_event(CoordinatorEvent::UserAction).await;
    }

    /// The permission provider resolved the microphone request
    pub async fn on_permission_result(self: &Arc<Self>, granted: bool) {
        self.process_event(CoordinatorEvent::PermissionResult { granted })
            .await;
    }

    /// The session client reported a connection status change
    pub async fn on_connection_changed(
        self: &Arc<Self>,
        status: ConnectionStatus,
        reason: Option<String>,
    ) {
        self.process_event(CoordinatorEvent::ConnectionChanged { status, reason })
            .await;
    }

    // Boxed return type breaks the recursive `Send` inference cycle through
    // process_event -> handle_user_action -> the spawned permission task.
    fn handle_user_action<'a>(
        self: &'a Arc<Self>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 'a>> {
        Box::pin(self.handle_user_action_inner())
    }

    async fn handle_user_action_inner(self: &Arc<Self>) {
        self.stats.lock().await.presses += 1;

        let (request_permission, connected) = {
            let mut state = self.state.lock().await;
            if state.phase.is_in_call() {
                debug!("press ignored: a call is already in flight");
                return;
            }
            state.phase = IntentPhase::AwaitingPreconditions;

            let request_permission =
                state.permission == PermissionState::Unknown && !state.permission_requested;
            if request_permission {
                state.permission_requested = true;
            }

            // Refresh the cached status at the press, like any other trigger
            state.connection = self.session.connection_status();
            (request_permission, state.connection.is_connected())
        };

        if request_permission {
            self.stats.lock().await.permission_requests += 1;
            let this = Arc::clone(self);
            // Fire-and-forget: the decision re-enters as a PermissionResult event
            tokio::spawn(async move {
                let granted = this.permissions.request_microphone_permission().await;
                this.on_permission_result(granted).await;
            });
        }

        if connected {
            self.attempt_call().await;
            return;
        }

        match self.config.auth_token.as_deref() {
            Some(token) => {
                info!("session not connected; requesting login and deferring the call");
                if let Err(e) = self.session.login(token).await {
                    warn!(error = %e, "login request failed");
                }
            }
            None => {
                let err = CoordinatorError::missing_configuration("auth_token");
                warn!(error = %err, "cannot log in");
            }
        }
        // The call, if intent survives, fires from a ConnectionChanged event
    }

    async fn handle_permission_result(self: &Arc<Self>, granted: bool) {
        {
            let mut state = self.state.lock().await;
            state.permission = if granted {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            };
        }

        if !granted {
            info!("microphone permission denied");
            return;
        }

        info!("microphone permission granted");
        if let Err(e) = self.permissions.activate_audio_session().await {
            // The grant is the gating fact; activation failure never blocks dispatch
            warn!(error = %e, "audio session activation failed");
        }

        // A press may have raced ahead of the permission dialog; re-evaluate
        // instead of stranding the intent until an unrelated trigger fires.
        self.attempt_call().await;
    }

    async fn handle_connection_changed(
        self: &Arc<Self>,
        status: ConnectionStatus,
        reason: Option<String>,
    ) {
        let previous = {
            let mut state = self.state.lock().await;
            let previous = state.connection;
            state.connection = status;
            previous
        };

        match status {
            ConnectionStatus::Failed => {
                let err = CoordinatorError::session_error(
                    reason.unwrap_or_else(|| "connection failed".to_string()),
                );
                error!(error = %err, "session reported a failure");
            }
            _ => {
                debug!(from = %previous, to = %status, reason = ?reason, "connection status changed");
            }
        }

        if status.is_connected() {
            // Intent-gated: a no-op unless a press is pending
            self.attempt_call().await;
        }
    }

    /// Evaluate all preconditions and dispatch at most one call
    ///
    /// Checks short-circuit in order; a failure logs the outcome and leaves
    /// every fact untouched, including pending intent (a later trigger may
    /// legitimately satisfy the original press).
    async fn attempt_call(self: &Arc<Self>) {
        let (destination, routing) = {
            let mut state = self.state.lock().await;

            if !state.permission.is_granted() {
                debug!(permission = %state.permission, "call attempt aborted: permission not granted");
                return;
            }

            let destination = match self.config.callee.as_deref() {
                Some(callee) if !callee.is_empty() => callee.to_string(),
                _ => {
                    let err = CoordinatorError::missing_configuration("callee");
                    warn!(error = %err, "call attempt aborted");
                    return;
                }
            };

            if !state.connection.is_connected() {
                let err = CoordinatorError::NotConnected {
                    status: state.connection,
                };
                debug!(error = %err, "call attempt aborted");
                return;
            }

            if !state.phase.is_intent_pending() {
                // Already calling, or no press to satisfy
                debug!(phase = ?state.phase, "call attempt skipped");
                return;
            }

            // One assignment consumes the intent and raises the in-flight guard
            state.phase = IntentPhase::InCall;
            let routing = classify_destination(&destination);
            (destination, routing)
        };

        self.dispatch(destination, routing).await;
    }

    /// Dispatch the call and deliver its outcome exactly once
    async fn dispatch(self: &Arc<Self>, destination: String, routing: RoutingMode) {
        info!(%destination, %routing, "dispatching call");
        self.stats.lock().await.dispatched_calls += 1;

        let provisional_id = CallId::new_v4();
        self.attempts.insert(
            provisional_id,
            CallAttemptRecord {
                call_id: provisional_id,
                destination: destination.clone(),
                routing,
                started_at: Utc::now(),
                completed_at: None,
                succeeded: None,
            },
        );

        let result = self.session.call(&destination, routing).await;

        // Clear the in-flight guard before anyone observes the completion
        {
            let mut state = self.state.lock().await;
            state.phase = IntentPhase::Idle;
        }

        let call_id = match &result {
            Ok(handle) => handle.call_id,
            Err(_) => provisional_id,
        };
        let completed_at = Utc::now();

        // Re-key the record under the session client's call id
        if let Some((_, mut record)) = self.attempts.remove(&provisional_id) {
            record.call_id = call_id;
            record.completed_at = Some(completed_at);
            record.succeeded = Some(result.is_ok());
            self.attempts.insert(call_id, record);
        }

        {
            let mut stats = self.stats.lock().await;
            match &result {
                Ok(_) => stats.completed_calls += 1,
                Err(_) => stats.failed_dispatches += 1,
            }
        }

        match &result {
            Ok(handle) => info!(call_id = %handle.call_id, "call dispatch completed"),
            Err(e) => warn!(error = %e, "call dispatch failed"),
        }

        let outcome = CallOutcome {
            call_id,
            destination,
            routing,
            completed_at,
            result,
        };

        let handler = self.completion_handler.read().await.clone();
        match handler {
            Some(handler) => handler.on_call_completed(outcome).await,
            None => debug!("no completion handler registered; outcome dropped"),
        }
    }

    // ===== Introspection =====

    /// Current phase of the intent state machine
    pub async fn phase(&self) -> IntentPhase {
        self.state.lock().await.phase
    }

    /// Last observed permission state
    pub async fn permission_state(&self) -> PermissionState {
        self.state.lock().await.permission
    }

    /// Last observed connection status
    pub async fn connection_status(&self) -> ConnectionStatus {
        self.state.lock().await.connection
    }

    /// Snapshot of the activity counters
    pub async fn stats(&self) -> CoordinatorStats {
        self.stats.lock().await.clone()
    }

    /// All recorded call attempts
    pub fn call_history(&self) -> Vec<CallAttemptRecord> {
        self.attempts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Look up one recorded attempt
    pub fn get_attempt(&self, call_id: &CallId) -> Option<CallAttemptRecord> {
        self.attempts.get(call_id).map(|entry| entry.value().clone())
    }
}

impl std::fmt::Debug for CallIntentCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallIntentCoordinator")
            .field("config", &self.config)
            .field("attempts", &self.attempts.len())
            .finish()
    }
}
