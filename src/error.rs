//! Error types and handling for the outdial-core library
//!
//! This module defines all error types that can occur while coordinating a
//! call attempt and provides guidance on how to handle them.
//!
//! # Error Categories
//!
//! Errors are categorized to help with recovery strategies:
//!
//! - **Configuration Errors** - Missing token/callee, can't recover without fixing config
//! - **Permission Errors** - Microphone access denied, needs user action
//! - **Connectivity Errors** - Session not connected, usually resolves once login completes
//! - **Dispatch Errors** - The session client rejected or failed an actually-dispatched call
//!
//! # Error Handling Guide
//!
//! Precondition failures (`MissingConfiguration`, `PermissionDenied`,
//! `NotConnected`) are local to the coordinator: they are logged and leave
//! the coordinator reusable, and are never delivered to the completion
//! handler. Only `CallDispatchFailed` travels inside a
//! [`CallOutcome`](crate::coordinator::events::CallOutcome), forwarded
//! verbatim from the session client.
//!
//! ```rust
//! use outdial_core::CoordinatorError;
//!
//! let err = CoordinatorError::missing_configuration("callee");
//! assert_eq!(err.category(), "configuration");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

use crate::session::ConnectionStatus;

/// Result type alias for outdial-core operations
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Comprehensive error types for call-intent coordination
#[derive(Error, Debug, Clone)]
pub enum CoordinatorError {
    /// Configuration errors
    #[error("Missing required configuration: {field}")]
    MissingConfiguration { field: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Permission errors
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Audio session activation failed: {reason}")]
    AudioActivationFailed { reason: String },

    /// Connectivity errors
    #[error("Session not connected: current status is {status}")]
    NotConnected { status: ConnectionStatus },

    #[error("Session error: {reason}")]
    SessionError { reason: String },

    #[error("Login failed: {reason}")]
    LoginFailed { reason: String },

    /// Call dispatch errors
    #[error("Call dispatch failed: {reason}")]
    CallDispatchFailed { reason: String },

    /// Generic errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoordinatorError {
    /// Create a missing configuration error
    pub fn missing_configuration(field: impl Into<String>) -> Self {
        Self::MissingConfiguration { field: field.into() }
    }

    /// Create a session error
    pub fn session_error(reason: impl Into<String>) -> Self {
        Self::SessionError { reason: reason.into() }
    }

    /// Create a login failed error
    pub fn login_failed(reason: impl Into<String>) -> Self {
        Self::LoginFailed { reason: reason.into() }
    }

    /// Create a call dispatch failed error
    pub fn call_dispatch_failed(reason: impl Into<String>) -> Self {
        Self::CallDispatchFailed { reason: reason.into() }
    }

    /// Create an audio activation failed error
    pub fn audio_activation_failed(reason: impl Into<String>) -> Self {
        Self::AudioActivationFailed { reason: reason.into() }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError { message: message.into() }
    }

    /// Check if this error is recoverable without changing configuration
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Recoverable: another trigger may satisfy the precondition
            CoordinatorError::NotConnected { .. } |
            CoordinatorError::SessionError { .. } |
            CoordinatorError::LoginFailed { .. } |
            CoordinatorError::CallDispatchFailed { .. } |
            CoordinatorError::AudioActivationFailed { .. } => true,

            // Non-recoverable without user/config intervention
            CoordinatorError::MissingConfiguration { .. } |
            CoordinatorError::InvalidConfiguration { .. } |
            CoordinatorError::PermissionDenied => false,

            CoordinatorError::InternalError { .. } => false,
        }
    }

    /// Get error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            CoordinatorError::MissingConfiguration { .. } |
            CoordinatorError::InvalidConfiguration { .. } => "configuration",

            CoordinatorError::PermissionDenied |
            CoordinatorError::AudioActivationFailed { .. } => "permission",

            CoordinatorError::NotConnected { .. } |
            CoordinatorError::SessionError { .. } |
            CoordinatorError::LoginFailed { .. } => "connectivity",

            CoordinatorError::CallDispatchFailed { .. } => "dispatch",

            CoordinatorError::InternalError { .. } => "system",
        }
    }
}
