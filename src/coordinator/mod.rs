//! Call-intent coordination
//!
//! This module owns the [`CallIntentCoordinator`], the single component that
//! reconciles the three asynchronous preconditions of an outbound call.
//!
//! # Architecture Overview
//!
//! - **`manager`** - The coordinator state machine and event processing
//! - **`config`** - Configuration surface (auth token, callee)
//! - **`events`** - Event types and the completion handler trait
//! - **`builder`** - Explicit construction with injected collaborators
//!
//! # Basic Flow
//!
//! ```rust,no_run
//! # use outdial_core::{CoordinatorBuilder, SessionClient, PermissionProvider};
//! # use std::sync::Arc;
//! # async fn example(
//! #     session: Arc<dyn SessionClient>,
//! #     permissions: Arc<dyn PermissionProvider>,
//! # ) {
//! // 1. Build a coordinator with injected collaborators
//! let coordinator = CoordinatorBuilder::new()
//!     .auth_token("JWT")
//!     .callee("+14155550123")
//!     .attach(session, permissions);
//!
//! // 2. Wire the UI press and the session client's status notifications
//! coordinator.on_user_action().await;
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod events;
pub mod manager;


pub use builder::CoordinatorBuilder;
pub use config::CoordinatorConfig;
pub use manager::{CallIntentCoordinator, CoordinatorStats, IntentPhase};
