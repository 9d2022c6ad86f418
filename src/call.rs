//! Call types and destination classification
//!
//! This module provides call identifiers, the handle returned by a dispatched
//! call, and the routing-mode classifier that decides whether a destination
//! is dialed through the server bridge (phone numbers) or peer-to-peer
//! (in-app identifiers).

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a call
pub type CallId = Uuid;

/// How a dispatched call is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutingMode {
    /// PSTN-style delivery through the server bridge (phone numbers)
    ServerBridge,
    /// Peer-to-peer delivery to another application user
    InApp,
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingMode::ServerBridge => write!(f, "server-bridge"),
            RoutingMode::InApp => write!(f, "in-app"),
        }
    }
}

/// Handle to a dispatched call, returned by the session client
///
/// The handle is opaque to the coordinator; it is forwarded to the embedding
/// application inside the completion outcome.
#[derive(Debug, Clone)]
pub struct CallHandle {
    /// Unique call identifier assigned at dispatch
    pub call_id: CallId,
    /// Destination that was dialed
    pub destination: String,
    /// Routing mode the call was dispatched with
    pub routing: RoutingMode,
    /// When the call was dispatched
    pub created_at: DateTime<Utc>,
}

impl CallHandle {
    /// Create a handle for a freshly dispatched call
    pub fn new(destination: impl Into<String>, routing: RoutingMode) -> Self {
        Self {
            call_id: CallId::new_v4(),
            destination: destination.into(),
            routing,
            created_at: Utc::now(),
        }
    }
}

/// Record of one dispatched call attempt
#[derive(Debug, Clone)]
pub struct CallAttemptRecord {
    /// Call identifier assigned to this attempt
    pub call_id: CallId,
    /// Destination that was dialed
    pub destination: String,
    /// Routing mode chosen by classification
    pub routing: RoutingMode,
    /// When the dispatch started
    pub started_at: DateTime<Utc>,
    /// When the completion fired (if it has)
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the session client reported success
    pub succeeded: Option<bool>,
}

// Candidate telephone-number spans: optional +, then digits with common
// separators, ending on a digit. Digit-count bounds are enforced separately
// so the scan stays permissive enough to find partial matches.
static PHONE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?[0-9(][0-9().\- ]*[0-9]").unwrap());

/// Classify a destination string into a routing mode
///
/// A destination routes via the server bridge only when the telephone-number
/// scanner finds exactly one candidate that spans the entire string starting
/// at offset 0 and carries a plausible digit count. A partial match, no
/// match, or multiple candidates all classify as an in-app identifier.
///
/// ```rust
/// use outdial_core::call::{classify_destination, RoutingMode};
///
/// assert_eq!(classify_destination("+14155550123"), RoutingMode::ServerBridge);
/// assert_eq!(classify_destination("alice_inapp"), RoutingMode::InApp);
/// assert_eq!(classify_destination("call +1415 now"), RoutingMode::InApp);
/// ```
pub fn classify_destination(destination: &str) -> RoutingMode {
    if is_phone_number(destination) {
        RoutingMode::ServerBridge
    } else {
        RoutingMode::InApp
    }
}

/// Check whether the whole destination is a single telephone number
pub fn is_phone_number(destination: &str) -> bool {
    let mut matches = PHONE_CANDIDATE.find_iter(destination);
    let first = match matches.next() {
        Some(m) => m,
        None => return false,
    };
    if matches.next().is_some() {
        return false;
    }
    if first.start() != 0 || first.end() != destination.len() {
        return false;
    }
    let digits = first.as_str().chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_phone_number_routes_via_server_bridge() {
        assert_eq!(classify_destination("+14155550123"), RoutingMode::ServerBridge);
        assert_eq!(classify_destination("14155550123"), RoutingMode::ServerBridge);
        assert_eq!(classify_destination("(415) 555-0123"), RoutingMode::ServerBridge);
        assert_eq!(classify_destination("+44 20 7946 0958"), RoutingMode::ServerBridge);
    }

    #[test]
    fn in_app_identifiers_route_peer_to_peer() {
        assert_eq!(classify_destination("alice_inapp"), RoutingMode::InApp);
        assert_eq!(classify_destination("bob"), RoutingMode::InApp);
        assert_eq!(classify_destination(""), RoutingMode::InApp);
    }

    #[test]
    fn partial_match_is_not_a_phone_number() {
        // The scanner finds "+1415" but it does not span the whole string
        assert_eq!(classify_destination("call +1415 now"), RoutingMode::InApp);
        assert_eq!(classify_destination("+14155550123 ext 2"), RoutingMode::InApp);
        assert_eq!(classify_destination("tel:+14155550123"), RoutingMode::InApp);
    }

    #[test]
    fn multiple_candidates_are_not_a_phone_number() {
        assert_eq!(
            classify_destination("+14155550123 or +14155550124"),
            RoutingMode::InApp
        );
    }

    #[test]
    fn implausible_digit_counts_are_rejected() {
        // Too few digits to be a dialable number
        assert_eq!(classify_destination("+1415"), RoutingMode::InApp);
        // Too many digits for an international number
        assert_eq!(classify_destination("12345678901234567890"), RoutingMode::InApp);
    }

    #[test]
    fn call_handle_carries_dispatch_metadata() {
        let handle = CallHandle::new("+14155550123", RoutingMode::ServerBridge);
        assert_eq!(handle.destination, "+14155550123");
        assert_eq!(handle.routing, RoutingMode::ServerBridge);
    }
}
