//! Status transition engine
//!
//! Enforces the visitor status state machine: which transition is legal
//! from which status, and which actor role may perform it. The actual
//! commit is a per-record compare-and-set in the store, so two racing
//! transitions on the same record serialize and exactly one wins; the
//! loser receives an `InvalidTransition` carrying the status that actually
//! committed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::{VisitorError, VisitorResult};
use crate::store::records::VisitorRecord;
use crate::store::visitor_store::VisitorStore;
use crate::types::{VisitorId, VisitorStatus};

/// Actor roles allowed to drive the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// Approves or rejects pending requests
    Admin,
    /// Checks visitors in and out at the gate
    Security,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Admin => write!(f, "Admin"),
            Actor::Security => write!(f, "Security"),
        }
    }
}

/// The four guarded transitions of the visitor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Pending → Approved (Admin)
    Approve,
    /// Pending → Rejected (Admin)
    Reject,
    /// Approved → CheckedIn (Security)
    CheckIn,
    /// CheckedIn → CheckedOut (Security)
    CheckOut,
}

impl Transition {
    /// The status the record must currently hold
    pub fn from_status(self) -> VisitorStatus {
        match self {
            Transition::Approve | Transition::Reject => VisitorStatus::Pending,
            Transition::CheckIn => VisitorStatus::Approved,
            Transition::CheckOut => VisitorStatus::CheckedIn,
        }
    }

    /// The status the record moves to
    pub fn to_status(self) -> VisitorStatus {
        match self {
            Transition::Approve => VisitorStatus::Approved,
            Transition::Reject => VisitorStatus::Rejected,
            Transition::CheckIn => VisitorStatus::CheckedIn,
            Transition::CheckOut => VisitorStatus::CheckedOut,
        }
    }

    /// The actor role permitted to perform this transition
    pub fn required_actor(self) -> Actor {
        match self {
            Transition::Approve | Transition::Reject => Actor::Admin,
            Transition::CheckIn | Transition::CheckOut => Actor::Security,
        }
    }

    /// Verb form used in error messages and logs
    pub fn label(self) -> &'static str {
        match self {
            Transition::Approve => "approve",
            Transition::Reject => "reject",
            Transition::CheckIn => "check in",
            Transition::CheckOut => "check out",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Applies actor-guarded status transitions against the store
#[derive(Debug)]
pub struct TransitionEngine {
    store: Arc<VisitorStore>,
}

impl TransitionEngine {
    /// Create an engine over the given store
    pub fn new(store: Arc<VisitorStore>) -> Self {
        Self { store }
    }

    /// Apply `transition` to the record `id` on behalf of `actor`
    ///
    /// Fails with `Unauthorized` if the actor role may not perform the
    /// transition, `NotFound` if the record does not exist, and
    /// `InvalidTransition` (reporting the committed status) if the status
    /// guard does not hold — including when a concurrent transition got
    /// there first.
    #[instrument(skip(self), fields(transition = %transition, actor = %actor, visitor = %id))]
    pub async fn apply(
        &self,
        actor: Actor,
        transition: Transition,
        id: VisitorId,
    ) -> VisitorResult<VisitorRecord> {
        if actor != transition.required_actor() {
            return Err(VisitorError::unauthorized(actor.to_string(), transition.label()));
        }

        let result = self
            .store
            .transition_status(id, transition.from_status(), transition.to_status(), transition.label())
            .await;

        if let Err(VisitorError::InvalidTransition { current, .. }) = &result {
            if transition == Transition::CheckIn && *current == VisitorStatus::Pending {
                // Surfaced to the gate as "awaiting admin approval"
                warn!(visitor = %id, "check-in refused: visitor is awaiting admin approval");
            }
        }

        result
    }

    /// Approve a pending request
    pub async fn approve(&self, actor: Actor, id: VisitorId) -> VisitorResult<VisitorRecord> {
        self.apply(actor, Transition::Approve, id).await
    }

    /// Reject a pending request
    pub async fn reject(&self, actor: Actor, id: VisitorId) -> VisitorResult<VisitorRecord> {
        self.apply(actor, Transition::Reject, id).await
    }

    /// Check an approved visitor in
    pub async fn check_in(&self, actor: Actor, id: VisitorId) -> VisitorResult<VisitorRecord> {
        self.apply(actor, Transition::CheckIn, id).await
    }

    /// Check a visitor out
    pub async fn check_out(&self, actor: Actor, id: VisitorId) -> VisitorResult<VisitorRecord> {
        self.apply(actor, Transition::CheckOut, id).await
    }
}
