//! Registration workflow orchestration
//!
//! Sequences the pre-registration pipeline: form submission creates a
//! pending record with its pass code, an out-of-band OTP confirms the
//! visitor's identity, and successful verification surfaces the pass
//! artifact. Identity verification and admin approval are independent
//! gates — a verified visitor's record remains `Pending` until an admin
//! acts on it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::error::{VisitorError, VisitorResult};
use crate::notify::Notifier;
use crate::registration::form::RegistrationForm;
use crate::store::records::VisitorRecord;
use crate::store::visitor_store::VisitorStore;
use crate::registration::otp::OtpChallengeStore;
use crate::types::{PassCode, SystemConfig, VisitorId};

/// Verification state of one registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    /// OTP issued, awaiting the visitor's code
    AwaitingOtp,
    /// Identity confirmed; the pass artifact has been surfaced
    Verified,
}

/// Transient state of one in-progress registration attempt
///
/// Keyed by email, discarded once the OTP is verified or the TTL elapses.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct RegistrationSession {
    /// Email the OTP challenge is keyed by
    pub email: String,
    /// The record created by this attempt
    pub visitor_id: VisitorId,
    /// The pass code to surface once identity is confirmed
    pub pass_code: PassCode,
    /// Current verification state
    pub state: VerificationState,
    /// When the session was opened
    pub opened_at: DateTime<Utc>,
}

impl RegistrationSession {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now > self.opened_at + ttl
    }
}

/// The pass artifact surfaced to the visitor after verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedPass {
    /// The verified record's id
    pub visitor_id: VisitorId,
    /// The QR-encodable token to present at check-in
    pub pass_code: PassCode,
}

/// Orchestrates submission, OTP challenge, and pass issuance
pub struct RegistrationWorkflow {
    store: Arc<VisitorStore>,
    otp: OtpChallengeStore,
    notifier: Arc<dyn Notifier>,
    sessions: Mutex<HashMap<String, RegistrationSession>>,
    session_ttl: Duration,
}

impl std::fmt::Debug for RegistrationWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationWorkflow")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl RegistrationWorkflow {
    /// Create a workflow over the given store and notification channel
    pub fn new(store: Arc<VisitorStore>, config: &SystemConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            otp: OtpChallengeStore::new(
                Duration::seconds(config.otp_ttl_secs),
                config.otp_max_attempts,
            ),
            notifier,
            sessions: Mutex::new(HashMap::new()),
            session_ttl: Duration::seconds(config.session_ttl_secs),
        }
    }

    /// Submit a registration form
    ///
    /// Validates every required field, publishes a new `Pending` record
    /// with an allocated pass code, opens the registration session, and
    /// dispatches the OTP. Each submission creates a fresh record, even
    /// for an email that already has one; a resubmission before
    /// verification supersedes the previous session and challenge
    /// (latest-wins).
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn submit(&self, form: RegistrationForm) -> VisitorResult<VisitorRecord> {
        let details = form.validate()?;
        let email = details.email.clone();

        let record = self.store.create_visitor(details).await?;

        let code = self.otp.reissue(&email).await;
        let session = RegistrationSession {
            email: email.clone(),
            visitor_id: record.id,
            pass_code: record.pass_code,
            state: VerificationState::AwaitingOtp,
            opened_at: Utc::now(),
        };
        self.sessions.lock().await.insert(email.clone(), session);

        self.notifier.send_otp(&email, &code);
        info!(visitor = %record.id, "registration submitted, OTP dispatched");
        Ok(record)
    }

    /// Re-send the OTP for an open session
    ///
    /// Idempotent per session: while the challenge is live the same code is
    /// delivered again rather than a new one being minted.
    pub async fn request_otp(&self, email: &str) -> VisitorResult<()> {
        self.expire_sessions(Utc::now()).await;

        let sessions = self.sessions.lock().await;
        if !sessions.contains_key(email) {
            return Err(VisitorError::OtpNotFound(email.to_string()));
        }
        drop(sessions);

        let code = self.otp.issue(email).await;
        self.notifier.send_otp(email, &code);
        Ok(())
    }

    /// Verify the visitor's OTP and finalize the session
    ///
    /// On success the session is consumed and the pass artifact returned.
    /// The visitor record deliberately stays `Pending`: the OTP confirms
    /// identity, admin approval is a separate gate.
    #[instrument(skip(self, code))]
    pub async fn verify_otp(&self, email: &str, code: &str) -> VisitorResult<IssuedPass> {
        self.expire_sessions(Utc::now()).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(email)
            .ok_or_else(|| VisitorError::OtpNotFound(email.to_string()))?;
        let visitor_id = session.visitor_id;
        let pass_code = session.pass_code;
        drop(sessions);

        match self.otp.verify(email, code).await {
            Ok(()) => {
                let mut sessions = self.sessions.lock().await;
                if let Some(session) = sessions.get_mut(email) {
                    session.state = VerificationState::Verified;
                }
                sessions.remove(email);
                info!(visitor = %visitor_id, "identity verified, pass issued");
                Ok(IssuedPass { visitor_id, pass_code })
            }
            Err(err) => {
                // An exhausted or expired challenge ends the attempt; a
                // plain mismatch leaves the session open for a retry
                if matches!(
                    err,
                    VisitorError::ExpiredOtp
                        | VisitorError::InvalidOtp { attempts_remaining: 0 }
                        | VisitorError::OtpNotFound(_)
                ) {
                    self.sessions.lock().await.remove(email);
                }
                Err(err)
            }
        }
    }

    /// Current verification state of the session for `email`, if one is
    /// open
    pub async fn session_state(&self, email: &str) -> Option<VerificationState> {
        self.sessions.lock().await.get(email).map(|s| s.state)
    }

    /// Drop sessions past their TTL, and their challenges with them
    async fn expire_sessions(&self, now: DateTime<Utc>) {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, s| !s.is_expired(now, self.session_ttl));
        drop(sessions);
        self.otp.purge_expired(now).await;
    }
}
