//! OTP challenge management
//!
//! One-time passwords confirm the visitor's identity during registration,
//! independently of admin approval. Each challenge is a per-session random
//! six-digit code with a bounded validity window, single-use semantics, and
//! a cap on failed attempts before the challenge is invalidated.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{VisitorError, VisitorResult};

/// A single outstanding OTP challenge
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    /// The six-digit secret
    code: String,
    /// When the challenge stops being accepted
    expires_at: DateTime<Utc>,
    /// Failed attempts left before invalidation
    attempts_remaining: u32,
}

impl OtpChallenge {
    /// Check whether the challenge has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Store of outstanding OTP challenges, keyed by email
#[derive(Debug)]
pub struct OtpChallengeStore {
    challenges: Mutex<HashMap<String, OtpChallenge>>,
    ttl: Duration,
    max_attempts: u32,
}

impl OtpChallengeStore {
    /// Create a challenge store with the given validity window and attempt
    /// cap
    pub fn new(ttl: Duration, max_attempts: u32) -> Self {
        Self { challenges: Mutex::new(HashMap::new()), ttl, max_attempts }
    }

    fn generate_code() -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }

    /// Issue a challenge for `email`, returning the code to deliver
    ///
    /// Idempotent for a live session: if an unexpired challenge already
    /// exists, its code is returned unchanged so a re-requested send
    /// delivers the same secret. An expired challenge is replaced.
    pub async fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now()).await
    }

    /// Clock-explicit variant of [`issue`](Self::issue)
    pub async fn issue_at(&self, email: &str, now: DateTime<Utc>) -> String {
        let mut challenges = self.challenges.lock().await;

        if let Some(existing) = challenges.get(email) {
            if !existing.is_expired(now) {
                debug!(email, "re-issuing existing live OTP challenge");
                return existing.code.clone();
            }
        }

        let challenge = OtpChallenge {
            code: Self::generate_code(),
            expires_at: now + self.ttl,
            attempts_remaining: self.max_attempts,
        };
        let code = challenge.code.clone();
        challenges.insert(email.to_string(), challenge);
        debug!(email, "issued new OTP challenge");
        code
    }

    /// Replace any outstanding challenge for `email` with a fresh one
    ///
    /// Used when a visitor resubmits the registration form: the previous
    /// pending challenge is superseded (latest-wins) so at most one live
    /// code exists per email.
    pub async fn reissue(&self, email: &str) -> String {
        let mut challenges = self.challenges.lock().await;
        let challenge = OtpChallenge {
            code: Self::generate_code(),
            expires_at: Utc::now() + self.ttl,
            attempts_remaining: self.max_attempts,
        };
        let code = challenge.code.clone();
        challenges.insert(email.to_string(), challenge);
        code
    }

    /// Verify `code` against the outstanding challenge for `email`
    ///
    /// A matching, unexpired code succeeds exactly once; the challenge is
    /// consumed on success. A mismatch burns one attempt and invalidates
    /// the challenge when none remain. Expired challenges are removed and
    /// reported as such.
    pub async fn verify(&self, email: &str, code: &str) -> VisitorResult<()> {
        self.verify_at(email, code, Utc::now()).await
    }

    /// Clock-explicit variant of [`verify`](Self::verify)
    pub async fn verify_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> VisitorResult<()> {
        let mut challenges = self.challenges.lock().await;

        let challenge = challenges
            .get_mut(email)
            .ok_or_else(|| VisitorError::OtpNotFound(email.to_string()))?;

        if challenge.is_expired(now) {
            challenges.remove(email);
            return Err(VisitorError::ExpiredOtp);
        }

        if challenge.code != code {
            challenge.attempts_remaining = challenge.attempts_remaining.saturating_sub(1);
            let remaining = challenge.attempts_remaining;
            if remaining == 0 {
                warn!(email, "OTP challenge invalidated after too many failed attempts");
                challenges.remove(email);
            }
            return Err(VisitorError::InvalidOtp { attempts_remaining: remaining });
        }

        // Single-use: consumed on success
        challenges.remove(email);
        Ok(())
    }

    /// Drop every challenge that has expired by `now`
    pub async fn purge_expired(&self, now: DateTime<Utc>) {
        let mut challenges = self.challenges.lock().await;
        challenges.retain(|_, c| !c.is_expired(now));
    }

    /// Number of outstanding challenges
    pub async fn outstanding(&self) -> usize {
        self.challenges.lock().await.len()
    }
}
