//! Notification collaborator boundary
//!
//! Delivery of OTP codes is an external concern (email/SMS gateway in a
//! real deployment). The workflow only depends on the [`Notifier`] trait;
//! the shipped implementation logs the send through `tracing` and stands in
//! until a real delivery channel is wired up.

use tracing::info;

/// Outbound notification channel for OTP delivery
///
/// Best-effort, fire-and-forget: failures are the collaborator's problem to
/// retry or drop, never the registration workflow's.
pub trait Notifier: Send + Sync {
    /// Deliver an OTP code to the visitor out-of-band
    fn send_otp(&self, email: &str, code: &str);
}

/// Stub notifier that records the send in the log stream
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send_otp(&self, email: &str, code: &str) {
        // The code is logged here only because delivery is stubbed; a real
        // channel must never write secrets to the log
        info!(email, code, "OTP dispatched (stub delivery)");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Notifier;
    use std::sync::Mutex;

    /// Test notifier capturing every send for assertions
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn send_otp(&self, email: &str, code: &str) {
            self.sent.lock().expect("notifier mutex").push((email.to_string(), code.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingNotifier;
    use super::*;

    #[test]
    fn test_recording_notifier_captures_sends() {
        let notifier = RecordingNotifier::default();
        notifier.send_otp("jane@x.com", "123456");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], ("jane@x.com".to_string(), "123456".to_string()));
    }
}
