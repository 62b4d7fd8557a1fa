//! Visitor pre-registration: form validation, OTP challenges, and the
//! workflow that stitches them together into an issued visitor pass.

pub mod form;
pub mod otp;
pub mod workflow;

pub use form::RegistrationForm;
pub use otp::{OtpChallenge, OtpChallengeStore};
pub use workflow::{IssuedPass, RegistrationSession, RegistrationWorkflow, VerificationState};
