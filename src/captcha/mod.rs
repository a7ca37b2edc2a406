//! Outbound reCAPTCHA verification.

pub mod verifier;

pub use verifier::RecaptchaVerifier;
