//! Authentication boundary.
//!
//! Analytics never talk to this module; services receive an already verified
//! [`credentials::UserIdentity`] from whoever owns the verifier.

pub mod credentials;
