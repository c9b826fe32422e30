//! Credential verification capability and its demo implementation.
//!
//! # Invariants
//! - A returned [`UserIdentity`] never contains the password.
//! - Passwords and comment text are never logged.

use crate::model::feedback::AuthorIdentity;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Account role; only admins may open the analytics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Student,
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Student => ROLE_STUDENT,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            ROLE_ADMIN => Some(Self::Admin),
            ROLE_STUDENT => Some(Self::Student),
            _ => None,
        }
    }
}

/// Authenticated user as seen by the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Identity stamped on non-anonymous feedback.
    pub fn as_author(&self) -> AuthorIdentity {
        AuthorIdentity {
            user_id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password left blank.
    MissingCredentials,
    /// No account matches the email/password pair.
    InvalidCredentials,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "Please provide both email and password"),
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
        }
    }
}

impl Error for AuthError {}

/// Opaque credential check injected wherever a login is needed.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError>;
}

/// One demo account.
#[derive(Debug, Clone)]
pub struct MockAccount {
    identity: UserIdentity,
    password: String,
}

impl MockAccount {
    pub fn new(identity: UserIdentity, password: impl Into<String>) -> Self {
        Self {
            identity,
            password: password.into(),
        }
    }
}

/// In-memory verifier over a fixed account list with optional simulated
/// round-trip latency.
#[derive(Debug, Clone)]
pub struct MockCredentialVerifier {
    accounts: Vec<MockAccount>,
    latency: Duration,
}

impl MockCredentialVerifier {
    pub fn new(accounts: Vec<MockAccount>) -> Self {
        Self {
            accounts,
            latency: Duration::ZERO,
        }
    }

    /// Verifier seeded with the campus admin and student demo accounts.
    pub fn with_demo_accounts() -> Self {
        Self::new(vec![
            MockAccount::new(
                UserIdentity {
                    id: 1,
                    name: "Admin User".to_string(),
                    email: "admin@university.edu".to_string(),
                    role: Role::Admin,
                },
                "admin123",
            ),
            MockAccount::new(
                UserIdentity {
                    id: 2,
                    name: "Student User".to_string(),
                    email: "student@university.edu".to_string(),
                    role: Role::Student,
                },
                "student123",
            ),
        ])
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl CredentialVerifier for MockCredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        if email.is_empty() || password.is_empty() {
            warn!("event=auth_verify module=auth status=error error_code=missing_credentials");
            return Err(AuthError::MissingCredentials);
        }

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        match self
            .accounts
            .iter()
            .find(|account| account.identity.email == email && account.password == password)
        {
            Some(account) => {
                info!(
                    "event=auth_verify module=auth status=ok user_id={} role={}",
                    account.identity.id,
                    account.identity.role.as_str()
                );
                Ok(account.identity.clone())
            }
            None => {
                warn!(
                    "event=auth_verify module=auth status=error error_code=invalid_credentials"
                );
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
