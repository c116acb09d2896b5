pub mod policy;
pub mod session;
pub mod user;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crm_kv::{KVError, KVStore};

use crate::model::{AccessPolicy, Role};

/// Auth service error type. Domain failures carry the offending value;
/// `Storage` and `Internal` wrap the ambient layers.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("email already in use: {0}")]
    EmailInUse(String),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("the seed administrator cannot be deleted")]
    ProtectedAccount,

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<KVError> for AuthError {
    fn from(e: KVError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

/// The one user guaranteed to exist after `init()`, and the one address
/// `delete_user` refuses to remove.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Storage key holding the JSON array of user records.
    pub users_key: String,
    /// Storage key holding the JSON session record.
    pub session_key: String,
    /// Administrator seeded on first run; protected from deletion.
    pub seed_admin: SeedAdmin,
    /// Page the guard navigates to when no session exists.
    pub login_page: String,
    /// Page the guard navigates to when a session lacks access.
    pub home_page: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_key: "crm_users".to_string(),
            session_key: "crm_session".to_string(),
            seed_admin: SeedAdmin {
                email: "albert@pracmatik.com".to_string(),
                password: "admin123".to_string(),
                name: "Albert".to_string(),
            },
            login_page: "login.html".to_string(),
            home_page: "crm.html".to_string(),
        }
    }
}

/// Pluggable credential check. Login compares the stored secret against the
/// supplied one through this seam, so a hashed scheme can replace the exact
/// string match without touching the login contract.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Exact plaintext comparison — the scheme the stored data actually uses.
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

/// The Auth service. Holds the storage backend, configuration, the static
/// access policy and the credential verifier.
pub struct AuthService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) config: AuthConfig,
    pub(crate) policy: AccessPolicy,
    pub(crate) verifier: Box<dyn CredentialVerifier>,
}

impl AuthService {
    /// Create a new AuthService with the default policy table and plaintext
    /// credential check, seeding the user collection if absent.
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Result<Arc<Self>, AuthError> {
        Self::with_parts(kv, config, AccessPolicy::default(), Box::new(PlaintextVerifier))
    }

    /// Create an AuthService with an explicit policy table and verifier.
    pub fn with_parts(
        kv: Arc<dyn KVStore>,
        config: AuthConfig,
        policy: AccessPolicy,
        verifier: Box<dyn CredentialVerifier>,
    ) -> Result<Arc<Self>, AuthError> {
        let svc = Arc::new(Self {
            kv,
            config,
            policy,
            verifier,
        });
        svc.init()?;
        Ok(svc)
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sections the given role may enter, per the policy table.
    pub fn sections_for(&self, role: Role) -> &[crate::model::Section] {
        self.policy.sections_for(role)
    }

    // ── JSON document helpers over the KV seam ──

    /// Read and decode a JSON document. Absent key → None.
    pub(crate) fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, AuthError> {
        match self.kv.get(key)? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| AuthError::Internal(format!("decode '{}': {}", key, e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode and persist a JSON document.
    pub(crate) fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AuthError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| AuthError::Internal(format!("encode '{}': {}", key, e)))?;
        self.kv.set(key, &bytes)?;
        Ok(())
    }
}

/// Get the current time as an RFC 3339 string.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
