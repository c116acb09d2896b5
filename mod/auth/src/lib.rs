//! Auth module — user directory, session lifecycle and role-gated sections.
//!
//! # Resources
//!
//! - **User** — directory record keyed by email, seeded with one admin
//! - **Session** — the single authenticated identity for a profile
//! - **AccessPolicy** — static role → permitted-sections table
//! - **Guard** — page-protection entry point (decision + effects)
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use crm_auth::{AuthService, Guard, service::AuthConfig};
//!
//! let service = AuthService::new(kv, AuthConfig::default())?;
//! let guard = Guard::new(service, effects);
//! if guard.protect(Section::Clientes)? {
//!     // render the page
//! }
//! ```

pub mod guard;
pub mod model;
pub mod service;

pub use guard::{Guard, PageEffects, RecordingEffects};
pub use model::{AccessDecision, AccessPolicy, NewUser, Role, Section, Session, User, UserPatch};
pub use service::{AuthConfig, AuthError, AuthService, CredentialVerifier, PlaintextVerifier};
