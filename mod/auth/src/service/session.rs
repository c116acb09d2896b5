use tracing::debug;

use crate::model::Session;
use crate::service::{AuthError, AuthService, now_rfc3339};

impl AuthService {
    /// Verify credentials and persist the resulting session as the sole
    /// active one. On failure the error never says which field was wrong.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = self
            .all_users()?
            .into_iter()
            .find(|u| u.email == email && self.verifier.verify(&u.password, password));

        let Some(user) = user else {
            debug!("login rejected for {}", email);
            return Err(AuthError::InvalidCredentials);
        };

        let session = Session {
            email: user.email,
            name: user.name,
            role: user.role,
            login_at: now_rfc3339(),
        };
        self.write_json(&self.config.session_key, &session)?;
        Ok(session)
    }

    /// Drop the persisted session. Navigation back to the login page is the
    /// Guard's responsibility.
    pub fn end_session(&self) -> Result<(), AuthError> {
        self.kv.delete(&self.config.session_key)?;
        Ok(())
    }

    /// The persisted session, if any. Absence is not an error.
    pub fn current_user(&self) -> Result<Option<Session>, AuthError> {
        self.read_json(&self.config.session_key)
    }

    /// True iff a session exists and its role is admin.
    pub fn is_admin(&self) -> Result<bool, AuthError> {
        Ok(self.current_user()?.is_some_and(|s| s.is_admin()))
    }
}
