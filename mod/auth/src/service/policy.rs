use tracing::debug;

use crate::model::{AccessDecision, Section};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Whether the current session's role may enter `section`. False when no
    /// session exists.
    pub fn has_access(&self, section: Section) -> Result<bool, AuthError> {
        match self.current_user()? {
            Some(session) => Ok(self.policy.allows(session.role, section)),
            None => Ok(false),
        }
    }

    /// The pure authorization decision for a page load: seed the user
    /// collection if needed, then classify the current state. Performing the
    /// resulting navigation or warning is the Guard's job.
    pub fn authorize(&self, section: Section) -> Result<AccessDecision, AuthError> {
        self.init()?;

        let Some(session) = self.current_user()? else {
            debug!("authorize({}): no session", section);
            return Ok(AccessDecision::DenyNoSession);
        };

        if !self.policy.allows(session.role, section) {
            debug!(
                "authorize({}): role {} not permitted",
                section,
                session.role.as_str()
            );
            return Ok(AccessDecision::DenyForbidden);
        }

        Ok(AccessDecision::Allow)
    }
}
