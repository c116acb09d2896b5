use std::sync::Arc;

use crate::model::{AccessDecision, Section};
use crate::service::{AuthError, AuthService};

/// Warning shown when a logged-in user opens a section outside their role.
pub const ACCESS_DENIED_MESSAGE: &str = "⚠️ No tienes acceso a esta sección";

/// The browser-facing side effects the guard needs: a redirect and a modal
/// alert. Page hosts implement this against the real environment; tests use
/// [`RecordingEffects`].
pub trait PageEffects: Send + Sync {
    /// Navigate to the named page, abandoning the current one.
    fn navigate(&self, page: &str);

    /// Show a blocking, user-visible warning.
    fn alert(&self, message: &str);
}

/// Page-protection entry point. Combines the service's pure authorization
/// decision with the navigation/alert effects.
pub struct Guard {
    service: Arc<AuthService>,
    effects: Arc<dyn PageEffects>,
}

impl Guard {
    pub fn new(service: Arc<AuthService>, effects: Arc<dyn PageEffects>) -> Self {
        Self { service, effects }
    }

    /// The underlying service, for page scripts that also need user CRUD.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }

    /// Run at page load. Returns true when rendering may proceed. On denial
    /// the appropriate effects fire first: straight to the login page when no
    /// session exists, or a warning plus a redirect home when the session's
    /// role lacks the section.
    pub fn protect(&self, section: Section) -> Result<bool, AuthError> {
        match self.service.authorize(section)? {
            AccessDecision::Allow => Ok(true),
            AccessDecision::DenyNoSession => {
                self.effects.navigate(&self.service.config().login_page);
                Ok(false)
            }
            AccessDecision::DenyForbidden => {
                self.effects.alert(ACCESS_DENIED_MESSAGE);
                self.effects.navigate(&self.service.config().home_page);
                Ok(false)
            }
        }
    }

    /// Clear the session and send the user to the login page.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.service.end_session()?;
        self.effects.navigate(&self.service.config().login_page);
        Ok(())
    }
}

/// A PageEffects implementation that records what fired instead of touching a
/// browser. Useful in tests and headless hosts.
#[derive(Default)]
pub struct RecordingEffects {
    navigations: std::sync::Mutex<Vec<String>>,
    alerts: std::sync::Mutex<Vec<String>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    /// Alert messages shown, in order.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl PageEffects for RecordingEffects {
    fn navigate(&self, page: &str) {
        self.navigations.lock().unwrap().push(page.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crm_kv::MemoryStore;

    use super::*;
    use crate::model::{NewUser, Role};
    use crate::service::AuthConfig;

    fn test_guard() -> (Guard, Arc<RecordingEffects>) {
        let svc = AuthService::new(Arc::new(MemoryStore::new()), AuthConfig::default()).unwrap();
        let effects = Arc::new(RecordingEffects::new());
        (Guard::new(svc, effects.clone()), effects)
    }

    #[test]
    fn test_protect_without_session_redirects_to_login() {
        let (guard, effects) = test_guard();

        assert!(!guard.protect(Section::Crm).unwrap());
        assert_eq!(effects.navigations(), vec!["login.html"]);
        assert!(effects.alerts().is_empty());
    }

    #[test]
    fn test_protect_allows_permitted_section() {
        let (guard, effects) = test_guard();
        guard.service().login("albert@pracmatik.com", "admin123").unwrap();

        assert!(guard.protect(Section::Usuarios).unwrap());
        assert!(effects.navigations().is_empty());
        assert!(effects.alerts().is_empty());
    }

    #[test]
    fn test_protect_forbidden_warns_then_goes_home() {
        let (guard, effects) = test_guard();
        guard
            .service()
            .add_user(NewUser {
                email: "maria@pracmatik.com".to_string(),
                password: "clave".to_string(),
                role: Role::Usuario,
                name: "Maria".to_string(),
            })
            .unwrap();
        guard.service().login("maria@pracmatik.com", "clave").unwrap();

        assert!(!guard.protect(Section::Usuarios).unwrap());
        assert_eq!(effects.alerts(), vec![ACCESS_DENIED_MESSAGE]);
        assert_eq!(effects.navigations(), vec!["crm.html"]);
    }

    #[test]
    fn test_fresh_store_full_lifecycle() {
        // Fresh storage: construction seeds exactly one admin.
        let (guard, effects) = test_guard();
        let svc = guard.service();

        let users = svc.all_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "albert@pracmatik.com");

        svc.login("albert@pracmatik.com", "admin123").unwrap();
        assert!(svc.is_admin().unwrap());
        assert!(guard.protect(Section::Usuarios).unwrap());

        guard.logout().unwrap();
        assert!(!guard.protect(Section::Usuarios).unwrap());
        assert_eq!(effects.navigations(), vec!["login.html", "login.html"]);
    }

    #[test]
    fn test_logout_clears_session_and_redirects() {
        let (guard, effects) = test_guard();
        guard.service().login("albert@pracmatik.com", "admin123").unwrap();

        guard.logout().unwrap();
        assert!(guard.service().current_user().unwrap().is_none());
        assert_eq!(effects.navigations(), vec!["login.html"]);
    }
}
