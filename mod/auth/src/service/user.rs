use tracing::info;

use crate::model::{NewUser, Role, User, UserPatch};
use crate::service::{AuthError, AuthService, now_rfc3339};

impl AuthService {
    /// Seed the user collection with the configured administrator iff no
    /// collection exists yet. Idempotent: an existing collection — even an
    /// empty array — is never overwritten.
    pub fn init(&self) -> Result<(), AuthError> {
        if self.kv.get(&self.config.users_key)?.is_some() {
            return Ok(());
        }

        let admin = User {
            email: self.config.seed_admin.email.clone(),
            password: self.config.seed_admin.password.clone(),
            role: Role::Admin,
            name: self.config.seed_admin.name.clone(),
            created_at: now_rfc3339(),
        };
        self.write_json(&self.config.users_key, &vec![admin])?;
        info!("seeded user collection with administrator {}", self.config.seed_admin.email);
        Ok(())
    }

    /// The stored collection in append order. An absent key reads as empty.
    pub fn all_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self
            .read_json::<Vec<User>>(&self.config.users_key)?
            .unwrap_or_default())
    }

    /// Look up a user by exact email.
    pub fn find_user(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.all_users()?.into_iter().find(|u| u.email == email))
    }

    /// Append a new user. Fails with `DuplicateEmail` when the email is
    /// already taken (exact, case-sensitive match); the collection is left
    /// untouched in that case.
    pub fn add_user(&self, input: NewUser) -> Result<User, AuthError> {
        let mut users = self.all_users()?;

        if users.iter().any(|u| u.email == input.email) {
            return Err(AuthError::DuplicateEmail(input.email));
        }

        let user = User {
            email: input.email,
            password: input.password,
            role: input.role,
            name: input.name,
            created_at: now_rfc3339(),
        };
        users.push(user.clone());
        self.write_json(&self.config.users_key, &users)?;
        Ok(user)
    }

    /// Apply a partial update to the user keyed by `email`. Fields absent
    /// from the patch keep their stored value. Changing the email to one that
    /// already belongs to another record fails with `EmailInUse`.
    pub fn update_user(&self, email: &str, patch: UserPatch) -> Result<User, AuthError> {
        let mut users = self.all_users()?;

        let index = users
            .iter()
            .position(|u| u.email == email)
            .ok_or_else(|| AuthError::NotFound(email.to_string()))?;

        if let Some(ref new_email) = patch.email {
            if new_email != email && users.iter().any(|u| u.email == *new_email) {
                return Err(AuthError::EmailInUse(new_email.clone()));
            }
        }

        let user = &mut users[index];
        if let Some(new_email) = patch.email {
            user.email = new_email;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }

        let updated = user.clone();
        self.write_json(&self.config.users_key, &users)?;
        Ok(updated)
    }

    /// Remove every record matching `email`. The seed administrator is
    /// refused outright; deleting an unknown email succeeds without change.
    pub fn delete_user(&self, email: &str) -> Result<(), AuthError> {
        if email == self.config.seed_admin.email {
            return Err(AuthError::ProtectedAccount);
        }

        let users: Vec<User> = self
            .all_users()?
            .into_iter()
            .filter(|u| u.email != email)
            .collect();
        self.write_json(&self.config.users_key, &users)?;
        Ok(())
    }
}
