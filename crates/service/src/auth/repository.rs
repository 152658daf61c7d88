use async_trait::async_trait;
use uuid::Uuid;

use models::role::RoleName;

use super::domain::{AuthUser, Credentials, NewAccount};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Look up by username, or by email when `login` contains `@`.
    async fn find_user_by_login(&self, login: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn login_taken(&self, username: &str, email: &str) -> Result<bool, AuthError>;
    /// Insert the user and its credentials together.
    async fn create_user(&self, account: &NewAccount, credentials: Credentials) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;

    async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError>;
    async fn ensure_roles(&self) -> Result<(), AuthError>;
    async fn count_users_with_role(&self, role: RoleName) -> Result<u64, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use models::validation::normalize_email;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, AuthUser>>,        // key: user_id
        creds: Mutex<HashMap<Uuid, Credentials>>,     // key: user_id
        logins: Mutex<HashMap<Uuid, u32>>,            // key: user_id
    }

    impl MockAuthRepository {
        pub fn login_count(&self, user_id: Uuid) -> u32 {
            self.logins.lock().unwrap().get(&user_id).copied().unwrap_or(0)
        }

        pub fn set_active(&self, user_id: Uuid, active: bool) {
            if let Some(u) = self.users.lock().unwrap().get_mut(&user_id) {
                u.is_active = active;
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_login(&self, login: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            let key = login.trim();
            Ok(if key.contains('@') {
                let email = normalize_email(key);
                users.values().find(|u| u.email == email).cloned()
            } else {
                users.values().find(|u| u.username == key).cloned()
            })
        }

        async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn login_taken(&self, username: &str, email: &str) -> Result<bool, AuthError> {
            let email = normalize_email(email);
            let users = self.users.lock().unwrap();
            Ok(users.values().any(|u| u.username == username.trim() || u.email == email))
        }

        async fn create_user(&self, account: &NewAccount, credentials: Credentials) -> Result<AuthUser, AuthError> {
            if self.login_taken(&account.username, &account.email).await? {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: account.id,
                username: account.username.trim().to_string(),
                email: normalize_email(&account.email),
                full_name: account.full_name.trim().to_string(),
                role: account.role,
                is_active: true,
            };
            self.users.lock().unwrap().insert(user.id, user.clone());
            self.creds.lock().unwrap().insert(user.id, Credentials { user_id: user.id, ..credentials });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }

        async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError> {
            *self.logins.lock().unwrap().entry(user_id).or_insert(0) += 1;
            Ok(())
        }

        async fn ensure_roles(&self) -> Result<(), AuthError> { Ok(()) }

        async fn count_users_with_role(&self, role: RoleName) -> Result<u64, AuthError> {
            Ok(self.users.lock().unwrap().values().filter(|u| u.role == role).count() as u64)
        }
    }
}
