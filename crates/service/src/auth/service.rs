use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use models::role::RoleName;
use models::status::OtpPurpose;
use models::user;
use models::validation::{normalize_email, validate_email};

use super::domain::{
    AuthSession, AuthUser, ChangePasswordInput, Credentials, ForgotPasswordInput, LoginInput, NewAccount, RegisterInput,
    ResetPasswordInput,
};
use super::errors::AuthError;
use super::password::{hash_password, validate_new_password, verify_password, PASSWORD_ALGORITHM};
use super::repository::AuthRepository;
use super::token::{decode_token, issue_token, Claims};
use crate::otp::OtpService;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthSettings {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    otp: Arc<OtpService>,
    cfg: AuthSettings,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, otp: Arc<OtpService>, cfg: AuthSettings) -> Self { Self { repo, otp, cfg } }

    /// Create an account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{service::{AuthService, AuthSettings}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use service::mailer::LogMailer;
    /// use service::otp::{OtpPolicy, OtpService};
    /// use service::repo::memory::InMemoryRepository;
    /// use models::role::RoleName;
    ///
    /// let otp = Arc::new(OtpService::new(Arc::new(InMemoryRepository::default()), Arc::new(LogMailer), OtpPolicy::default()));
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::default()),
    ///     otp,
    ///     AuthSettings { jwt_secret: "0123456789abcdef".into(), token_ttl_hours: 12 },
    /// );
    /// let input = RegisterInput {
    ///     username: "officer1".into(),
    ///     email: "Officer1@Police.gov.pk".into(),
    ///     full_name: "Officer One".into(),
    ///     password: "Secret123".into(),
    ///     role: RoleName::Officer,
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "officer1@police.gov.pk");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username, role = ?input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        user::validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_new_password(&input.password)?;
        if input.full_name.trim().is_empty() {
            return Err(AuthError::Validation("full_name is required".into()));
        }
        if self.repo.login_taken(&input.username, &input.email).await? {
            debug!("username or email already registered");
            return Err(AuthError::Conflict);
        }

        let account = NewAccount {
            id: Uuid::new_v4(),
            username: input.username,
            email: input.email,
            full_name: input.full_name,
            role: input.role,
        };
        let credentials = Credentials {
            user_id: account.id,
            password_hash: hash_password(&input.password)?,
            password_algorithm: PASSWORD_ALGORITHM.to_string(),
        };
        let user = self.repo.create_user(&account, credentials).await?;
        info!(user_id = %user.id, username = %user.username, role = ?user.role, "user_registered");
        Ok(user)
    }

    /// Authenticate by username or email and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{service::{AuthService, AuthSettings}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::mailer::LogMailer;
    /// use service::otp::{OtpPolicy, OtpService};
    /// use service::repo::memory::InMemoryRepository;
    /// use models::role::RoleName;
    ///
    /// let otp = Arc::new(OtpService::new(Arc::new(InMemoryRepository::default()), Arc::new(LogMailer), OtpPolicy::default()));
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::default()),
    ///     otp,
    ///     AuthSettings { jwt_secret: "0123456789abcdef".into(), token_ttl_hours: 12 },
    /// );
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     username: "judge1".into(),
    ///     email: "judge1@courts.gov.pk".into(),
    ///     full_name: "Judge One".into(),
    ///     password: "Passw0rd".into(),
    ///     role: RoleName::Judge,
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { login: "judge1".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.role, RoleName::Judge);
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_login(&input.login)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_password(&input.password, &cred.password_hash)? {
            warn!(user_id = %user.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }
        if !user.is_active {
            return Err(AuthError::Disabled);
        }

        let (token, expires_at) = issue_token(&user, &self.cfg.jwt_secret, self.cfg.token_ttl_hours)?;
        self.repo.record_login(user.id).await?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token, expires_at })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.find_user(user_id).await?.ok_or(AuthError::NotFound)
    }

    /// Validate a bearer token and make sure its account is still active.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode_token(token, &self.cfg.jwt_secret)?;
        let user = self.repo.find_user(claims.user_id()?).await?.ok_or(AuthError::Unauthorized)?;
        if !user.is_active {
            return Err(AuthError::Disabled);
        }
        Ok(claims)
    }

    #[instrument(skip(self, input))]
    pub async fn change_password(&self, user_id: Uuid, input: ChangePasswordInput) -> Result<(), AuthError> {
        let cred = self.repo.get_credentials(user_id).await?.ok_or(AuthError::NotFound)?;
        if !verify_password(&input.current_password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }
        validate_new_password(&input.new_password)?;
        if input.new_password == input.current_password {
            return Err(AuthError::Validation("new password must differ from the current one".into()));
        }
        self.repo.upsert_password(user_id, hash_password(&input.new_password)?, PASSWORD_ALGORITHM.into()).await?;
        info!(user_id = %user_id, "password_changed");
        Ok(())
    }

    /// Mail a reset code. Unknown addresses succeed silently.
    #[instrument(skip(self, input))]
    pub async fn forgot_password(&self, input: ForgotPasswordInput) -> Result<(), AuthError> {
        validate_email(&input.email)?;
        let email = normalize_email(&input.email);
        match self.repo.find_user_by_login(&email).await? {
            Some(u) if u.is_active => {
                self.otp.issue(&email, None, OtpPurpose::PasswordReset).await?;
            }
            _ => debug!("password reset requested for unknown or disabled account"),
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn reset_password(&self, input: ResetPasswordInput) -> Result<(), AuthError> {
        validate_new_password(&input.new_password)?;
        let email = normalize_email(&input.email);
        self.otp.verify(&email, None, OtpPurpose::PasswordReset, &input.otp).await?;
        let user = self.repo.find_user_by_login(&email).await?.ok_or(AuthError::Unauthorized)?;
        self.repo.upsert_password(user.id, hash_password(&input.new_password)?, PASSWORD_ALGORITHM.into()).await?;
        info!(user_id = %user.id, "password_reset");
        Ok(())
    }

    /// Seed roles and, when no admin exists yet, create the configured one.
    pub async fn bootstrap(&self, admin: Option<&configs::BootstrapAdmin>) -> Result<Option<AuthUser>, AuthError> {
        self.repo.ensure_roles().await?;
        let Some(admin) = admin else { return Ok(None) };
        if self.repo.count_users_with_role(RoleName::Admin).await? > 0 {
            return Ok(None);
        }
        let user = self
            .register(RegisterInput {
                username: admin.username.clone(),
                email: admin.email.clone(),
                full_name: "System Administrator".into(),
                password: admin.password.clone(),
                role: RoleName::Admin,
            })
            .await?;
        info!(user_id = %user.id, "bootstrap_admin_created");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::mailer::RecordingMailer;
    use crate::otp::{code_from_body, OtpPolicy};
    use crate::repo::memory::InMemoryRepository;

    struct Harness {
        svc: AuthService<MockAuthRepository>,
        repo: Arc<MockAuthRepository>,
        mailer: Arc<RecordingMailer>,
    }

    fn harness() -> Harness {
        let repo = Arc::new(MockAuthRepository::default());
        let mailer = Arc::new(RecordingMailer::default());
        let otp = Arc::new(OtpService::new(Arc::new(InMemoryRepository::default()), mailer.clone(), OtpPolicy::default()));
        let svc = AuthService::new(repo.clone(), otp, AuthSettings { jwt_secret: "0123456789abcdef".into(), token_ttl_hours: 12 });
        Harness { svc, repo, mailer }
    }

    fn officer(username: &str) -> RegisterInput {
        RegisterInput {
            username: username.into(),
            email: format!("{username}@police.gov.pk"),
            full_name: "Field Officer".into(),
            password: "Passw0rd!".into(),
            role: RoleName::Officer,
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let h = harness();
        h.svc.register(officer("dup")).await.unwrap();
        let again = h.svc.register(RegisterInput { email: "other@police.gov.pk".into(), ..officer("dup") }).await;
        assert!(matches!(again, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn login_by_email_records_login_and_token_authenticates() {
        let h = harness();
        let u = h.svc.register(officer("emailer")).await.unwrap();
        let session = h.svc.login(LoginInput { login: "EMAILER@police.gov.pk".into(), password: "Passw0rd!".into() }).await.unwrap();
        assert_eq!(session.user.id, u.id);
        assert_eq!(h.repo.login_count(u.id), 1);

        let claims = h.svc.authenticate(&session.token).await.unwrap();
        assert_eq!(claims.user_id().unwrap(), u.id);
        assert_eq!(claims.role, RoleName::Officer);
    }

    #[tokio::test]
    async fn wrong_password_and_disabled_account_rejected() {
        let h = harness();
        let u = h.svc.register(officer("locked")).await.unwrap();
        let bad = h.svc.login(LoginInput { login: "locked".into(), password: "nope-nope".into() }).await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));

        let session = h.svc.login(LoginInput { login: "locked".into(), password: "Passw0rd!".into() }).await.unwrap();
        h.repo.set_active(u.id, false);
        let disabled = h.svc.login(LoginInput { login: "locked".into(), password: "Passw0rd!".into() }).await;
        assert!(matches!(disabled, Err(AuthError::Disabled)));
        assert!(h.svc.authenticate(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let h = harness();
        let u = h.svc.register(officer("changer")).await.unwrap();
        let wrong = h.svc.change_password(u.id, ChangePasswordInput { current_password: "bad-pass".into(), new_password: "NewPassw0rd".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));

        h.svc.change_password(u.id, ChangePasswordInput { current_password: "Passw0rd!".into(), new_password: "NewPassw0rd".into() }).await.unwrap();
        assert!(h.svc.login(LoginInput { login: "changer".into(), password: "NewPassw0rd".into() }).await.is_ok());
    }

    #[tokio::test]
    async fn forgot_and_reset_password_with_mailed_code() {
        let h = harness();
        h.svc.register(officer("forgetful")).await.unwrap();
        h.svc.forgot_password(ForgotPasswordInput { email: "forgetful@police.gov.pk".into() }).await.unwrap();
        let code = code_from_body(&h.mailer.last_body_for("forgetful@police.gov.pk").unwrap());

        let bad = h.svc.reset_password(ResetPasswordInput { email: "forgetful@police.gov.pk".into(), otp: "bad".into(), new_password: "Reset-Passw0rd".into() }).await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));

        h.svc.reset_password(ResetPasswordInput { email: "forgetful@police.gov.pk".into(), otp: code, new_password: "Reset-Passw0rd".into() }).await.unwrap();
        assert!(h.svc.login(LoginInput { login: "forgetful".into(), password: "Reset-Passw0rd".into() }).await.is_ok());
    }

    #[tokio::test]
    async fn forgot_password_for_unknown_email_sends_nothing() {
        let h = harness();
        h.svc.forgot_password(ForgotPasswordInput { email: "ghost@police.gov.pk".into() }).await.unwrap();
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn bootstrap_creates_admin_once() {
        let h = harness();
        let admin = configs::BootstrapAdmin { username: "admin".into(), email: "admin@noise.gov.pk".into(), password: "ChangeMe123".into() };
        assert!(h.svc.bootstrap(Some(&admin)).await.unwrap().is_some());
        assert!(h.svc.bootstrap(Some(&admin)).await.unwrap().is_none());
        assert!(h.svc.bootstrap(None).await.unwrap().is_none());
    }
}
