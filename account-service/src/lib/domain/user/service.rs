use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AccountError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::AuthenticatedSession;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and session issuance.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `authenticator` - Credential hashing and token issuance
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AccountError> {
        // Fast-path duplicate check for a friendly error. The lookup and
        // the insert are not atomic; the storage-level uniqueness
        // constraint on email is the authoritative AlreadyExists signal
        // for requests that race through this window.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(
                email = %command.email.as_str(),
                "Registration attempt with existing email"
            );
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedSession, AccountError> {
        let user = match self
            .repository
            .find_by_email(credentials.email.as_str())
            .await?
        {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let tokens = self
            .authenticator
            .authenticate(
                &credentials.password,
                &user.password_hash,
                &user.id.to_string(),
            )
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login with wrong password");
                    AccountError::InvalidCredentials
                }
                auth::AuthenticationError::Password(err) => AccountError::Password(err),
                auth::AuthenticationError::Token(err) => AccountError::Token(err),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthenticatedSession { user, tokens })
    }

    async fn refresh(&self, user: &User) -> Result<TokenPair, AccountError> {
        // Rotation without revocation: the old refresh token stays valid
        // until its natural expiry, since tokens are self-contained.
        let tokens = self.authenticator.issue_pair(&user.id.to_string())?;

        tracing::info!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    async fn resolve_subject(&self, id: &UserId) -> Result<User, AccountError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %id, "Token subject does not resolve to a user");
            AccountError::Unauthenticated
        })
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenConfig;
    use auth::TokenType;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, new_user: NewUser) -> Result<User, AccountError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
        }
    }

    fn test_authenticator() -> Arc<Authenticator> {
        let config = TokenConfig::new(
            "test_secret_key_at_least_32_bytes!",
            "HS256",
            30,
            7,
            0,
        )
        .unwrap();
        Arc::new(Authenticator::new(config))
    }

    fn stored_user(id: i64, password_hash: String) -> User {
        User {
            id: UserId(id),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            Password::new("StrongPass123".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|new_user| {
                new_user.username.as_str() == "testuser"
                    && new_user.email.as_str() == "test@example.com"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(1),
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                })
            });

        let service = AccountService::new(Arc::new(repository), test_authenticator());

        let user = service.register(register_command()).await.unwrap();
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.username.as_str(), "testuser");
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_precheck() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user(1, "$argon2id$existing".to_string());
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        // The insert must not be attempted once the pre-check hits.
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository), test_authenticator());

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_lost_race() {
        let mut repository = MockTestUserRepository::new();

        // Pre-check passes, but the insert loses the race and hits the
        // storage uniqueness constraint.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|new_user| {
            Err(AccountError::EmailAlreadyExists(
                new_user.email.as_str().to_string(),
            ))
        });

        let service = AccountService::new(Arc::new(repository), test_authenticator());

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_issues_both_token_types() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = test_authenticator();

        let hash = authenticator.hash_password("StrongPass123").unwrap();
        let user = stored_user(42, hash);
        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AccountService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service
            .login(Credentials {
                email: EmailAddress::new("test@example.com".to_string()).unwrap(),
                password: "StrongPass123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.user.id, UserId(42));

        let access = authenticator
            .verify(&session.tokens.access_token, TokenType::Access)
            .unwrap();
        assert_eq!(access.sub, "42");

        let refresh = authenticator
            .verify(&session.tokens.refresh_token, TokenType::Refresh)
            .unwrap();
        assert_eq!(refresh.sub, "42");
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_identical() {
        let authenticator = test_authenticator();
        let hash = authenticator.hash_password("StrongPass123").unwrap();

        // Unknown email
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        let service = AccountService::new(Arc::new(repository), Arc::clone(&authenticator));
        let unknown = service
            .login(Credentials {
                email: EmailAddress::new("nobody@example.com".to_string()).unwrap(),
                password: "StrongPass123".to_string(),
            })
            .await
            .unwrap_err();

        // Wrong password for an existing user
        let mut repository = MockTestUserRepository::new();
        let user = stored_user(42, hash);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        let service = AccountService::new(Arc::new(repository), authenticator);
        let wrong = service
            .login(Credentials {
                email: EmailAddress::new("test@example.com".to_string()).unwrap(),
                password: "WrongPass123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert!(matches!(wrong, AccountError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_refresh_rotates_both_tokens() {
        let repository = MockTestUserRepository::new();
        let authenticator = test_authenticator();
        let service = AccountService::new(Arc::new(repository), Arc::clone(&authenticator));

        let user = stored_user(42, "$argon2id$irrelevant".to_string());
        let pair = service.refresh(&user).await.unwrap();

        let access = authenticator
            .verify(&pair.access_token, TokenType::Access)
            .unwrap();
        let refresh = authenticator
            .verify(&pair.refresh_token, TokenType::Refresh)
            .unwrap();
        assert_eq!(access.sub, "42");
        assert_eq!(refresh.sub, "42");
        assert!(refresh.exp > access.exp);
    }

    #[tokio::test]
    async fn test_resolve_subject_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user(42, "$argon2id$irrelevant".to_string());
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(42))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AccountService::new(Arc::new(repository), test_authenticator());

        let resolved = service.resolve_subject(&UserId(42)).await.unwrap();
        assert_eq!(resolved.id, UserId(42));
    }

    #[tokio::test]
    async fn test_resolve_subject_deleted_user_is_unauthenticated() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), test_authenticator());

        let result = service.resolve_subject(&UserId(999)).await;
        assert!(matches!(result.unwrap_err(), AccountError::Unauthenticated));
    }
}
