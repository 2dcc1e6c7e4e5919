use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AccountError;

/// Outcome of a successful login: the resolved user plus a freshly minted
/// access/refresh token pair.
#[derive(Debug)]
pub struct AuthenticatedSession {
    pub user: User,
    pub tokens: TokenPair,
}

/// Port for account service operations (registration and the session
/// token lifecycle).
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// No tokens are issued at registration.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Repository` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AccountError>;

    /// Verify credentials and mint a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, with an
    ///   identical error for both
    /// * `Repository` - Storage operation failed
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedSession, AccountError>;

    /// Mint a fresh token pair for an already-authenticated user.
    ///
    /// The caller must have resolved `user` through a valid refresh token.
    /// The previous refresh token is not invalidated; there is no
    /// server-side token state to invalidate it in.
    ///
    /// # Errors
    /// * `Token` - Token signing failed
    async fn refresh(&self, user: &User) -> Result<TokenPair, AccountError>;

    /// Resolve a verified token subject to a user record.
    ///
    /// # Errors
    /// * `Unauthenticated` - No user with this id (the account may have
    ///   been deleted after the token was issued)
    /// * `Repository` - Storage operation failed
    async fn resolve_subject(&self, id: &UserId) -> Result<User, AccountError>;
}

/// User directory contract: durable storage resolving user records by id
/// or email and persisting new ones.
///
/// Each operation is assumed atomic against storage; the uniqueness
/// constraint on email lives here.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user, assigning id and created_at.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness constraint violated
    /// * `Repository` - Storage operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Repository` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `Repository` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
}
