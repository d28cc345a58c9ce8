//! Authentication service.

use crate::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use async_trait::async_trait;
use std::sync::Arc;
use taskhive_core::{TaskhiveError, TaskhiveResult, User, ValidateExt};
use taskhive_repository::UserRepository;
use taskhive_security::{Claims, PasswordHasher, TokenProvider};
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user.
    async fn register(&self, request: RegisterRequest) -> TaskhiveResult<UserResponse>;

    /// Logs in a user and issues an access token.
    async fn login(&self, request: LoginRequest) -> TaskhiveResult<TokenResponse>;

    /// Gets the current user from validated claims.
    async fn current_user(&self, claims: &Claims) -> TaskhiveResult<UserResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl<R: UserRepository> AuthServiceImpl<R> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> AuthService for AuthServiceImpl<R> {
    async fn register(&self, request: RegisterRequest) -> TaskhiveResult<UserResponse> {
        debug!("Registering user: {}", request.username);

        request.validate_request()?;

        if self
            .user_repository
            .exists_by_username_or_email(&request.username, &request.email)
            .await?
        {
            return Err(TaskhiveError::Conflict(
                "User with this email or username already exists".to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = User::new(request.username, request.email, password_hash);

        let saved_user = self.user_repository.save(&user).await?;

        info!("User registered: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn login(&self, request: LoginRequest) -> TaskhiveResult<TokenResponse> {
        debug!("Login attempt for: {}", request.username);

        request.validate_request()?;

        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(TaskhiveError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)?
        {
            warn!("Failed login for: {}", request.username);
            return Err(TaskhiveError::InvalidCredentials);
        }

        let token = self.token_provider.generate_token(&user)?;

        info!("User logged in: {}", user.id);
        Ok(TokenResponse::bearer(
            token,
            self.token_provider.expires_in_secs(),
        ))
    }

    async fn current_user(&self, claims: &Claims) -> TaskhiveResult<UserResponse> {
        let user_id = claims
            .user_id()
            .ok_or_else(|| TaskhiveError::InvalidToken("Missing user ID in token".to_string()))?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| TaskhiveError::not_found("User", user_id))?;

        Ok(UserResponse::from(user))
    }
}

impl<R: UserRepository> std::fmt::Debug for AuthServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use taskhive_config::SecurityConfig;
    use taskhive_core::UserId;

    /// Mock user repository for testing.
    struct MockUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: UserId) -> TaskhiveResult<Option<User>> {
            Ok(self.users.lock().get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> TaskhiveResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn exists_by_username_or_email(
            &self,
            username: &str,
            email: &str,
        ) -> TaskhiveResult<bool> {
            Ok(self
                .users
                .lock()
                .values()
                .any(|u| u.username == username || u.email.eq_ignore_ascii_case(email)))
        }

        async fn save(&self, user: &User) -> TaskhiveResult<User> {
            self.users.lock().insert(user.id, user.clone());
            Ok(user.clone())
        }
    }

    fn service() -> AuthServiceImpl<MockUserRepository> {
        let config = Arc::new(SecurityConfig::default());
        AuthServiceImpl::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(PasswordHasher::new()),
            Arc::new(TokenProvider::new(config)),
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "a-long-password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let service = service();

        let user = service.register(register_request()).await.unwrap();
        assert_eq!(user.username, "alice");

        let token = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "a-long-password".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let service = service();
        service.register(register_request()).await.unwrap();

        let err = service.register(register_request()).await.unwrap_err();
        assert!(matches!(err, TaskhiveError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service();
        service.register(register_request()).await.unwrap();

        let err = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TaskhiveError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let service = service();

        let err = service
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "whatever-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TaskhiveError::InvalidCredentials));
    }
}
