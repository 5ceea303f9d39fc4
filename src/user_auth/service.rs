use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, User, UserId};
use crate::store::{StoreError, UserRepository};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

/// Identity of the authenticated caller, injected by the JWT middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
}

/// User Signup Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 45))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Public part of a user record
#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_active: u.is_active,
            is_staff: u.is_staff,
        }
    }
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub username: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is disabled")]
    InactiveUser,
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct UserAuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl UserAuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            users,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Register a new user. Input must already be validated.
    pub async fn signup(&self, req: SignupRequest) -> Result<User, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        let user = self
            .users
            .create(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;
        tracing::info!("Registered user {} (id={})", user.username, user.id);
        Ok(user)
    }

    /// Verify credentials and issue a JWT
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .get_by_email(&req.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(AuthResponse {
            access_token: self.issue_token(&user.username)?,
            token_type: "Bearer".to_string(),
            username: user.username,
        })
    }

    /// Sign a token whose subject is `username`
    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + self.token_ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Resolve the caller to a user record
    pub async fn current_user(&self, caller: &Caller) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_username(&caller.username).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service(secret: &str) -> UserAuthService {
        UserAuthService::new(Arc::new(MemoryStore::new()), secret.to_string(), 24)
    }

    fn signup_request(username: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "password123".to_string(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let svc = service("secret-a");
        let token = svc.issue_token("alice").unwrap();
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = service("secret-a").issue_token("alice").unwrap();
        assert!(matches!(
            service("secret-b").verify_token(&token),
            Err(AuthError::Token(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service("secret-a");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "alice".to_string(),
            exp: past.timestamp() as usize,
            iat: (past - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();
        assert!(svc.verify_token(&token).is_err());
    }

    #[test]
    fn test_signup_request_validation() {
        assert!(signup_request("alice").validate().is_ok());

        let mut short_pw = signup_request("alice");
        short_pw.password = "short".to_string();
        assert!(short_pw.validate().is_err());

        let mut bad_email = signup_request("alice");
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        assert!(signup_request("").validate().is_err());
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let svc = service("secret-a");
        let user = svc.signup(signup_request("alice")).await.unwrap();
        assert_ne!(user.password_hash, "password123");

        let resp = svc
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(svc.verify_token(&resp.access_token).unwrap().sub, "alice");

        let caller = Caller {
            username: "alice".to_string(),
        };
        assert_eq!(svc.current_user(&caller).await.unwrap().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let svc = service("secret-a");
        svc.signup(signup_request("alice")).await.unwrap();
        let result = svc
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let unknown = svc
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict() {
        let svc = service("secret-a");
        svc.signup(signup_request("alice")).await.unwrap();
        let dup = svc.signup(signup_request("alice")).await;
        assert!(matches!(dup, Err(AuthError::Store(StoreError::Conflict(_)))));
    }
}
