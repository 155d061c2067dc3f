//! Main access service implementation

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::domain::entities::shop::Shop;
use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{SessionStore, ShopRepository};
use crate::services::token::{KeyPairGenerator, TokenService};

use th_shared::utils::validation::{is_valid_email, length_between, normalize_email, not_empty};

use super::config::AccessServiceConfig;
use super::password::PasswordHasher;

/// Access service for managing the complete shop authentication flow
pub struct AccessService<S, K, P>
where
    S: ShopRepository,
    K: SessionStore,
    P: PasswordHasher,
{
    /// Shop repository for account persistence
    shop_repository: Arc<S>,
    /// Session store for per-shop key and token state
    session_store: Arc<K>,
    /// Password hasher port
    password_hasher: Arc<P>,
    /// Token service for signing and verification
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AccessServiceConfig,
}

impl<S, K, P> AccessService<S, K, P>
where
    S: ShopRepository,
    K: SessionStore,
    P: PasswordHasher,
{
    /// Create a new access service
    ///
    /// # Arguments
    ///
    /// * `shop_repository` - Repository for shop account persistence
    /// * `session_store` - Store for session key and token state
    /// * `password_hasher` - Port for password hashing
    /// * `token_service` - Service for token signing and verification
    /// * `config` - Service configuration
    pub fn new(
        shop_repository: Arc<S>,
        session_store: Arc<K>,
        password_hasher: Arc<P>,
        token_service: Arc<TokenService>,
        config: AccessServiceConfig,
    ) -> Self {
        Self {
            shop_repository,
            session_store,
            password_hasher,
            token_service,
            config,
        }
    }

    /// Register a new shop account and open its first session
    ///
    /// This method:
    /// 1. Validates name, email, and password
    /// 2. Rejects emails that are already registered
    /// 3. Hashes the password and persists the shop
    /// 4. Creates a session with a fresh key pair and signed token pair
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the shop
    /// * `email` - Email address, normalized before storage
    /// * `password` - Plain password, only ever stored hashed
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The created shop summary and its token pair
    /// * `Err(DomainError)` - Validation failure, duplicate email, or store failure
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        self.validate_signup(name, email, password)?;
        let email = normalize_email(email);

        if self.shop_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let password_hash = self.password_hasher.hash(password)?;
        let shop = self
            .shop_repository
            .create(Shop::new(name.trim().to_string(), email, password_hash))
            .await?;

        info!(shop_id = %shop.id, "shop registered");
        self.issue_session(&shop).await
    }

    /// Authenticate a shop and open a session, replacing any existing one
    ///
    /// # Arguments
    ///
    /// * `email` - Email address used at signup
    /// * `password` - Plain password to check
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The shop summary and a fresh token pair
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown
    ///   email or wrong password, indistinguishable by design
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let shop = self
            .shop_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        if !self.password_hasher.verify(password, &shop.password_hash)? {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        info!(shop_id = %shop.id, "shop logged in");
        self.issue_session(&shop).await
    }

    /// Close the session for a shop, invalidating its refresh token
    ///
    /// Idempotent; logging out twice is not an error.
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        let removed = self.revoke_session(user_id).await?;
        if removed {
            info!(shop_id = %user_id, "shop logged out");
        }
        Ok(())
    }

    /// Delete the session for a shop, if any.
    ///
    /// # Returns
    /// * `Ok(true)` - A session existed and was removed
    /// * `Ok(false)` - No session to remove
    pub async fn revoke_session(&self, user_id: Uuid) -> DomainResult<bool> {
        self.session_store.delete(user_id).await
    }

    /// Rotate a refresh token into a new token pair
    ///
    /// This method:
    /// 1. Loads the claimed shop's session
    /// 2. Checks the presented token against the used-token history of
    ///    every session; a hit means the token was already spent, so the
    ///    owning session is revoked and the call is rejected
    /// 3. Requires the token to be the session's current one
    /// 4. Verifies the token's signature and claims against the session's
    ///    public key, including that it was issued to the claimed shop
    /// 5. Mints a new pair and commits the rotation atomically
    ///
    /// Of two concurrent calls with the same token, exactly one succeeds;
    /// the loser gets `RotationConflict` and no tokens.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The refresh token presented by the client
    /// * `claimed_user_id` - The shop the caller claims to be
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - A fresh access/refresh pair
    /// * `Err(DomainError)` - Any check failed; no tokens are issued
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        claimed_user_id: Uuid,
    ) -> DomainResult<TokenPair> {
        let token_hash = TokenService::hash_token(refresh_token);

        // Step 1: The claimed shop must have a live session
        let session = self
            .session_store
            .find_by_user_id(claimed_user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::SessionNotFound))?;

        // Step 2: Reuse detection across all sessions. The token hash may
        // sit in another shop's history when the claimed identity is forged.
        if let Some(owning) = self.session_store.find_by_used_token(&token_hash).await? {
            warn!(
                owning_shop_id = %owning.user_id,
                claimed_shop_id = %claimed_user_id,
                "refresh token reuse detected, revoking session"
            );
            self.session_store.delete(owning.user_id).await?;
            return Err(DomainError::Token(TokenError::TokenReuseDetected));
        }

        // Step 3: Only the current token may rotate
        if !session.is_current(&token_hash) {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        // Step 4: Cryptographic verification against the session's key
        let claims = self
            .token_service
            .verify(refresh_token, &session.public_key)?;
        if claims.user_id().ok() != Some(claimed_user_id) {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        // Step 5: Mint the replacement pair and commit atomically
        let new_keys = if self.config.rotate_keys_on_refresh {
            Some(KeyPairGenerator::generate()?)
        } else {
            None
        };
        let signing_keys = new_keys.as_ref().cloned().unwrap_or_else(|| session.key_pair());

        let pair = self.token_service.create_token_pair(
            claimed_user_id,
            &claims.email,
            claims.role.clone(),
            &signing_keys,
        )?;
        let new_hash = TokenService::hash_token(&pair.refresh_token);

        self.session_store
            .rotate(claimed_user_id, &token_hash, &new_hash, new_keys)
            .await?;

        info!(shop_id = %claimed_user_id, "refresh token rotated");
        Ok(pair)
    }

    /// Open a fresh session for `shop`, replacing any existing one
    async fn issue_session(&self, shop: &Shop) -> DomainResult<AuthResponse> {
        let keys = KeyPairGenerator::generate()?;
        let tokens = self.token_service.create_token_pair(
            shop.id,
            &shop.email,
            Some(shop.role.as_str().to_string()),
            &keys,
        )?;

        let refresh_hash = TokenService::hash_token(&tokens.refresh_token);
        self.session_store
            .create(Session::new(shop.id, keys, refresh_hash))
            .await?;

        Ok(AuthResponse::new(shop, tokens))
    }

    fn validate_signup(&self, name: &str, email: &str, password: &str) -> DomainResult<()> {
        if !not_empty(name) {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "name".to_string(),
            }));
        }
        if !length_between(name.trim(), 1, self.config.max_name_length) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidLength {
                field: "name".to_string(),
                min: 1,
                max: self.config.max_name_length,
            }));
        }
        if !is_valid_email(email.trim()) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }
        if !length_between(
            password,
            self.config.min_password_length,
            self.config.max_password_length,
        ) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                max: self.config.max_password_length,
            }));
        }
        Ok(())
    }
}
