pub mod actix;
pub mod default;
pub mod error;
pub mod user;

use self::{default::default_scope_mappings, error::AuthenticationError, user::UserDetails};
use crate::Permission;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::{collections::HashMap, str::FromStr, time::Duration};

/// Configuration for the token [`Authenticator`].
#[derive(Clone, Debug)]
pub struct AuthenticatorConfig {
    /// The shared secret tokens are signed with
    pub secret: String,
    /// Mapping of token scopes to granted permissions
    pub scope_mappings: HashMap<String, Vec<String>>,
    /// Validity of newly issued access tokens
    pub access_token_ttl: Duration,
    /// Validity of newly issued refresh tokens
    pub refresh_token_ttl: Duration,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            secret: crate::devmode::token_secret(),
            scope_mappings: default_scope_mappings(),
            access_token_ttl: Duration::from_secs(60 * 60),
            refresh_token_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Marks a token as usable for API calls or only for refreshing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// The claims carried by both access and refresh tokens.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    /// The user name the token was issued to
    pub sub: String,
    /// Expiration, in seconds since the epoch
    pub exp: u64,
    /// Issued at, in seconds since the epoch
    pub iat: u64,
    /// Space separated list of granted scopes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    pub token_use: TokenUse,
}

/// A pair of freshly issued tokens.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct TokenPair {
    /// The access token, for authenticating API calls
    pub access: String,
    /// The refresh token, for obtaining the next pair
    pub refresh: String,
}

/// Issues and validates bearer tokens.
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    scope_mappings: HashMap<String, Vec<String>>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl Authenticator {
    pub fn new(config: AuthenticatorConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            scope_mappings: config.scope_mappings,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        }
    }

    /// Validate an access token, returning the user it authenticates.
    pub fn authenticate(&self, token: &str) -> Result<UserDetails, AuthenticationError> {
        let claims = self.decode(token)?;

        if claims.token_use != TokenUse::Access {
            log::debug!("rejecting non-access token for: {}", claims.sub);
            return Err(AuthenticationError::Failed);
        }

        Ok(UserDetails {
            id: claims.sub,
            permissions: self.permissions_for(&claims.scope),
        })
    }

    /// Issue a new access/refresh token pair for a user.
    pub fn issue(&self, user: &str, scope: &str) -> Result<TokenPair, AuthenticationError> {
        let now = get_current_timestamp();

        let access = self.encode(&Claims {
            sub: user.to_string(),
            exp: now + self.access_token_ttl.as_secs(),
            iat: now,
            scope: scope.to_string(),
            token_use: TokenUse::Access,
        })?;
        let refresh = self.encode(&Claims {
            sub: user.to_string(),
            exp: now + self.refresh_token_ttl.as_secs(),
            iat: now,
            scope: scope.to_string(),
            token_use: TokenUse::Refresh,
        })?;

        Ok(TokenPair { access, refresh })
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The new pair carries the subject and scopes of the original grant.
    pub fn refresh(&self, token: &str) -> Result<TokenPair, AuthenticationError> {
        let claims = self.decode(token)?;

        if claims.token_use != TokenUse::Refresh {
            log::debug!("rejecting non-refresh token for: {}", claims.sub);
            return Err(AuthenticationError::Failed);
        }

        self.issue(&claims.sub, &claims.scope)
    }

    fn encode(&self, claims: &Claims) -> Result<String, AuthenticationError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|err| {
            log::warn!("failed to encode token: {err}");
            AuthenticationError::Failed
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthenticationError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                log::debug!("failed to validate token: {err}");
                AuthenticationError::Failed
            })
    }

    /// Resolve granted scopes into permissions, dropping unknown entries.
    fn permissions_for(&self, scope: &str) -> Vec<Permission> {
        let mut permissions = Vec::new();

        for scope in scope.split_whitespace() {
            let Some(mapped) = self.scope_mappings.get(scope) else {
                continue;
            };
            for permission in mapped {
                match Permission::from_str(permission) {
                    Ok(permission) => permissions.push(permission),
                    Err(_) => log::warn!("ignoring unknown permission: {permission}"),
                }
            }
        }

        permissions
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::authenticator::default::default_scopes;

    fn authenticator() -> Authenticator {
        Authenticator::new(AuthenticatorConfig::default())
    }

    #[test]
    fn issued_access_token_authenticates() {
        let authenticator = authenticator();
        let pair = authenticator.issue("alice", &default_scopes()).unwrap();

        let details = authenticator.authenticate(&pair.access).unwrap();
        assert_eq!(details.id, "alice");
        assert!(details.permissions.contains(&Permission::ReadDeviation));
        assert!(details.permissions.contains(&Permission::CreateDeviation));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let authenticator = authenticator();
        let pair = authenticator.issue("alice", &default_scopes()).unwrap();

        assert!(authenticator.authenticate(&pair.refresh).is_err());
    }

    #[test]
    fn access_token_cannot_refresh() {
        let authenticator = authenticator();
        let pair = authenticator.issue("alice", &default_scopes()).unwrap();

        assert!(authenticator.refresh(&pair.access).is_err());
    }

    #[test]
    fn refresh_keeps_subject_and_scopes() {
        let authenticator = authenticator();
        let pair = authenticator.issue("alice", "read:deviation").unwrap();

        let next = authenticator.refresh(&pair.refresh).unwrap();
        let details = authenticator.authenticate(&next.access).unwrap();

        assert_eq!(details.id, "alice");
        assert_eq!(
            details.permissions,
            vec![Permission::ReadDeviation, Permission::ReadUser]
        );
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let authenticator = authenticator();
        let other = Authenticator::new(AuthenticatorConfig {
            secret: "3mithraNdir4".into(),
            ..Default::default()
        });

        let pair = other.issue("alice", &default_scopes()).unwrap();
        assert!(authenticator.authenticate(&pair.access).is_err());
    }

    #[test]
    fn unknown_scopes_grant_nothing() {
        let authenticator = authenticator();
        let pair = authenticator.issue("alice", "launch:missiles").unwrap();

        let details = authenticator.authenticate(&pair.access).unwrap();
        assert!(details.permissions.is_empty());
    }
}
