//! HS256 identity tokens issued by the identity provider.
//!
//! The provider signs tokens with a secret shared with this service. The
//! `sub` claim is the provider's stable user id and links the token to a
//! local `users` row via `external_auth_id`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reelvault_core::roles::{ROLE_ADMIN, ROLE_USER};
use serde::{Deserialize, Serialize};

/// Claims read from a verified identity token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentityClaims {
    /// Subject: the identity provider's user id.
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

/// Configuration for identity-token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Required `iss` claim, when set.
    pub issuer: Option<String>,
    /// Required `aud` claim, when set.
    pub audience: Option<String>,
    /// Lowercased emails that receive the admin role on first sign-in.
    pub admin_emails: Vec<String>,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `AUTH_JWT_SECRET` | **yes**  | --      |
    /// | `AUTH_ISSUER`     | no       | unset   |
    /// | `AUTH_AUDIENCE`   | no       | unset   |
    /// | `ADMIN_EMAILS`    | no       | empty   |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            secret,
            issuer: non_empty("AUTH_ISSUER"),
            audience: non_empty("AUTH_AUDIENCE"),
            admin_emails: parse_admin_emails(&std::env::var("ADMIN_EMAILS").unwrap_or_default()),
        }
    }

    /// Role a user with this email receives when their row is first created.
    pub fn initial_role_for(&self, email: &str) -> &'static str {
        let email = email.trim().to_lowercase();
        if self.admin_emails.iter().any(|e| *e == email) {
            ROLE_ADMIN
        } else {
            ROLE_USER
        }
    }
}

/// Split a comma-separated email list, lowercasing and dropping blanks.
pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Verify signature, expiry, and the configured issuer/audience.
pub fn verify_identity_token(
    token: &str,
    config: &AuthConfig,
) -> Result<IdentityClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    match &config.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let token_data = decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[derive(Serialize)]
struct IssuedClaims<'a> {
    #[serde(flatten)]
    identity: &'a IdentityClaims,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<&'a str>,
}

/// Sign an identity token the way the identity provider does.
///
/// Used by local tooling and the HTTP integration tests.
pub fn issue_identity_token(
    external_auth_id: &str,
    email: &str,
    name: Option<&str>,
    ttl_secs: i64,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let identity = IdentityClaims {
        sub: external_auth_id.to_string(),
        email: email.to_string(),
        name: name.map(str::to_string),
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &IssuedClaims {
            identity: &identity,
            iss: config.issuer.as_deref(),
            aud: config.audience.as_deref(),
        },
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
