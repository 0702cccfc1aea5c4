//! API key parsing and per-request token signing.
//!
//! A combined API key looks like `{key_name}-{service_id}-{secret}` where the
//! last two parts are UUIDs. Every request carries a fresh HS256 JWT whose
//! issuer is the service id, signed with the secret.

use crate::error::{NotifyError, NotifyResult};
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const UUID_LENGTH: usize = 36;

/// `-{service_id}-{secret}`
const MIN_KEY_LENGTH: usize = 2 * UUID_LENGTH + 2;

/// JWT claims expected by the service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (service id)
    pub iss: String,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Parsed API key. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey {
    key_name: String,
    service_id: Uuid,
    secret: String,
}

impl ApiKey {
    /// Parses a combined API key.
    ///
    /// # Errors
    /// Returns [`NotifyError::InvalidApiKey`] when the key is too short,
    /// contains whitespace, lacks the `-` separators, or either trailing part
    /// is not a UUID.
    pub fn parse(raw: &str) -> NotifyResult<Self> {
        if raw.trim().is_empty() {
            return Err(NotifyError::invalid_api_key("API key is empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(NotifyError::invalid_api_key("API key contains whitespace"));
        }
        if !raw.is_ascii() {
            return Err(NotifyError::invalid_api_key(
                "API key contains non-ASCII characters",
            ));
        }
        if raw.len() < MIN_KEY_LENGTH {
            return Err(NotifyError::invalid_api_key(format!(
                "API key must be at least {} characters, got {}",
                MIN_KEY_LENGTH,
                raw.len()
            )));
        }

        let secret_start = raw.len() - UUID_LENGTH;
        let service_start = secret_start - 1 - UUID_LENGTH;
        let name_end = service_start - 1;

        if &raw[name_end..service_start] != "-" || &raw[secret_start - 1..secret_start] != "-" {
            return Err(NotifyError::invalid_api_key(
                "API key must have the form {key_name}-{service_id}-{secret}",
            ));
        }

        let service_id = Uuid::parse_str(&raw[service_start..secret_start - 1])
            .map_err(|_| NotifyError::invalid_api_key("service id part is not a valid UUID"))?;
        let secret = &raw[secret_start..];
        Uuid::parse_str(secret)
            .map_err(|_| NotifyError::invalid_api_key("secret part is not a valid UUID"))?;

        Ok(Self {
            key_name: raw[..name_end].to_string(),
            service_id,
            secret: secret.to_string(),
        })
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn service_id(&self) -> Uuid {
        self.service_id
    }

    /// Signs a bearer token issued now
    pub fn token(&self) -> NotifyResult<String> {
        self.token_at(Timestamp::now())
    }

    /// Signs a bearer token with the given issue time
    pub fn token_at(&self, issued_at: Timestamp) -> NotifyResult<String> {
        let claims = Claims {
            iss: self.service_id.to_string(),
            iat: issued_at.as_second(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|source| NotifyError::Token { source })
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("key_name", &self.key_name)
            .field("service_id", &self.service_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use proptest::prelude::*;

    const SERVICE_ID: &str = "26785a09-ab16-4eb0-8407-a37497a57506";
    const SECRET: &str = "3d844edf-8d35-48ac-975b-e847b4f122b0";

    fn combined_key(name: &str) -> String {
        format!("{}-{}-{}", name, SERVICE_ID, SECRET)
    }

    fn decode_claims(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
    }

    #[test]
    fn test_parse_valid_key() {
        let key = ApiKey::parse(&combined_key("integration_test")).unwrap();
        assert_eq!(key.key_name(), "integration_test");
        assert_eq!(key.service_id().to_string(), SERVICE_ID);
    }

    #[test]
    fn test_parse_key_name_with_dashes() {
        let key = ApiKey::parse(&combined_key("my-test-key")).unwrap();
        assert_eq!(key.key_name(), "my-test-key");
        assert_eq!(key.service_id().to_string(), SERVICE_ID);
    }

    #[test]
    fn test_parse_rejects_short_key() {
        let err = ApiKey::parse("not-a-key").unwrap_err();
        assert!(matches!(err, NotifyError::InvalidApiKey { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_and_whitespace() {
        assert!(ApiKey::parse("").is_err());
        assert!(ApiKey::parse("   ").is_err());
        assert!(ApiKey::parse(&combined_key("with space")).is_err());
    }

    #[test]
    fn test_parse_rejects_non_uuid_parts() {
        let bad_secret = format!("name-{}-{}", SERVICE_ID, "x".repeat(36));
        let err = ApiKey::parse(&bad_secret).unwrap_err();
        assert!(err.to_string().contains("secret"));

        let bad_service = format!("name-{}-{}", "y".repeat(36), SECRET);
        let err = ApiKey::parse(&bad_service).unwrap_err();
        assert!(err.to_string().contains("service id"));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let key = format!("name_{}_{}", SERVICE_ID, SECRET);
        assert!(ApiKey::parse(&key).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = ApiKey::parse(&combined_key("name")).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_claims() {
        let key = ApiKey::parse(&combined_key("name")).unwrap();
        let issued_at = Timestamp::from_second(1_700_000_000).unwrap();
        let token = key.token_at(issued_at).unwrap();

        let claims = decode_claims(&token, SECRET).unwrap();
        assert_eq!(claims.iss, SERVICE_ID);
        assert_eq!(claims.iat, 1_700_000_000);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let key = ApiKey::parse(&combined_key("name")).unwrap();
        let token = key.token().unwrap();
        assert!(decode_claims(&token, "wrong-secret").is_err());
    }

    proptest! {
        #[test]
        fn prop_any_key_name_parses(name in "[a-zA-Z0-9_-]{0,40}") {
            let key = ApiKey::parse(&combined_key(&name)).unwrap();
            prop_assert_eq!(key.key_name(), name.as_str());
            prop_assert_eq!(key.service_id().to_string(), SERVICE_ID);
        }

        #[test]
        fn prop_short_keys_rejected(raw in "[a-f0-9-]{0,73}") {
            prop_assert!(ApiKey::parse(&raw).is_err());
        }
    }
}
