use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Session token codec: issues and consumes signed bearer tokens.
///
/// Tokens are compact JWS structures signed with HS256 under a single
/// long-lived symmetric key. The key is decoded once from its base64
/// configuration form at construction; there is no rotation and no key id
/// in the token.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a base64-encoded symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - Base64-encoded key material (at least 32 decoded bytes
    ///   for HS256)
    /// * `ttl_minutes` - Token time-to-live from issuance
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is not valid base64
    ///
    /// # Security Notes
    /// - Store the secret in environment variables or a vault, never in code
    /// - All verifiers sharing the secret can mint tokens; treat it as a
    ///   service-level credential
    pub fn from_base64_secret(secret: &str, ttl_minutes: i64) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_base64_secret(secret)
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
        let decoding_key = DecodingKey::from_base64_secret(secret)
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::HS256,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    /// Issue a signed token for a subject.
    ///
    /// The token carries `sub` = subject, `iat` = now, `exp` = now + TTL,
    /// plus any extra claims.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier to bind the token to
    /// * `extra_claims` - Additional claims flattened into the payload
    /// * `now` - Issuance instant (injected so expiry is testable)
    ///
    /// # Returns
    /// Compact serialized token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        extra_claims: HashMap<String, serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            extra: extra_claims,
        };

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Extract the subject from a token.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// The `sub` claim
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be parsed
    /// * `TokenSignatureInvalid` - Signature does not verify
    /// * `TokenExpired` - Token expiry has passed
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.extract_claim(token, |claims| claims.sub.clone())
    }

    /// Decode, verify, and project a claim out of a token.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `selector` - Projection applied to the verified claims
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be parsed
    /// * `TokenSignatureInvalid` - Signature does not verify
    /// * `TokenExpired` - Token expiry has passed
    pub fn extract_claim<T>(
        &self,
        token: &str,
        selector: impl FnOnce(&Claims) -> T,
    ) -> Result<T, TokenError> {
        let claims = self.decode(token)?;
        Ok(selector(&claims))
    }

    /// Check whether a token is valid for an expected subject.
    ///
    /// Valid means: signature verifies, the subject matches, and expiry is
    /// strictly in the future. An expired token is merely invalid
    /// (`Ok(false)`); malformed tokens and bad signatures propagate as
    /// typed errors so callers cannot mistake them for a clean mismatch.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `expected_subject` - Principal identifier the token must carry
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be parsed
    /// * `TokenSignatureInvalid` - Signature does not verify
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> Result<bool, TokenError> {
        match self.decode(token) {
            Ok(claims) => Ok(claims.sub == expected_subject),
            Err(TokenError::TokenExpired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Verify the signature and decode the claims.
    ///
    /// Expiry is checked here rather than delegated to the JWT library so
    /// that `exp` must be strictly after the current second, with no
    /// leeway.
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::from_decode_error)?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}
