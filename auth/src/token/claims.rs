use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Every token issued by this service carries a subject, an issued-at
/// timestamp, and an expiry. Custom fields ride along in the flattened
/// `extra` map; their ordering is irrelevant on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Get a custom claim by name.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Check whether the token is expired at the given timestamp.
    ///
    /// Expiry must be strictly in the future for the token to be live, so
    /// a token whose `exp` equals the current second is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_expiring_at(exp: i64) -> Claims {
        Claims {
            sub: "alice@example.com".to_string(),
            iat: exp - 60,
            exp,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_is_expired_boundary() {
        let claims = claims_expiring_at(1000);

        assert!(!claims.is_expired(999)); // Still live
        assert!(claims.is_expired(1000)); // Expiry must be strictly in the future
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_extra_claims_round_trip() {
        let mut extra = HashMap::new();
        extra.insert("role".to_string(), serde_json::json!("ADMIN"));

        let claims = Claims {
            sub: "alice@example.com".to_string(),
            iat: 100,
            exp: 200,
            extra,
        };

        let encoded = serde_json::to_string(&claims).expect("Failed to serialize claims");
        let decoded: Claims = serde_json::from_str(&encoded).expect("Failed to deserialize claims");

        assert_eq!(decoded, claims);
        assert_eq!(decoded.extra("role").unwrap().as_str(), Some("ADMIN"));
    }
}
